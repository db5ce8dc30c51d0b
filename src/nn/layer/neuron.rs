/*
 * @Author       : 老董
 * @Date         : 2026-02-10
 * @Description  : Neuron - 单个神经元
 */

use crate::nn::{Graph, GraphError, Init, Module, Var, VarActivationOps};

/// 单个神经元：`act = Σ(w_i * x_i) + b`，可选接 `ReLU`
///
/// 权重初始化为 U[-1, 1] 的独立采样（经由图的 RNG，可用种子复现），
/// 偏置初始化为 0。
pub struct Neuron {
    /// 权重参数
    w: Vec<Var>,
    /// 偏置参数
    b: Var,
    /// 是否在仿射和之后接 ReLU
    nonlin: bool,
}

impl Neuron {
    /// 创建神经元
    ///
    /// # 参数
    /// - `graph`: 计算图句柄
    /// - `nin`: 输入特征数量（权重数量）
    /// - `nonlin`: 是否接 `ReLU` 激活
    /// - `name`: 参数名称前缀
    pub fn new(graph: &Graph, nin: usize, nonlin: bool, name: &str) -> Result<Self, GraphError> {
        let mut w = Vec::with_capacity(nin);
        for i in 0..nin {
            w.push(graph.parameter(
                Init::Uniform {
                    low: -1.0,
                    high: 1.0,
                },
                &format!("{name}_w{i}"),
            )?);
        }
        let b = graph.parameter(Init::Zeros, &format!("{name}_b"))?;
        Ok(Self { w, b, nonlin })
    }

    /// 前向传播：`Σ(w_i * x_i) + b`，`nonlin` 时接 `ReLU`
    ///
    /// 输入长度必须等于权重数量，否则返回 `ShapeMismatch`
    /// （不做静默截断）。
    pub fn forward(&self, x: &[Var]) -> Result<Var, GraphError> {
        if x.len() != self.w.len() {
            return Err(GraphError::ShapeMismatch {
                expected: self.w.len(),
                got: x.len(),
                message: "神经元输入长度与权重数量不一致".to_string(),
            });
        }

        let mut act: Option<Var> = None;
        for (wi, xi) in self.w.iter().zip(x.iter()) {
            let term = wi.try_mul(xi)?;
            act = Some(match act {
                Some(sum) => sum.try_add(&term)?,
                None => term,
            });
        }
        let act = match act {
            Some(sum) => sum.try_add(&self.b)?,
            None => self.b.clone(),
        };

        if self.nonlin { Ok(act.relu()) } else { Ok(act) }
    }

    /// 输入特征数量
    pub fn nin(&self) -> usize {
        self.w.len()
    }

    /// 是否带非线性激活
    pub const fn is_nonlin(&self) -> bool {
        self.nonlin
    }
}

impl Module for Neuron {
    fn parameters(&self) -> Vec<Var> {
        let mut params = self.w.clone();
        params.push(self.b.clone());
        params
    }
}

impl std::fmt::Display for Neuron {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.nonlin {
            write!(f, "ReLUNeuron({})", self.w.len())
        } else {
            write!(f, "LinearNeuron({})", self.w.len())
        }
    }
}
