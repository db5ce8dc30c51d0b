/*
 * @Author       : 老董
 * @Date         : 2026-02-10
 * @Description  : Mlp - 多层感知机
 */

use super::Layer;
use crate::nn::{Graph, GraphError, Module, Var};

/// 多层感知机：`nin -> nouts[0] -> nouts[1] -> …`
///
/// 除最后一层外全部接 `ReLU`，最后一层为线性输出——这是固定的
/// 架构策略，不支持逐层配置。
pub struct Mlp {
    layers: Vec<Layer>,
}

impl Mlp {
    /// 创建多层感知机
    ///
    /// # 参数
    /// - `graph`: 计算图句柄
    /// - `nin`: 输入特征数量
    /// - `nouts`: 各层的输出数量
    /// - `name`: 参数名称前缀（同一图上创建多个模型时须互不相同）
    pub fn new(graph: &Graph, nin: usize, nouts: &[usize], name: &str) -> Result<Self, GraphError> {
        let sizes: Vec<usize> = std::iter::once(nin).chain(nouts.iter().copied()).collect();

        let mut layers = Vec::with_capacity(nouts.len());
        for i in 0..nouts.len() {
            let nonlin = i != nouts.len() - 1;
            layers.push(Layer::new(
                graph,
                sizes[i],
                sizes[i + 1],
                nonlin,
                &format!("{name}_layer{i}"),
            )?);
        }
        Ok(Self { layers })
    }

    /// 前向传播：每层的输出按序作为下一层的输入
    pub fn forward(&self, x: &[Var]) -> Result<Vec<Var>, GraphError> {
        let mut out = x.to_vec();
        for layer in &self.layers {
            out = layer.forward(&out)?;
        }
        Ok(out)
    }

    /// 层数
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }
}

impl Module for Mlp {
    fn parameters(&self) -> Vec<Var> {
        self.layers.iter().flat_map(Layer::parameters).collect()
    }
}

impl std::fmt::Display for Mlp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let descr = self
            .layers
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "Model of: [{descr}]")
    }
}
