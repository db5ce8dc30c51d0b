/*
 * @Author       : 老董
 * @Date         : 2026-02-10
 * @Description  : GraphInner 节点构建方法（new_*_node）
 *
 * 所有运算节点的前向值在构建时立即计算并存入新节点（非惰性）；
 * 构建只分配新节点，不会修改任何操作数节点。
 */

use super::GraphInner;
use super::super::error::GraphError;
use crate::nn::NodeId;
use crate::nn::nodes::{Node, Op};
use crate::nn::var::Init;

impl GraphInner {
    /// 添加节点到 arena（统一入口）
    ///
    /// 先校验操作数与显式名称，再分配；校验失败时 arena 保持原状。
    fn add_node_to_list(
        &mut self,
        value: f64,
        op: Op,
        parents: &[NodeId],
        name: Option<&str>,
        node_type: &str,
        is_parameter: bool,
    ) -> Result<NodeId, GraphError> {
        for &parent_id in parents {
            let _ = self.get_node(parent_id)?;
        }

        let node_id = NodeId(self.nodes.len());
        let node_name = match name {
            Some(n) => {
                self.check_duplicate_node_name(n)?;
                n.to_string()
            }
            // 自动命名带上节点 ID，天然唯一
            None => format!("{}_{}", node_type, node_id.0),
        };

        self.nodes.push(Node::new(
            node_id,
            node_name,
            value,
            op,
            parents.to_vec(),
            is_parameter,
        ));
        Ok(node_id)
    }

    /// 创建输入叶子节点（常量或外部特征）
    pub fn new_input_node(&mut self, value: f64, name: Option<&str>) -> Result<NodeId, GraphError> {
        self.add_node_to_list(value, Op::None, &[], name, "input", false)
    }

    /// 创建参数叶子节点，初始值由 `Init` 通过图的 RNG 采样
    pub fn new_parameter_node(
        &mut self,
        init: &Init,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let value = if let Some(ref mut rng) = self.rng {
            init.generate_with_rng(rng)
        } else {
            init.generate()
        };
        self.add_node_to_list(value, Op::None, &[], name, "parameter", true)
    }

    /// 创建加法节点：value = lhs + rhs
    pub fn new_add_node(
        &mut self,
        lhs: NodeId,
        rhs: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let value = self.get_node(lhs)?.value() + self.get_node(rhs)?.value();
        self.add_node_to_list(value, Op::Add, &[lhs, rhs], name, "add", false)
    }

    /// 创建乘法节点：value = lhs * rhs
    pub fn new_multiply_node(
        &mut self,
        lhs: NodeId,
        rhs: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let value = self.get_node(lhs)?.value() * self.get_node(rhs)?.value();
        self.add_node_to_list(value, Op::Mul, &[lhs, rhs], name, "mul", false)
    }

    /// 创建整数幂节点：value = base ^ exponent
    ///
    /// 指数在构建时固定，本身不参与微分；指数为 0 时没有定义导数规则，
    /// 直接报错而不是静默给出错误梯度。
    pub fn new_pow_node(
        &mut self,
        base: NodeId,
        exponent: i32,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        if exponent == 0 {
            return Err(GraphError::UnsupportedOperation(
                "pow 节点的指数不可为 0".to_string(),
            ));
        }
        let value = self.get_node(base)?.value().powi(exponent);
        self.add_node_to_list(value, Op::Pow(exponent), &[base], name, "pow", false)
    }

    /// 创建 `ReLU` 节点：value = max(0, x)
    pub fn new_relu_node(
        &mut self,
        parent: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let value = self.get_node(parent)?.value().max(0.0);
        self.add_node_to_list(value, Op::Relu, &[parent], name, "relu", false)
    }

    /// 创建 Sigmoid 节点：value = 1 / (1 + e^(x))
    ///
    /// 指数为 e^(+x) 而不是教科书的 e^(-x)；
    /// 下游数值行为依赖这一公式，不做更正。
    pub fn new_sigmoid_node(
        &mut self,
        parent: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let parent_value = self.get_node(parent)?.value();
        let value = 1.0 / (1.0 + parent_value.exp());
        self.add_node_to_list(value, Op::Sigmoid, &[parent], name, "sigmoid", false)
    }
}
