/*
 * @Author       : 老董
 * @Date         : 2026-02-10
 * @Description  : 节点相关的基础类型：NodeId、Op 标签与 Node 本体
 */

use crate::nn::format_node_display;

/// 节点 ID（图内唯一，即节点在 arena 中的下标）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// 节点的运算类型标签
///
/// 反向传播规则统一由 `GraphInner` 中的规则表按此标签分发，
/// 不使用逐实例闭包，也不使用 trait 对象。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// 叶子节点（输入或参数），无反向规则
    None,
    /// 加法：两个操作数
    Add,
    /// 乘法：两个操作数
    Mul,
    /// 整数幂：指数在构建时固定（不可微分，且不可为 0）
    Pow(i32),
    /// ReLU 激活：一个操作数
    Relu,
    /// Sigmoid 激活：一个操作数
    Sigmoid,
}

impl Op {
    /// 运算类型名（用于显示与自动命名）
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::None => "leaf",
            Self::Add => "add",
            Self::Mul => "mul",
            Self::Pow(_) => "pow",
            Self::Relu => "relu",
            Self::Sigmoid => "sigmoid",
        }
    }
}

/// 计算图节点：一个标量值及其在图中的边
///
/// 结构（op 与 parents）在创建后不可变；可变的只有：
/// - `value`：优化器在反向传播结束后更新（之前计算出的下游值随之失效）
/// - `grad`：反向传播时累加（从不覆盖），或被显式清零
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    name: String,
    value: f64,
    grad: f64,
    op: Op,
    /// 父节点（运算的操作数），按创建顺序排列，0~2 个
    parents: Vec<NodeId>,
    /// 是否为可训练参数（仅叶子节点可置位）
    is_parameter: bool,
}

impl Node {
    pub(in crate::nn) fn new(
        id: NodeId,
        name: String,
        value: f64,
        op: Op,
        parents: Vec<NodeId>,
        is_parameter: bool,
    ) -> Self {
        Self {
            id,
            name,
            value,
            grad: 0.0,
            op,
            parents,
            is_parameter,
        }
    }

    pub const fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn value(&self) -> f64 {
        self.value
    }

    pub const fn grad(&self) -> f64 {
        self.grad
    }

    pub const fn op(&self) -> Op {
        self.op
    }

    pub fn parents(&self) -> &[NodeId] {
        &self.parents
    }

    pub const fn is_parameter(&self) -> bool {
        self.is_parameter
    }

    /// 节点类型名：叶子区分 input/parameter，其余沿用运算类型名
    pub const fn type_name(&self) -> &'static str {
        match self.op {
            Op::None => {
                if self.is_parameter {
                    "parameter"
                } else {
                    "input"
                }
            }
            _ => self.op.type_name(),
        }
    }

    pub(in crate::nn) fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    pub(in crate::nn) fn set_grad(&mut self, grad: f64) {
        self.grad = grad;
    }

    /// 累加（而非覆盖）一份梯度贡献
    pub(in crate::nn) fn accumulate_grad(&mut self, grad: f64) {
        self.grad += grad;
    }

    pub(in crate::nn) fn clear_grad(&mut self) {
        self.grad = 0.0;
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            format_node_display(self.id, &self.name, self.type_name())
        )
    }
}
