/*
 * @Author       : 老董
 * @Date         : 2026-02-10
 * @Description  : Var - 智能变量句柄，支持算子重载和链式调用
 *
 * 取反/减法/除法没有独立的反向规则，全部由 Add/Mul/Pow 组合派生：
 *   -a    = a * (-1)
 *   a - b = a + (-b)
 *   a / b = a * b^(-1)
 * 这一组合式定义保证派生算子的梯度自动正确，属于设计要求，不得特化。
 */

use super::NodeId;
use super::graph::{Graph, GraphError, GraphInner};
use rand::Rng;
use rand::rngs::StdRng;
use std::cell::RefCell;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::rc::Rc;

// ==================== Init 枚举 ====================

/// 参数初始化策略
#[derive(Debug, Clone)]
pub enum Init {
    /// 常数初始化
    Constant(f64),
    /// 全零
    Zeros,
    /// 均匀分布 [low, high]（使用 Graph 的 RNG）
    Uniform { low: f64, high: f64 },
}

impl Init {
    /// 采样初始值（使用全局 thread_rng，非确定性）
    pub fn generate(&self) -> f64 {
        match self {
            Self::Constant(v) => *v,
            Self::Zeros => 0.0,
            Self::Uniform { low, high } => rand::thread_rng().gen_range(*low..=*high),
        }
    }

    /// 采样初始值（使用指定的 RNG）
    pub fn generate_with_rng(&self, rng: &mut StdRng) -> f64 {
        match self {
            Self::Constant(v) => *v,
            Self::Zeros => 0.0,
            Self::Uniform { low, high } => rng.gen_range(*low..=*high),
        }
    }
}

// ==================== Var 结构 ====================

/// 智能变量句柄 - 携带图引用，支持算子重载和链式调用
///
/// # 设计原则
/// - 持有 `Rc<RefCell<GraphInner>>` 引用，实现算子重载
/// - Clone 语义（非 Copy），开销极低（Rc clone）
///
/// # 使用示例
/// ```ignore
/// let graph = Graph::new_with_seed(42);
/// let a = graph.input(-4.0)?;
/// let c = (1.0 + &a * 5.0).relu();   // 算子重载 + 链式调用
/// let loss = c.backward()?;          // 直接在 Var 上调用
/// ```
#[derive(Clone)]
pub struct Var {
    /// 节点 ID
    id: NodeId,
    /// 图引用（用户不可见）
    graph: Rc<RefCell<GraphInner>>,
}

impl std::fmt::Debug for Var {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Var").field("id", &self.id).finish()
    }
}

impl Var {
    /// 创建新的 Var（内部使用）
    pub(crate) const fn new(id: NodeId, graph: Rc<RefCell<GraphInner>>) -> Self {
        Self { id, graph }
    }

    /// 获取节点 ID
    pub const fn node_id(&self) -> NodeId {
        self.id
    }

    /// 获取内部图引用（供 trait 和内部模块使用）
    pub(crate) const fn graph(&self) -> &Rc<RefCell<GraphInner>> {
        &self.graph
    }

    /// 检查两个 Var 是否来自同一个 Graph
    pub fn same_graph(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.graph, &other.graph)
    }

    /// 获取 Var 所属的 Graph 句柄
    ///
    /// 即使原始 Graph 句柄已 drop，此方法仍返回有效的 Graph，
    /// 因为 Var 持有 `GraphInner` 的强引用（Rc）。
    pub fn get_graph(&self) -> Graph {
        Graph::from_rc(Rc::clone(&self.graph))
    }

    // ==================== 值/梯度访问 ====================

    /// 获取节点的当前值
    pub fn value(&self) -> Result<f64, GraphError> {
        self.graph.borrow().get_node_value(self.id)
    }

    /// 获取节点当前累加的梯度
    pub fn grad(&self) -> Result<f64, GraphError> {
        self.graph.borrow().get_node_grad(self.id)
    }

    /// 设置节点的值（优化器更新参数用）
    ///
    /// 改写叶子的值会使此前基于旧值计算出的下游节点值失效；
    /// 调用方应在每个训练步用当前参数重新构建表达式。
    pub fn set_value(&self, value: f64) -> Result<(), GraphError> {
        self.graph.borrow_mut().set_node_value(self.id, value)
    }

    /// 清零本节点的梯度
    pub fn zero_grad(&self) -> Result<(), GraphError> {
        self.graph.borrow_mut().clear_node_grad(self.id)
    }

    // ==================== 执行 ====================

    /// 构建（并缓存）以本节点为根的拓扑序
    pub fn forward(&self) -> Result<(), GraphError> {
        self.graph.borrow_mut().forward(self.id)
    }

    /// 反向传播，返回本节点的标量值
    ///
    /// 拓扑序未缓存时自动先构建。
    pub fn backward(&self) -> Result<f64, GraphError> {
        self.graph.borrow_mut().backward(self.id)
    }

    /// 反向传播，强制重新线性化后执行
    pub fn backward_rebuild(&self) -> Result<f64, GraphError> {
        self.graph.borrow_mut().backward_ex(self.id, true)
    }

    // ==================== 安全运算（返回 Result）====================

    /// 安全的加法（返回 Result）
    pub fn try_add(&self, other: &Self) -> Result<Self, GraphError> {
        if !self.same_graph(other) {
            return Err(GraphError::InvalidOperation(
                "不能对来自不同 Graph 的 Var 进行加法".to_string(),
            ));
        }
        let id = self.graph.borrow_mut().new_add_node(self.id, other.id, None)?;
        Ok(Self::new(id, Rc::clone(&self.graph)))
    }

    /// 安全的乘法（返回 Result）
    pub fn try_mul(&self, other: &Self) -> Result<Self, GraphError> {
        if !self.same_graph(other) {
            return Err(GraphError::InvalidOperation(
                "不能对来自不同 Graph 的 Var 进行乘法".to_string(),
            ));
        }
        let id = self
            .graph
            .borrow_mut()
            .new_multiply_node(self.id, other.id, None)?;
        Ok(Self::new(id, Rc::clone(&self.graph)))
    }

    /// 整数幂：self ^ exponent
    ///
    /// 指数为 0 时返回 `UnsupportedOperation`。
    pub fn pow(&self, exponent: i32) -> Result<Self, GraphError> {
        let id = self.graph.borrow_mut().new_pow_node(self.id, exponent, None)?;
        Ok(Self::new(id, Rc::clone(&self.graph)))
    }

    /// 安全的取反：-a = a * (-1)
    pub fn try_neg(&self) -> Result<Self, GraphError> {
        let id = {
            let mut g = self.graph.borrow_mut();
            let neg_one = g.new_input_node(-1.0, None)?;
            g.new_multiply_node(self.id, neg_one, None)?
        };
        Ok(Self::new(id, Rc::clone(&self.graph)))
    }

    /// 安全的减法：a - b = a + (-b)
    pub fn try_sub(&self, other: &Self) -> Result<Self, GraphError> {
        if !self.same_graph(other) {
            return Err(GraphError::InvalidOperation(
                "不能对来自不同 Graph 的 Var 进行减法".to_string(),
            ));
        }
        let neg_other = other.try_neg()?;
        self.try_add(&neg_other)
    }

    /// 安全的除法：a / b = a * b^(-1)
    pub fn try_div(&self, other: &Self) -> Result<Self, GraphError> {
        if !self.same_graph(other) {
            return Err(GraphError::InvalidOperation(
                "不能对来自不同 Graph 的 Var 进行除法".to_string(),
            ));
        }
        let reciprocal = other.pow(-1)?;
        self.try_mul(&reciprocal)
    }

    /// 把 f64 标量包装成本图中的新输入叶子（算子重载的标量互操作用）
    fn lift_scalar(&self, value: f64) -> Result<Self, GraphError> {
        let id = self.graph.borrow_mut().new_input_node(value, None)?;
        Ok(Self::new(id, Rc::clone(&self.graph)))
    }

    // ==================== 调试 ====================

    /// 以文本树形式渲染以本节点为根的表达式
    pub fn tree_lines(&self, sep: &str) -> Result<Vec<String>, GraphError> {
        self.graph.borrow().tree_lines(self.id, sep)
    }

    /// 打印表达式树
    pub fn print_tree(&self) -> Result<(), GraphError> {
        println!("{}", self.tree_lines("|--- ")?.join("\n"));
        Ok(())
    }
}

// ==================== 算子重载 ====================

// Add for &Var
impl Add for &Var {
    type Output = Var;

    fn add(self, other: &Var) -> Var {
        self.try_add(other).expect("Var 加法失败")
    }
}

// Add for Var (consumes self)
impl Add for Var {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        &self + &other
    }
}

// Add<Var> for &Var
impl Add<Var> for &Var {
    type Output = Var;

    fn add(self, other: Var) -> Var {
        self + &other
    }
}

// Add<&Var> for Var
impl Add<&Self> for Var {
    type Output = Self;

    fn add(self, other: &Self) -> Self {
        &self + other
    }
}

// Sub for &Var（实现为 self + (-1 * other)）
impl Sub for &Var {
    type Output = Var;

    fn sub(self, other: &Var) -> Var {
        self.try_sub(other).expect("Var 减法失败")
    }
}

// Sub for Var
impl Sub for Var {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        &self - &other
    }
}

// Sub<Var> for &Var
impl Sub<Var> for &Var {
    type Output = Var;

    fn sub(self, other: Var) -> Var {
        self - &other
    }
}

// Sub<&Var> for Var
impl Sub<&Self> for Var {
    type Output = Self;

    fn sub(self, other: &Self) -> Self {
        &self - other
    }
}

// Mul for &Var
impl Mul for &Var {
    type Output = Var;

    fn mul(self, other: &Var) -> Var {
        self.try_mul(other).expect("Var 乘法失败")
    }
}

// Mul for Var
impl Mul for Var {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        &self * &other
    }
}

// Mul<Var> for &Var
impl Mul<Var> for &Var {
    type Output = Var;

    fn mul(self, other: Var) -> Var {
        self * &other
    }
}

// Mul<&Var> for Var
impl Mul<&Self> for Var {
    type Output = Self;

    fn mul(self, other: &Self) -> Self {
        &self * other
    }
}

// Div for &Var（实现为 self * other^(-1)）
impl Div for &Var {
    type Output = Var;

    fn div(self, other: &Var) -> Var {
        self.try_div(other).expect("Var 除法失败")
    }
}

// Div for Var
impl Div for Var {
    type Output = Self;

    fn div(self, other: Self) -> Self {
        &self / &other
    }
}

// Div<Var> for &Var
impl Div<Var> for &Var {
    type Output = Var;

    fn div(self, other: Var) -> Var {
        self / &other
    }
}

// Div<&Var> for Var
impl Div<&Self> for Var {
    type Output = Self;

    fn div(self, other: &Self) -> Self {
        &self / other
    }
}

// Neg for &Var（实现为 self * -1）
impl Neg for &Var {
    type Output = Var;

    fn neg(self) -> Var {
        self.try_neg().expect("Var 取反失败")
    }
}

// Neg for Var
impl Neg for Var {
    type Output = Self;

    fn neg(self) -> Self {
        -&self
    }
}

// ==================== f64 标量互操作 ====================
// op(Var, f64) / op(f64, Var)：标量先被包装成新的输入叶子，再委托 Var–Var 形式

impl Add<f64> for &Var {
    type Output = Var;

    fn add(self, other: f64) -> Var {
        let rhs = self.lift_scalar(other).expect("包装标量失败");
        self + &rhs
    }
}

impl Add<f64> for Var {
    type Output = Self;

    fn add(self, other: f64) -> Self {
        &self + other
    }
}

impl Add<&Var> for f64 {
    type Output = Var;

    fn add(self, other: &Var) -> Var {
        let lhs = other.lift_scalar(self).expect("包装标量失败");
        &lhs + other
    }
}

impl Add<Var> for f64 {
    type Output = Var;

    fn add(self, other: Var) -> Var {
        self + &other
    }
}

impl Sub<f64> for &Var {
    type Output = Var;

    fn sub(self, other: f64) -> Var {
        let rhs = self.lift_scalar(other).expect("包装标量失败");
        self - &rhs
    }
}

impl Sub<f64> for Var {
    type Output = Self;

    fn sub(self, other: f64) -> Self {
        &self - other
    }
}

impl Sub<&Var> for f64 {
    type Output = Var;

    fn sub(self, other: &Var) -> Var {
        let lhs = other.lift_scalar(self).expect("包装标量失败");
        &lhs - other
    }
}

impl Sub<Var> for f64 {
    type Output = Var;

    fn sub(self, other: Var) -> Var {
        self - &other
    }
}

impl Mul<f64> for &Var {
    type Output = Var;

    fn mul(self, other: f64) -> Var {
        let rhs = self.lift_scalar(other).expect("包装标量失败");
        self * &rhs
    }
}

impl Mul<f64> for Var {
    type Output = Self;

    fn mul(self, other: f64) -> Self {
        &self * other
    }
}

impl Mul<&Var> for f64 {
    type Output = Var;

    fn mul(self, other: &Var) -> Var {
        let lhs = other.lift_scalar(self).expect("包装标量失败");
        &lhs * other
    }
}

impl Mul<Var> for f64 {
    type Output = Var;

    fn mul(self, other: Var) -> Var {
        self * &other
    }
}

impl Div<f64> for &Var {
    type Output = Var;

    fn div(self, other: f64) -> Var {
        let rhs = self.lift_scalar(other).expect("包装标量失败");
        self / &rhs
    }
}

impl Div<f64> for Var {
    type Output = Self;

    fn div(self, other: f64) -> Self {
        &self / other
    }
}

impl Div<&Var> for f64 {
    type Output = Var;

    fn div(self, other: &Var) -> Var {
        let lhs = other.lift_scalar(self).expect("包装标量失败");
        &lhs / other
    }
}

impl Div<Var> for f64 {
    type Output = Var;

    fn div(self, other: Var) -> Var {
        self / &other
    }
}
