/*
 * @Author       : 老董
 * @Date         : 2026-02-10
 * @Description  : Var 激活函数扩展 trait
 *
 * 提供激活函数的链式调用支持，用户需 import 此 trait 后才能使用。
 */

use crate::nn::Var;
use std::rc::Rc;

/// 激活函数扩展 trait
///
/// 提供激活函数的链式调用：
/// - `relu()`: `ReLU` 激活
/// - `sigmoid()`: Sigmoid 激活
///
/// # 使用示例
/// ```ignore
/// use only_grad::nn::{Var, VarActivationOps};
///
/// let h = x.relu();
/// let p = score.sigmoid();
/// ```
pub trait VarActivationOps {
    /// `ReLU` 激活：max(0, x)
    fn relu(&self) -> Var;

    /// Sigmoid 激活：1 / (1 + e^(x))
    ///
    /// 指数为 e^(+x)，不是教科书公式。
    fn sigmoid(&self) -> Var;
}

impl VarActivationOps for Var {
    fn relu(&self) -> Var {
        let id = self
            .graph()
            .borrow_mut()
            .new_relu_node(self.node_id(), None)
            .expect("创建 ReLU 节点失败");
        Self::new(id, Rc::clone(self.graph()))
    }

    fn sigmoid(&self) -> Var {
        let id = self
            .graph()
            .borrow_mut()
            .new_sigmoid_node(self.node_id(), None)
            .expect("创建 Sigmoid 节点失败");
        Self::new(id, Rc::clone(self.graph()))
    }
}
