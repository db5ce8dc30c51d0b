/*
 * @Author       : 老董
 * @Date         : 2026-02-10
 * @Description  : Module trait 定义
 */

use super::{GraphError, Var};

/// 模块 trait
///
/// # 设计原则
/// - `forward()` **不是** trait 方法（签名各异）
/// - `new()` **不是** trait 方法（参数各异）
/// - `parameters()` 返回 `Vec<Var>`（签名一致，放入 trait）
/// - 由于 Var 携带图引用，`forward()` 不需要 `&Graph` 参数
pub trait Module {
    /// 获取所有可训练参数
    ///
    /// 返回顺序稳定且确定（按声明顺序拼接），
    /// 外部优化器依赖此顺序在训练步间对齐参数与梯度。
    fn parameters(&self) -> Vec<Var>;

    /// 将所有参数的梯度清零
    fn zero_grad(&self) -> Result<(), GraphError> {
        for param in self.parameters() {
            param.zero_grad()?;
        }
        Ok(())
    }

    /// 获取参数数量
    fn num_params(&self) -> usize {
        self.parameters().len()
    }
}
