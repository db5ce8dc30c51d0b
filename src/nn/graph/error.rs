/*
 * @Author       : 老董
 * @Date         : 2026-02-10
 * @Description  : Graph 模块的错误类型
 */

use crate::nn::NodeId;
use thiserror::Error;

/// Graph 操作错误类型
///
/// 构建期错误（不支持的指数、形状不匹配）只中止触发它的那一次操作，
/// 不会留下半更新的梯度；调用方修正输入后可直接重试。
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GraphError {
    #[error("节点[id={}]不存在", .0.0)]
    NodeNotFound(NodeId),

    #[error("不支持的操作：{0}")]
    UnsupportedOperation(String),

    #[error("形状不匹配：期望{expected}个输入，实际得到{got}个。{message}")]
    ShapeMismatch {
        expected: usize,
        got: usize,
        message: String,
    },

    #[error("无效操作：{0}")]
    InvalidOperation(String),

    #[error("节点名称{0}在图中重复")]
    DuplicateNodeName(String),
}
