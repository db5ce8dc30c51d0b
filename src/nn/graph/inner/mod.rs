/*
 * @Author       : 老董
 * @Date         : 2026-02-10
 * @Description  : GraphInner 标量计算图的底层实现
 *
 * 各 impl 块分散在子模块中：
 * - core.rs: 基础操作 + forward（拓扑序线性化）
 * - backward.rs: 反向传播 + 梯度规则表
 * - node_builders.rs: new_*_node（前向值在构建时立即计算）
 * - describe.rs: 表达式树的文本渲染
 */

mod backward;
mod core;
mod describe;
mod node_builders;

use crate::nn::NodeId;
use crate::nn::nodes::Node;
use rand::rngs::StdRng;
use std::collections::HashMap;

/// 图的完整定义（核心实现）
///
/// 这是计算图的核心实现。用户通常通过 `Graph` 句柄使用此结构，
/// 高级用户可通过 `graph.inner()` 访问底层操作。
pub struct GraphInner {
    pub(in crate::nn::graph) name: String,
    /// 节点 arena：`NodeId` 即下标；节点创建后不会被移除，
    /// 因此下标恒有效，且可直接充当遍历时的身份键
    pub(in crate::nn::graph) nodes: Vec<Node>,
    /// 以根节点为键缓存的拓扑序（序列中每个节点都位于其所有操作数之后）
    pub(in crate::nn::graph) topo_cache: HashMap<NodeId, Vec<NodeId>>,
    /// 图级别的随机数生成器（用于参数初始化等）
    /// None 表示使用默认的 thread_rng（非确定性）
    pub(in crate::nn::graph) rng: Option<StdRng>,
}

impl Default for GraphInner {
    fn default() -> Self {
        Self::new()
    }
}
