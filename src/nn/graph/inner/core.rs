/*
 * @Author       : 老董
 * @Date         : 2026-02-10
 * @Description  : GraphInner 核心操作 + forward（拓扑序线性化）
 */

use super::GraphInner;
use super::super::error::GraphError;
use crate::nn::NodeId;
use crate::nn::nodes::Node;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::{HashMap, HashSet};

impl GraphInner {
    // ========== 创建 ==========

    pub fn new() -> Self {
        Self::with_name("default_graph")
    }

    /// 创建一个带固定种子的计算图（确保可重复性）
    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            name: "default_graph".to_string(),
            nodes: Vec::new(),
            topo_cache: HashMap::new(),
            rng: Some(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn with_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
            nodes: Vec::new(),
            topo_cache: HashMap::new(),
            rng: None,
        }
    }

    /// 创建一个带名称和固定种子的计算图
    pub fn with_name_and_seed(name: &str, seed: u64) -> Self {
        Self {
            name: name.to_string(),
            nodes: Vec::new(),
            topo_cache: HashMap::new(),
            rng: Some(StdRng::seed_from_u64(seed)),
        }
    }

    // ========== 基础访问器 ==========

    /// 设置/重置图的随机种子
    pub fn set_seed(&mut self, seed: u64) {
        self.rng = Some(StdRng::seed_from_u64(seed));
    }

    /// 检查图是否有固定种子
    pub const fn has_seed(&self) -> bool {
        self.rng.is_some()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nodes(&self) -> Vec<NodeId> {
        (0..self.nodes.len()).map(NodeId).collect()
    }

    pub fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn get_node(&self, id: NodeId) -> Result<&Node, GraphError> {
        self.nodes.get(id.0).ok_or(GraphError::NodeNotFound(id))
    }

    pub(in crate::nn) fn get_node_mut(&mut self, id: NodeId) -> Result<&mut Node, GraphError> {
        self.nodes.get_mut(id.0).ok_or(GraphError::NodeNotFound(id))
    }

    pub fn get_node_parents(&self, id: NodeId) -> Result<Vec<NodeId>, GraphError> {
        Ok(self.get_node(id)?.parents().to_vec())
    }

    pub fn get_node_name(&self, id: NodeId) -> Result<&str, GraphError> {
        Ok(self.get_node(id)?.name())
    }

    pub fn get_node_value(&self, id: NodeId) -> Result<f64, GraphError> {
        Ok(self.get_node(id)?.value())
    }

    /// 设置节点的值（优化器更新参数用）
    ///
    /// 改写叶子的值会使此前基于旧值急切计算出的下游节点值失效；
    /// 调用方应在每个训练步重新构建表达式（本设计没有原地重算协议）。
    pub fn set_node_value(&mut self, id: NodeId, value: f64) -> Result<(), GraphError> {
        self.get_node_mut(id)?.set_value(value);
        Ok(())
    }

    pub fn get_node_grad(&self, id: NodeId) -> Result<f64, GraphError> {
        Ok(self.get_node(id)?.grad())
    }

    pub fn set_node_grad(&mut self, id: NodeId, grad: f64) -> Result<(), GraphError> {
        self.get_node_mut(id)?.set_grad(grad);
        Ok(())
    }

    /// 获取所有可训练的参数节点
    pub fn trainable_nodes(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|node| node.is_parameter())
            .map(Node::id)
            .collect()
    }

    // ========== 名称生成 ==========

    pub(in crate::nn::graph) fn check_duplicate_node_name(
        &self,
        name: &str,
    ) -> Result<(), GraphError> {
        if self.nodes.iter().any(|node| node.name() == name) {
            return Err(GraphError::DuplicateNodeName(name.to_string()));
        }
        Ok(())
    }

    // ========== forward（拓扑序线性化）==========

    /// 对以 `root` 为根的子图做确定性的深度优先线性化，并缓存结果
    ///
    /// 产生的序列中每个节点都严格位于其所有操作数之后（合法拓扑序），
    /// 且每个节点至多出现一次（以 `NodeId` 为身份去重，与数值无关）。
    /// 幂等：节点结构创建后不可变，同一根上重复调用产生相同序列。
    pub fn forward(&mut self, root: NodeId) -> Result<(), GraphError> {
        let order = self.build_topo_order(root)?;
        self.topo_cache.insert(root, order);
        Ok(())
    }

    /// 查询某根节点当前缓存的拓扑序
    pub fn topo_order(&self, root: NodeId) -> Option<&[NodeId]> {
        self.topo_cache.get(&root).map(Vec::as_slice)
    }

    pub(in crate::nn::graph) fn build_topo_order(
        &self,
        root: NodeId,
    ) -> Result<Vec<NodeId>, GraphError> {
        let mut order = Vec::new();
        let mut visited = HashSet::new();
        self.topo_dfs(root, &mut visited, &mut order)?;
        Ok(order)
    }

    fn topo_dfs(
        &self,
        node_id: NodeId,
        visited: &mut HashSet<NodeId>,
        order: &mut Vec<NodeId>,
    ) -> Result<(), GraphError> {
        if visited.contains(&node_id) {
            return Ok(());
        }
        visited.insert(node_id);

        // 按操作数的创建顺序先递归（第一个操作数、再第二个），后序记录本节点
        let parents = self.get_node_parents(node_id)?;
        for parent_id in parents {
            self.topo_dfs(parent_id, visited, order)?;
        }
        order.push(node_id);

        Ok(())
    }

    // ========== 梯度清零 ==========

    /// 清零所有节点的梯度（PyTorch 风格）
    pub fn zero_grad(&mut self) {
        for node in &mut self.nodes {
            node.clear_grad();
        }
    }

    /// 清零单个节点的梯度
    pub fn clear_node_grad(&mut self, id: NodeId) -> Result<(), GraphError> {
        self.get_node_mut(id)?.clear_grad();
        Ok(())
    }
}
