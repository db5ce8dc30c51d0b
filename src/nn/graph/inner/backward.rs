/*
 * @Author       : 老董
 * @Date         : 2026-02-10
 * @Description  : GraphInner 反向传播：梯度种子 + 逆拓扑序规则分发
 */

use super::GraphInner;
use super::super::error::GraphError;
use crate::nn::NodeId;
use crate::nn::nodes::Op;

impl GraphInner {
    // ========== 反向传播核心 ==========

    /// 反向传播（使用已缓存的拓扑序，缺失时先构建）
    ///
    /// 返回根节点的标量值。
    pub fn backward(&mut self, root: NodeId) -> Result<f64, GraphError> {
        self.backward_ex(root, false)
    }

    /// 反向传播（扩展版本）
    ///
    /// `force_rebuild` 为 true 时强制重新线性化（叶子值被外部改写、
    /// 希望显式刷新拓扑序缓存时使用）。
    ///
    /// 流程：
    /// 1. 确保拓扑序就绪；
    /// 2. 根节点梯度置 1（∂out/∂out = 1）；
    /// 3. 按拓扑序逆序逐节点分发梯度规则——逆序保证每个节点在向操作数
    ///    推送梯度前，其全部消费者都已把贡献累加进来。
    ///
    /// 前置条件：操作数在构建时固定指向已存在的节点，图中不可能出现环。
    pub fn backward_ex(&mut self, root: NodeId, force_rebuild: bool) -> Result<f64, GraphError> {
        let _ = self.get_node(root)?;
        if force_rebuild || !self.topo_cache.contains_key(&root) {
            self.forward(root)?;
        }
        let order = self
            .topo_cache
            .get(&root)
            .cloned()
            .ok_or_else(|| GraphError::InvalidOperation("拓扑序缓存缺失".to_string()))?;

        self.get_node_mut(root)?.set_grad(1.0);
        for &node_id in order.iter().rev() {
            self.propagate_grad_to_parents(node_id)?;
        }

        self.get_node_value(root)
    }

    /// 梯度规则表：按 Op 标签分发，向操作数累加（从不覆盖）梯度
    ///
    /// 这是所有反向规则的唯一权威实现。
    fn propagate_grad_to_parents(&mut self, node_id: NodeId) -> Result<(), GraphError> {
        let (op, out_value, out_grad, parents) = {
            let node = self.get_node(node_id)?;
            (
                node.op(),
                node.value(),
                node.grad(),
                node.parents().to_vec(),
            )
        };

        match op {
            // 叶子：无操作数，无事可做
            Op::None => {}
            Op::Add => {
                self.accumulate_node_grad(parents[0], out_grad)?;
                self.accumulate_node_grad(parents[1], out_grad)?;
            }
            Op::Mul => {
                let lhs_value = self.get_node(parents[0])?.value();
                let rhs_value = self.get_node(parents[1])?.value();
                self.accumulate_node_grad(parents[0], rhs_value * out_grad)?;
                self.accumulate_node_grad(parents[1], lhs_value * out_grad)?;
            }
            Op::Pow(exponent) => {
                // 构建时已拒绝指数 0，此分支不可达
                if exponent == 0 {
                    return Err(GraphError::UnsupportedOperation(
                        "pow 节点的指数不可为 0".to_string(),
                    ));
                }
                // 统一的幂规则 d/dx[x^n] = n·x^(n-1)，正负指数同式
                let base_value = self.get_node(parents[0])?.value();
                self.accumulate_node_grad(
                    parents[0],
                    f64::from(exponent) * base_value.powi(exponent - 1) * out_grad,
                )?;
            }
            Op::Relu => {
                if out_value > 0.0 {
                    self.accumulate_node_grad(parents[0], out_grad)?;
                }
            }
            Op::Sigmoid => {
                // 门控与 ReLU 相同，而非 σ(x)·(1−σ(x))·grad；
                // 下游数值行为依赖这一门控，不得改成教科书导数。
                if out_value > 0.0 {
                    self.accumulate_node_grad(parents[0], out_grad)?;
                }
            }
        }

        Ok(())
    }

    fn accumulate_node_grad(&mut self, id: NodeId, grad: f64) -> Result<(), GraphError> {
        self.get_node_mut(id)?.accumulate_grad(grad);
        Ok(())
    }
}
