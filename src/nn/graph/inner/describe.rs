/*
 * @Author       : 老董
 * @Date         : 2026-02-10
 * @Description  : GraphInner 表达式树的文本渲染（调试用）
 */

use super::GraphInner;
use super::super::error::GraphError;
use crate::nn::NodeId;

impl GraphInner {
    // ========== 表达式树渲染 ==========

    /// 以文本树形式渲染以 `root` 为根的表达式
    ///
    /// 沿父边（操作数）向上展开，每层加一个 `sep` 前缀。
    /// 父边是非拥有的下标关系，渲染不影响图本身；
    /// 被共享的子表达式会在每个使用处重复显示。
    pub fn tree_lines(&self, root: NodeId, sep: &str) -> Result<Vec<String>, GraphError> {
        let node = self.get_node(root)?;
        let mut lines = vec![format!(
            "Data: {} & Grad: {} & op: {}",
            node.value(),
            node.grad(),
            node.type_name()
        )];
        for &parent_id in node.parents() {
            for line in self.tree_lines(parent_id, sep)? {
                lines.push(format!("{sep}{line}"));
            }
        }
        Ok(lines)
    }
}
