/*
 * @Author       : 老董
 * @Date         : 2026-02-10
 * @Description  : 负责标量计算图与神经网络（neural network）的构建
 */

mod display;
mod graph;
pub mod layer;
mod module;
mod nodes;
mod var;
mod var_ops;

pub(in crate::nn) use display::format_node_display;
pub use graph::{Graph, GraphError, GraphInner};
pub use layer::{Layer, Mlp, Neuron};
pub use module::Module;
pub use nodes::{Node, NodeId, Op};
pub use var::{Init, Var};
pub use var_ops::VarActivationOps;

#[cfg(test)]
mod tests;
