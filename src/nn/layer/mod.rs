/*
 * @Author       : 老董
 * @Date         : 2026-02-10
 * @Description  : 神经网络层模块：Neuron / Layer / Mlp
 */

mod layer;
mod mlp;
mod neuron;

pub use layer::Layer;
pub use mlp::Mlp;
pub use neuron::Neuron;
