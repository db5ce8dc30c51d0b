/*
 * @Author       : 老董
 * @Date         : 2026-02-10
 * @Description  : Layer - 一层相互独立的神经元
 */

use super::Neuron;
use crate::nn::{Graph, GraphError, Module, Var};

/// 一层神经元：`nout` 个相互独立的 `Neuron`，各自 `nin` 个输入
///
/// 层内神经元互不依赖，输出顺序与声明顺序一致。
pub struct Layer {
    neurons: Vec<Neuron>,
}

impl Layer {
    /// 创建层
    pub fn new(
        graph: &Graph,
        nin: usize,
        nout: usize,
        nonlin: bool,
        name: &str,
    ) -> Result<Self, GraphError> {
        let mut neurons = Vec::with_capacity(nout);
        for i in 0..nout {
            neurons.push(Neuron::new(graph, nin, nonlin, &format!("{name}_n{i}"))?);
        }
        Ok(Self { neurons })
    }

    /// 前向传播：逐神经元求值，返回有序的输出序列
    pub fn forward(&self, x: &[Var]) -> Result<Vec<Var>, GraphError> {
        self.neurons.iter().map(|n| n.forward(x)).collect()
    }

    /// 层内神经元数量
    pub fn nout(&self) -> usize {
        self.neurons.len()
    }
}

impl Module for Layer {
    fn parameters(&self) -> Vec<Var> {
        self.neurons.iter().flat_map(Neuron::parameters).collect()
    }
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let descr = self
            .neurons
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "Layer of: [{descr}]")
    }
}
