//! # Only Grad
//!
//! `only_grad`项目旨在用纯rust实现一个[micrograd](https://github.com/karpathy/micrograd)
//! 风格的标量反向自动微分引擎：算术表达式求值时动态构建计算图（DAG），
//! 再由一次逆拓扑序遍历，把标量输出对上游每个节点的偏导数传播、累加出来；
//! 并在引擎之上搭建一个小型多层感知机（Neuron / Layer / Mlp）。

pub mod nn;
