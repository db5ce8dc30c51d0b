mod graph_backward;
mod layer_mlp;
mod layer_neuron;
mod node_relu;
