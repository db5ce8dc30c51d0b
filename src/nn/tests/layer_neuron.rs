use crate::nn::{Graph, Module, Neuron};
use approx::assert_abs_diff_eq;

#[test]
fn test_neuron_param_count() {
    let graph = Graph::new();
    let n = Neuron::new(&graph, 3, true, "n").unwrap();

    // nin 个权重 + 1 个偏置
    assert_eq!(n.parameters().len(), 4);
    assert_eq!(n.num_params(), 4);
    assert_eq!(n.nin(), 3);
}

#[test]
fn test_neuron_shape_mismatch() {
    let graph = Graph::new();
    let n = Neuron::new(&graph, 2, true, "n").unwrap();
    let x = vec![graph.input(1.0).unwrap()];

    // 输入长度与权重数量不一致时报错，而非静默截断
    assert!(n.forward(&x).is_err());
}

#[test]
fn test_neuron_linear_forward() {
    let graph = Graph::new();
    let n = Neuron::new(&graph, 2, false, "n").unwrap();

    // 手动设定 w = [2, -1]，b = 0.5
    let params = n.parameters();
    params[0].set_value(2.0).unwrap();
    params[1].set_value(-1.0).unwrap();
    params[2].set_value(0.5).unwrap();

    // act = 2*1 + (-1)*2 + 0.5 = 0.5
    let x = vec![graph.input(1.0).unwrap(), graph.input(2.0).unwrap()];
    let out = n.forward(&x).unwrap();
    assert_abs_diff_eq!(out.value().unwrap(), 0.5, epsilon = 1e-12);
}

#[test]
fn test_neuron_relu_clamps_negative() {
    let graph = Graph::new();
    let n = Neuron::new(&graph, 2, true, "n").unwrap();

    let params = n.parameters();
    params[0].set_value(1.0).unwrap();
    params[1].set_value(1.0).unwrap();
    params[2].set_value(0.0).unwrap();

    // act = -3 + (-2) = -5 → ReLU 后为 0
    let x = vec![graph.input(-3.0).unwrap(), graph.input(-2.0).unwrap()];
    let out = n.forward(&x).unwrap();
    assert_eq!(out.value().unwrap(), 0.0);
}

#[test]
fn test_neuron_bias_init_zero() {
    let graph = Graph::new();
    let n = Neuron::new(&graph, 2, true, "n").unwrap();
    let params = n.parameters();

    // 权重在 [-1, 1] 内，偏置恒为 0
    for w in &params[..2] {
        let v = w.value().unwrap();
        assert!((-1.0..=1.0).contains(&v));
    }
    assert_eq!(params[2].value().unwrap(), 0.0);
}

#[test]
fn test_neuron_display() {
    let graph = Graph::new();
    let relu = Neuron::new(&graph, 3, true, "a").unwrap();
    let linear = Neuron::new(&graph, 2, false, "b").unwrap();

    assert_eq!(relu.to_string(), "ReLUNeuron(3)");
    assert_eq!(linear.to_string(), "LinearNeuron(2)");
}
