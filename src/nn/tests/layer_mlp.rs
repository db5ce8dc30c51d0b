use crate::nn::{Graph, Layer, Mlp, Module};

#[test]
fn test_mlp_param_count() {
    let graph = Graph::new();
    let model = Mlp::new(&graph, 2, &[4, 4, 3], "mlp").unwrap();

    // 4*(2+1) + 4*(4+1) + 3*(4+1) = 12 + 20 + 15 = 47
    assert_eq!(model.num_params(), 47);
    assert_eq!(model.num_layers(), 3);
}

#[test]
fn test_mlp_forward_output_len() {
    let graph = Graph::new();
    let model = Mlp::new(&graph, 2, &[4, 4, 3], "mlp").unwrap();

    let x = vec![graph.input(0.5).unwrap(), graph.input(-0.5).unwrap()];
    let out = model.forward(&x).unwrap();
    assert_eq!(out.len(), 3);
}

#[test]
fn test_mlp_last_layer_is_linear() {
    let graph = Graph::new();
    let model = Mlp::new(&graph, 2, &[3, 1], "mlp").unwrap();

    // 隐藏层带 ReLU，输出层为线性
    let descr = model.to_string();
    assert_eq!(
        descr,
        "Model of: [Layer of: [ReLUNeuron(2), ReLUNeuron(2), ReLUNeuron(2)], \
         Layer of: [LinearNeuron(3)]]"
    );
}

#[test]
fn test_mlp_zero_grad_after_backward() {
    let graph = Graph::new_with_seed(7);
    let model = Mlp::new(&graph, 2, &[4, 1], "mlp").unwrap();

    let x = vec![graph.input(1.0).unwrap(), graph.input(-2.0).unwrap()];
    let out = model.forward(&x).unwrap();
    out[0].backward().unwrap();

    // 输出层偏置直通输出，梯度必然非零
    let params = model.parameters();
    let last_bias = params.last().unwrap();
    assert!(last_bias.grad().unwrap() != 0.0);

    model.zero_grad().unwrap();
    for p in &params {
        assert_eq!(p.grad().unwrap(), 0.0);
    }
}

#[test]
fn test_mlp_seeded_determinism() {
    let g1 = Graph::new_with_seed(42);
    let g2 = Graph::new_with_seed(42);
    let m1 = Mlp::new(&g1, 3, &[4, 2], "mlp").unwrap();
    let m2 = Mlp::new(&g2, 3, &[4, 2], "mlp").unwrap();

    let p1 = m1.parameters();
    let p2 = m2.parameters();
    assert_eq!(p1.len(), p2.len());
    for (a, b) in p1.iter().zip(p2.iter()) {
        assert_eq!(a.value().unwrap(), b.value().unwrap());
    }
}

#[test]
fn test_layer_forward_and_params() {
    let graph = Graph::new();
    let layer = Layer::new(&graph, 3, 2, true, "l").unwrap();

    assert_eq!(layer.nout(), 2);
    assert_eq!(layer.num_params(), 2 * (3 + 1));

    let x = vec![
        graph.input(1.0).unwrap(),
        graph.input(0.0).unwrap(),
        graph.input(-1.0).unwrap(),
    ];
    let out = layer.forward(&x).unwrap();
    assert_eq!(out.len(), 2);
    // ReLU 层输出非负
    for o in &out {
        assert!(o.value().unwrap() >= 0.0);
    }
}
