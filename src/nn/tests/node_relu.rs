use crate::nn::{Graph, VarActivationOps};

#[test]
fn test_relu_forward() {
    let graph = Graph::new();
    assert_eq!(graph.input(5.0).unwrap().relu().value().unwrap(), 5.0);
    assert_eq!(graph.input(-5.0).unwrap().relu().value().unwrap(), 0.0);
    assert_eq!(graph.input(0.0).unwrap().relu().value().unwrap(), 0.0);
}

#[test]
fn test_relu_gates_gradient_when_negative() {
    let graph = Graph::new();
    let x = graph.input(-5.0).unwrap();
    let y = x.relu();

    y.backward().unwrap();
    assert_eq!(y.value().unwrap(), 0.0);
    assert_eq!(x.grad().unwrap(), 0.0);
}

#[test]
fn test_relu_passes_gradient_when_positive() {
    let graph = Graph::new();
    let x = graph.input(5.0).unwrap();
    let y = x.relu();

    y.backward().unwrap();
    assert_eq!(y.value().unwrap(), 5.0);
    assert_eq!(x.grad().unwrap(), 1.0);
}

#[test]
fn test_relu_chained_gradient() {
    // y = relu(x) * 3，x=2 → dy/dx = 3
    let graph = Graph::new();
    let x = graph.input(2.0).unwrap();
    let y = x.relu() * 3.0;

    y.backward().unwrap();
    assert_eq!(x.grad().unwrap(), 3.0);
}
