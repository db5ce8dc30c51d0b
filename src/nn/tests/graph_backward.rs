use crate::nn::{Graph, VarActivationOps};
use approx::assert_abs_diff_eq;

#[test]
fn test_gradient_seed() {
    let graph = Graph::new();
    let a = graph.input(1.0).unwrap();
    let b = graph.input(2.0).unwrap();
    let y = &a + &b;

    let loss = y.backward().unwrap();
    assert_eq!(loss, 3.0);
    // 反向种子：∂out/∂out = 1
    assert_eq!(y.grad().unwrap(), 1.0);
}

#[test]
fn test_additive_accumulation() {
    // x 作为操作数出现在两条路径上，梯度累加而非覆盖：
    // y = x*x + x*2，x=3 → dy/dx = 2*3 + 2 = 8
    let graph = Graph::new();
    let x = graph.input(3.0).unwrap();
    let y = (&x * &x) + (&x * 2.0);

    y.backward().unwrap();
    assert_eq!(y.value().unwrap(), 15.0);
    assert_eq!(x.grad().unwrap(), 8.0);
}

#[test]
fn test_add_mul_grad_check() {
    let graph = Graph::new();
    let a = graph.input(2.5).unwrap();
    let b = graph.input(-3.0).unwrap();

    // f = a * b → ∂f/∂a = b，∂f/∂b = a
    let f = &a * &b;
    assert_eq!(f.value().unwrap(), -7.5);
    f.backward().unwrap();
    assert_eq!(a.grad().unwrap(), b.value().unwrap());
    assert_eq!(b.grad().unwrap(), a.value().unwrap());

    // g = a + b → 两侧梯度均为 1
    graph.zero_grad();
    let g = &a + &b;
    assert_eq!(g.value().unwrap(), -0.5);
    g.backward().unwrap();
    assert_eq!(a.grad().unwrap(), 1.0);
    assert_eq!(b.grad().unwrap(), 1.0);
}

#[test]
fn test_end_to_end_relu_scenario() {
    // c = (1 + 5*a).relu()，a=-4 → 1+5*(-4) = -19 < 0 → c = 0，梯度被门控截断
    let graph = Graph::new();
    let a = graph.input(-4.0).unwrap();
    let b = graph.input(2.0).unwrap();
    let c = (1.0 + &a * 5.0).relu();

    c.backward().unwrap();
    assert_eq!(c.value().unwrap(), 0.0);
    assert_eq!(a.grad().unwrap(), 0.0);
    // b 未参与表达式，梯度保持 0
    assert_eq!(b.grad().unwrap(), 0.0);
}

#[test]
fn test_backward_accumulates_across_calls() {
    // 不清零梯度连续两次 backward：操作数梯度翻倍（累加语义），根的种子仍为 1
    let graph = Graph::new();
    let a = graph.input(2.0).unwrap();
    let b = graph.input(5.0).unwrap();
    let f = &a * &b;

    f.backward().unwrap();
    f.backward().unwrap();
    assert_eq!(a.grad().unwrap(), 10.0);
    assert_eq!(f.grad().unwrap(), 1.0);

    // 清零后重来恢复单份贡献
    graph.zero_grad();
    f.backward().unwrap();
    assert_eq!(a.grad().unwrap(), 5.0);
}

#[test]
fn test_zero_grad_idempotence() {
    let graph = Graph::new();
    let x = graph.input(4.0).unwrap();
    let y = (&x * &x) + &x;
    y.backward().unwrap();
    assert_eq!(x.grad().unwrap(), 9.0);

    graph.zero_grad();
    for node_id in graph.inner().nodes() {
        assert_eq!(graph.inner().get_node_grad(node_id).unwrap(), 0.0);
    }
    // 再次清零仍然全 0
    graph.zero_grad();
    for node_id in graph.inner().nodes() {
        assert_eq!(graph.inner().get_node_grad(node_id).unwrap(), 0.0);
    }
}

#[test]
fn test_backward_rebuild() {
    let graph = Graph::new();
    let x = graph.input(3.0).unwrap();
    let y = &x * &x;

    y.backward().unwrap();
    // x 同时是乘法的两个操作数，两份贡献各 3
    assert_eq!(x.grad().unwrap(), 6.0);

    // 强制重建拓扑序后结果一致
    graph.zero_grad();
    y.backward_rebuild().unwrap();
    assert_eq!(x.grad().unwrap(), 6.0);
}

#[test]
fn test_deep_chain_gradient() {
    // y = ((x + 1) * 2 + x) * x，x=2 → y = (3*2+2)*2 = 16
    // dy/dx = d/dx[(x+1)*2*x + x*x] = 4x + 2 + 2x = 6x + 2 = 14
    let graph = Graph::new();
    let x = graph.input(2.0).unwrap();
    let y = ((&x + 1.0) * 2.0 + &x) * &x;

    let loss = y.backward().unwrap();
    assert_abs_diff_eq!(loss, 16.0, epsilon = 1e-12);
    assert_abs_diff_eq!(x.grad().unwrap(), 14.0, epsilon = 1e-12);
}
