// Combinator, closure and memoisation tests: the deferred-execution layer.

use runic::run_program;
use runic::values::Value;

fn run(source: &str) -> Vec<Value> {
    run_program(source, vec![]).expect("run failed")
}

fn numbers(stack: &[Value]) -> Vec<i64> {
    stack
        .iter()
        .map(|v| v.as_number().unwrap_or_else(|| panic!("not a number: {:?}", v)))
        .collect()
}

fn top(stack: &[Value]) -> i64 {
    stack
        .last()
        .and_then(|v| v.as_number())
        .expect("empty or non-numeric stack top")
}

#[test]
fn test_identity_behaves_as_direct_invocation() {
    assert_eq!(numbers(&run("3ℐµ1+)")), numbers(&run("3,1+")));
}

#[test]
fn test_constant_combinator() {
    assert_eq!(numbers(&run("7𝒦9")), vec![9]);
}

#[test]
fn test_join_uses_its_input_twice() {
    // f(x, x) with multiply: 3 → 9
    assert_eq!(numbers(&run("3𝒲µ×)")), vec![9]);
}

#[test]
fn test_join_with_unary_body_keeps_the_copy() {
    // the body consumes one of the two copies; the other stays below
    assert_eq!(top(&run("3𝒲µ2×)")), 6);
}

#[test]
fn test_flip_reverses_operands() {
    assert_eq!(numbers(&run("2,8𝒞µ-)")), vec![6]);
    assert_eq!(numbers(&run("2,8µ-)⏎")), vec![-6]);
}

#[test]
fn test_compose_applies_right_function_first() {
    // f(g(x)): double then increment
    assert_eq!(numbers(&run("5∘µ1+)µ2×)")), vec![11]);
    // and the other way round
    assert_eq!(numbers(&run("5∘µ2×)µ1+)")), vec![12]);
}

#[test]
fn test_starling_variants() {
    // 𝒮: f(x, g(x)); 𝔰: f(g(x), x)
    assert_eq!(numbers(&run("5𝒮µ-)µ²)")), vec![-20]);
    assert_eq!(numbers(&run("5𝔰µ-)µ²)")), vec![20]);
}

#[test]
fn test_on_combinator_processes_both_inputs() {
    // f(g(x), g(y)) = 2² + 3²
    assert_eq!(numbers(&run("2,3𝚿µ+)µ²)")), vec![13]);
}

#[test]
fn test_forks() {
    // 𝒟: f(g(x), h(y)) = 2² + 3! = 10
    assert_eq!(numbers(&run("2,3𝒟µ+)µ²)µ!)")), vec![10]);
    // 𝚽: f(g(x), h(x)) = 5² + (5+1) = 31
    assert_eq!(numbers(&run("5𝚽µ+)µ²)µ⩓)")), vec![31]);
    // 𝛗: f(g(x,y), h(x,y)) = (2×3) + (2-3) = 5
    assert_eq!(numbers(&run("2,3𝛗µ+)µ×)µ-)")), vec![5]);
}

#[test]
fn test_bind_fixes_one_operand() {
    assert_eq!(numbers(&run("10⊸5µ-)⏎")), vec![-5]);
    assert_eq!(numbers(&run("10⟜5µ-)⏎")), vec![5]);
}

#[test]
fn test_dip_runs_under_the_top() {
    assert_eq!(numbers(&run("1,2,3⍮µ+)")), vec![3, 3]);
}

#[test]
fn test_repeat_applies_n_times() {
    assert_eq!(numbers(&run("5,3…µ2×)")), vec![40]);
}

#[test]
fn test_repeat_until_predicate_holds() {
    assert_eq!(numbers(&run("5⍣µ2×)µ∂40=)")), vec![40]);
}

#[test]
fn test_deferred_block_runs_later() {
    // ⩣ wraps the deferred × so ⏎ can run it after more values arrive
    assert_eq!(numbers(&run("⩣×→f6,7$f⏎")), vec![42]);
}

#[test]
fn test_named_closure_orders_a_pair() {
    assert_eq!(
        numbers(&run("µð>?µ⊢)µ«))→a945,285$a⏎;285,945$a⏎")),
        vec![945, 285, 945, 285]
    );
}

#[test]
fn test_closures_see_loop_state_at_invocation() {
    // closures bound in loops read the current implicit value when run
    assert_eq!(numbers(&run("3:_→n($n2×)")), vec![2, 4, 6]);
}

#[test]
fn test_memoised_closure_runs_its_body_once() {
    // the body squares its input and bumps an invocation counter kept in
    // a key-value store (the shared mutable cell of the language); the
    // cached second call must leave the counter at 1
    let source = "Δc@0,0◌κ²$c@0($c0⊇⩓)◌)→f4$f⏎4$f⏎$c0⊇";
    assert_eq!(numbers(&run(source)), vec![16, 16, 1]);
}

#[test]
fn test_memoised_closure_distinguishes_inputs() {
    let source = "Δc@0,0◌κ²$c@0($c0⊇⩓)◌)→f4$f⏎3$f⏎4$f⏎$c0⊇";
    assert_eq!(numbers(&run(source)), vec![16, 9, 16, 2]);
}

#[test]
fn test_lambda_closure_pulls_the_implicit_input() {
    // λ inside a loop squares the loop value without touching the stack
    assert_eq!(numbers(&run("λ²)→f3:$f⏎")), vec![1, 4, 9]);
}

#[test]
fn test_iterator_visits_every_value_exactly_once() {
    assert_eq!(numbers(&run("6:_")), vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(numbers(&run("~6:_")), vec![6, 5, 4, 3, 2, 1]);
}

#[test]
fn test_exit_request_yields_a_strict_prefix() {
    let stack = numbers(&run("9:_5=?µ⌁)µ_)"));
    assert_eq!(stack, vec![1, 2, 3, 4]);
    assert!(!stack.is_empty());
    assert_ne!(stack.len(), 9);
}

#[test]
fn test_swap_twice_restores_order() {
    assert_eq!(numbers(&run("1,2««")), vec![1, 2]);
    assert_eq!(
        run("ab3,««"),
        vec![Value::Text("ab".to_string()), Value::Number(3)]
    );
}

#[test]
fn test_dup_then_drop_is_identity() {
    assert_eq!(numbers(&run("5∂◌")), vec![5]);
}
