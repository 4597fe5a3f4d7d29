// Integration tests for the glyph interpreter: whole programs from source
// text to final stack.

use runic::run_program;
use runic::values::{List, Value};

fn run(source: &str) -> Vec<Value> {
    run_program(source, vec![]).expect("run failed")
}

fn run_with(source: &str, parameters: Vec<Value>) -> Vec<Value> {
    run_program(source, parameters).expect("run failed")
}

fn numbers(stack: &[Value]) -> Vec<i64> {
    stack
        .iter()
        .map(|v| v.as_number().unwrap_or_else(|| panic!("not a number: {:?}", v)))
        .collect()
}

fn list_numbers(value: &Value) -> Vec<i64> {
    match value {
        Value::List(l) => numbers(&l.raw()),
        other => panic!("not a list: {:?}", other),
    }
}

#[test]
fn test_word_literal_program() {
    let stack = run("Hello` World`!");
    assert_eq!(stack, vec![Value::Text("Hello World!".to_string())]);
}

#[test]
fn test_simple_arithmetic() {
    // add, negative literals, floor division, multiplication
    assert_eq!(numbers(&run("3,4,5++~10+,~6-2÷2×")), vec![8]);
}

#[test]
fn test_special_maths() {
    // mod, square, integer sqrt, power
    assert_eq!(numbers(&run("125,4%²36√×3÷4*")), vec![16]);
}

#[test]
fn test_comparisons_and_logic() {
    assert_eq!(numbers(&run("3,3=3,2≠+ 4,3⌈+ 5,6≤+ 0¬1¬++ 3,5∧2∨+")), vec![13]);
}

#[test]
fn test_gcd_and_number_theory() {
    assert_eq!(numbers(&run("84,105⨸")), vec![21]);
    assert_eq!(list_numbers(&run("84ℸ")[0]), vec![2, 2, 3, 7]);
    assert_eq!(list_numbers(&run("10𝜋")[0]), vec![2, 3, 5, 7]);
}

#[test]
fn test_binary_conversion_round() {
    assert_eq!(list_numbers(&run("13,6⟘")[0]), vec![0, 0, 1, 1, 0, 1]);
    assert_eq!(numbers(&run("13,6⟘⊤")), vec![13]);
}

#[test]
fn test_immediate_blocks() {
    assert_eq!(numbers(&run("3(4,5+)× (3,4+)5×")), vec![27, 35]);
}

#[test]
fn test_conditional_chooses_deferred_branch() {
    // ‰ takes one stack and one inline argument; ? defers both branches
    assert_eq!(numbers(&run("5‰3?1,0 6‰3?2,5+")), vec![2]);
}

#[test]
fn test_conditional_with_thunk_branches() {
    assert_eq!(numbers(&run("1?µ3)4;0?µ3)4")), vec![3, 4]);
}

#[test]
fn test_case_chain() {
    assert_eq!(numbers(&run("₡1,1₡0,2₡0,3€4")), vec![1]);
    assert_eq!(numbers(&run("₡0,1₡1,2₡1,3€4")), vec![2]);
    assert_eq!(numbers(&run("₡0,1₡0,2₡1,3€4")), vec![3]);
    assert_eq!(numbers(&run("₡0,1₡0,2₡0,3€4")), vec![4]);
}

#[test]
fn test_case_with_predicate_blocks() {
    assert_eq!(numbers(&run("4₡µ∂2<)µ1)₡µ∂4<)µ2)₡µ∂6<)µ3)€µ4)⍮◌")), vec![3]);
}

#[test]
fn test_stack_shuffles() {
    assert_eq!(numbers(&run("1,2««")), vec![1, 2]);
    assert_eq!(numbers(&run("5∂◌")), vec![5]);
    assert_eq!(numbers(&run("1,2,3®")), vec![2, 3, 1]);
    assert_eq!(numbers(&run("1,2⨩")), vec![1, 2, 1]);
    assert_eq!(numbers(&run("1,2ḋ")), vec![1, 1, 2]);
    assert_eq!(numbers(&run("1,2ð")), vec![1, 2, 1, 2]);
    assert_eq!(numbers(&run("10,20,30⫤2")), vec![10, 20, 30, 10]);
}

#[test]
fn test_loops_ascending_and_descending() {
    assert_eq!(numbers(&run("3:_")), vec![1, 2, 3]);
    assert_eq!(numbers(&run("~3:_")), vec![3, 2, 1]);
    assert_eq!(numbers(&run_with("$1:_;$1~:_", vec![Value::Number(3)])), vec![
        1, 2, 3, 3, 2, 1
    ]);
}

#[test]
fn test_loop_accumulation() {
    assert_eq!(numbers(&run("0,5:_+")), vec![15]);
    assert_eq!(
        numbers(&run_with("1$1:_2×1-×", vec![Value::Number(5)])),
        vec![945]
    );
}

#[test]
fn test_nested_loops() {
    assert_eq!(
        numbers(&run("3:_3:∂_×«;◌")),
        vec![1, 2, 3, 2, 4, 6, 3, 6, 9]
    );
}

#[test]
fn test_loop_over_text_and_lists() {
    let stack = run_with("hello:_; $1:_", vec![Value::Text("help".to_string())]);
    let letters: Vec<String> = stack.iter().map(|v| v.to_string()).collect();
    assert_eq!(letters, vec!["h", "e", "l", "l", "o", "h", "e", "l", "p"]);

    assert_eq!(
        numbers(&run("Ø3,1,4,1,5,9⏍:_;3⍳:_")),
        vec![3, 1, 4, 1, 5, 9, 1, 2, 3]
    );
}

#[test]
fn test_loop_over_slice_progression() {
    assert_eq!(numbers(&run("{3,11,2:_")), vec![3, 5, 7, 9]);
}

#[test]
fn test_general_for_loop() {
    assert_eq!(numbers(&run("Ω2,9,3:_2×1+")), vec![5, 11, 17]);
    assert_eq!(numbers(&run("Ωµ2)λ9≤)λ3+):_2×1+")), vec![5, 11, 17]);
}

#[test]
fn test_general_loop_computes_gcd() {
    assert_eq!(numbers(&run("945,285Ω1λ0≠)µ∂®«%∂):;◌")), vec![15]);
}

#[test]
fn test_break_stops_after_current_pass() {
    // push values below 3, then exit when the loop variable reaches 3
    assert_eq!(numbers(&run("5:_3=?µ⌁)µ_)")), vec![1, 2]);
}

#[test]
fn test_previous_implicit_value() {
    // each pass adds the previous loop value (null coerces to 0) to the
    // current one
    assert_eq!(numbers(&run("5:_⍛+")), vec![1, 3, 5, 7, 9]);
}

#[test]
fn test_outer_loop_back_reference() {
    assert_eq!(numbers(&run("2:3:①")), vec![1, 1, 1, 2, 2, 2]);
}

#[test]
fn test_assignment_and_lookup() {
    assert_eq!(numbers(&run("5→a$a$a+")), vec![10]);
    assert_eq!(
        numbers(&run("5:_→a,5:_→b,($a$b+)")),
        vec![
            2, 3, 4, 5, 6, 3, 4, 5, 6, 7, 4, 5, 6, 7, 8, 5, 6, 7, 8, 9, 6, 7, 8, 9, 10
        ]
    );
}

#[test]
fn test_unbound_name_is_fatal() {
    assert!(run_program("$missing", vec![]).is_err());
}

#[test]
fn test_program_parameters() {
    assert_eq!(
        numbers(&run_with(
            "$1$2+$3",
            vec![Value::Number(1), Value::Number(2), Value::Number(3)]
        )),
        vec![3, 3]
    );

    // parameters arrive pre-coerced: text numbers add, lists iterate,
    // nulls coerce to zero
    assert_eq!(
        numbers(&run_with(
            "1$1+ $2:_+; $3+ $4",
            vec![
                Value::Text("1".to_string()),
                Value::List(List::from_numbers(vec![5, 10])),
                Value::Absent,
                Value::Number(0),
            ]
        )),
        vec![17, 0]
    );
}

#[test]
fn test_ringed_parameter_glyphs() {
    assert_eq!(
        numbers(&run_with("➊➋+", vec![Value::Number(29), Value::Number(31)])),
        vec![60]
    );
}

#[test]
fn test_pinned_locals() {
    assert_eq!(numbers(&run("10,20,30⇶3⑵")), vec![20]);
    assert_eq!(numbers(&run("10,20,30⇶3⇴3")), vec![30]);
}

#[test]
fn test_list_construction() {
    assert_eq!(numbers(&run("1‿2‿3‿4‿5:_")), vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_pair_with_inline_lists() {
    assert_eq!(
        list_numbers(&run("2‿(3⍳)‿(3⍳)‿2")[0]),
        vec![2, 1, 2, 3, 1, 2, 3, 2]
    );
}

#[test]
fn test_gather_and_scatter() {
    assert_eq!(numbers(&run("3,4,0Ø1,2,3,4⏍:_+")), vec![3, 4, 10]);
    assert_eq!(numbers(&run("1,2,3,4⏍↓1#")), vec![3]);
    assert_eq!(numbers(&run("3⍳☆")), vec![1, 2, 3]);
    assert_eq!(list_numbers(&run("104,105☐2")[0]), vec![104, 105]);
}

#[test]
fn test_list_joins_and_digits() {
    assert_eq!(list_numbers(&run("3⍳Ø4,5,6⏍⊕")[0]), vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(
        list_numbers(&run("123ⁿ bobⁿ ⊕")[0]),
        vec![1, 2, 3, 98, 111, 98]
    );
}

#[test]
fn test_list_shifts() {
    assert_eq!(list_numbers(&run("3⍳↦ 3⍳↤⊕")[0]), vec![0, 1, 2, 2, 3, 0]);
}

#[test]
fn test_set_operations() {
    assert_eq!(
        list_numbers(&run("5⍳Ø4,2,4⏍⟈ Ø4,2,4⏍3⍳∩ ⊕")[0]),
        vec![1, 3, 5, 2]
    );
    assert_eq!(
        list_numbers(&run("1‿2‿3,2‿3‿4∩1‿2‿3,2‿3‿4∪⊕3‿3‿2‿2‿3‿1ṵ⊕")[0]),
        vec![2, 3, 1, 2, 3, 4, 3, 2, 1]
    );
}

#[test]
fn test_take_drop_and_copies() {
    assert_eq!(list_numbers(&run("5⍳ ↑4 ↓2")[0]), vec![3, 4]);

    let stack = run("5,3⧉ hi2⧉ ⊕");
    let rendered: Vec<String> = match &stack[0] {
        Value::List(l) => l.raw().iter().map(|v| v.to_string()).collect(),
        other => panic!("not a list: {:?}", other),
    };
    assert_eq!(rendered, vec!["5", "5", "5", "hi", "hi"]);
}

#[test]
fn test_sorting_and_grading() {
    assert_eq!(
        list_numbers(&run("5‿2‿3‿1‿4‿0↗∂↘⊕")[0]),
        vec![0, 1, 2, 3, 4, 5, 5, 4, 3, 2, 1, 0]
    );
    assert_eq!(
        list_numbers(&run("5‿3‿2‿6‿0‿1∂⍋«⍒⊕")[0]),
        vec![4, 5, 2, 1, 0, 3, 3, 0, 1, 2, 5, 4]
    );
}

#[test]
fn test_updates_in_place() {
    // setting a slot to null hides it from the dense view
    let stack = run("3⍳@1Ø");
    match &stack[0] {
        Value::List(l) => {
            assert_eq!(l.raw().len(), 3);
            assert_eq!(numbers(&l.dense()), vec![1, 3]);
        }
        other => panic!("not a list: {:?}", other),
    }

    assert_eq!(
        list_numbers(&run("Ø3,1,4,1,5,9⏍@{2,4Ø9")[0]),
        vec![3, 1, 9, 9, 5, 9]
    );
    assert_eq!(
        list_numbers(&run("Ø3,1,4,1,5,9⏍@2,1@{4,6Ø1")[0]),
        vec![3, 1, 1, 1, 1, 1]
    );
}

#[test]
fn test_list_slicing() {
    assert_eq!(numbers(&run("9⍳[2Ø3:_2×1+")), vec![7, 13, 19]);
    assert_eq!(list_numbers(&run("Ø3,1,4,1,5,9⏍[1Ø2")[0]), vec![1, 1, 9]);
}

#[test]
fn test_selection_by_index_and_mask() {
    assert_eq!(numbers(&run("Ø3,1,4,1,5,9⏍∂2⊇«5⊇")), vec![4, 9]);

    let stack = run("5‿3‿2‿6‿0‿1,0‿0‿1‿1‿0‿1⊃:_;Hello0‿0‿1‿1‿0⊃");
    assert_eq!(stack.len(), 4);
    assert_eq!(numbers(&stack[..3]), vec![2, 6, 1]);
    assert_eq!(stack[3], Value::Text("ll".to_string()));

    let stack = run("5‿3‿2‿6‿0‿1∂3⊇«2‿3⊇Hellopr«⊇");
    assert_eq!(stack, vec![Value::Number(6), Value::Text("lr".to_string())]);
}

#[test]
fn test_grouping() {
    let stack = run("5‿3‿2‿6‿0‿1,0‿1‿0‿1‿0‿2⊆");
    match &stack[0] {
        Value::List(groups) => {
            let raw = groups.raw();
            assert_eq!(list_numbers(&raw[0]), vec![5, 2, 0]);
            assert_eq!(list_numbers(&raw[1]), vec![3, 6]);
            assert_eq!(list_numbers(&raw[2]), vec![1]);
        }
        other => panic!("not a list: {:?}", other),
    }

    let stack = run("splunk0‿1‿0‿1‿0‿2⊆");
    let rendered: Vec<String> = match &stack[0] {
        Value::List(l) => l.raw().iter().map(|v| v.to_string()).collect(),
        other => panic!("not a list: {:?}", other),
    };
    assert_eq!(rendered, vec!["sln", "pu", "k"]);
}

#[test]
fn test_membership() {
    assert_eq!(
        numbers(&run("3,5‿3‿2‿6‿0‿1∈9,5‿3‿2‿6‿0‿1∈5‿7‿3‿2,5‿3‿2‿6‿0‿1∈:_")),
        vec![1, 0, 1, 0, 1, 1]
    );
    assert_eq!(numbers(&run("vera,severality∈, very,severality∈")), vec![1, 0]);
}

#[test]
fn test_find_indices() {
    assert_eq!(
        numbers(&run("5‿3‿2‿6‿0‿1→a $a6⋸ $a9⋸ $a2‿1‿7⋸:_; hello,elx⋸:_")),
        vec![3, 2, 5, 1, 2, 3]
    );
}

#[test]
fn test_index_mask_conversions() {
    assert_eq!(
        numbers(&run("2‿6‿3,8⋥:_; 0‿0‿1‿1‿1⊒:_; 0‿0‿1‿1‿1⊐")),
        vec![0, 0, 1, 1, 0, 0, 1, 0, 2, 3, 4, 2]
    );
}

#[test]
fn test_key_value_store() {
    assert_eq!(
        list_numbers(&run("Δa@1,2@2,3@3,4@4,5,2‿3‿4⊇")[0]),
        vec![3, 4, 5]
    );
}

#[test]
fn test_coordinates() {
    // (1 2)+(3 4) = (4 6); doubled, its grid length is 20; its
    // components then come back as a list
    let stack = run("1‿2¢3‿4¢+∂2×±«ɨ:_");
    assert_eq!(numbers(&stack), vec![20, 4, 6]);
}

#[test]
fn test_higher_order_map_filter_reduce() {
    assert_eq!(list_numbers(&run("Ø1,2,3,4⏍¨µ²)")[0]), vec![1, 4, 9, 16]);
    assert_eq!(list_numbers(&run("5⍳}µ2‱)")[0]), vec![2, 4]);
    assert_eq!(numbers(&run("5⍳/µ+)")), vec![15]);
    assert_eq!(list_numbers(&run("4⍳∖µ+)")[0]), vec![1, 3, 6, 10]);
    assert_eq!(numbers(&run("Ø2,3,4⏍⥆µ-)")), vec![3]);
}

#[test]
fn test_implicit_elementwise_maps() {
    assert_eq!(list_numbers(&run("Ø1,2,3,4⏍²")[0]), vec![1, 4, 9, 16]);
    assert_eq!(list_numbers(&run("Ø1,2,3,4⏍!")[0]), vec![1, 2, 6, 24]);
}

#[test]
fn test_elementwise_binary_broadcasting() {
    assert_eq!(
        list_numbers(&run("Ø1,2,3,4⏍Ø4,1,7,~8⏍⌈")[0]),
        vec![4, 2, 7, 4]
    );
    assert_eq!(
        list_numbers(&run("Ø1,2,3,4⏍Ø4,1,7,~8⏍µ×)⏎")[0]),
        vec![4, 2, 21, -32]
    );
    assert_eq!(list_numbers(&run("Ø1,2,3⏍10+")[0]), vec![11, 12, 13]);
}

#[test]
fn test_outer_product() {
    assert_eq!(
        list_numbers(&run("Ø1,2,3⏍Ø3,4,5⏍⊚×▭")[0]),
        vec![3, 4, 5, 6, 8, 10, 9, 12, 15]
    );
}

#[test]
fn test_string_operations() {
    assert_eq!(run("Hello#"), vec![Value::Number(5)]);
    assert_eq!(run("hello⎅"), vec![Value::Text("olleh".to_string())]);
    assert_eq!(run("bca↗"), vec![Value::Text("abc".to_string())]);
    assert_eq!(run("42'ℤ"), vec![Value::Number(42)]);
    assert_eq!(run("104,105☐2¦"), vec![Value::Text("hi".to_string())]);
    assert_eq!(run("Hello[1,4Ø"), vec![Value::Text("ell".to_string())]);
    assert_eq!(run("ab3×"), vec![Value::Text("ababab".to_string())]);

    let stack = run("hello,l⤲");
    let parts: Vec<String> = match &stack[0] {
        Value::List(l) => l.raw().iter().map(|v| v.to_string()).collect(),
        other => panic!("not a list: {:?}", other),
    };
    assert_eq!(parts, vec!["he", "", "o"]);
}

#[test]
fn test_overload_fallback_in_declared_order() {
    // null coerces into the numeric overload
    assert_eq!(numbers(&run("0,5+")), vec![5]);
    assert_eq!(numbers(&run("Ø5+")), vec![5]);
    // but falls through to the null overload for non-numeric operands
    assert_eq!(run("Øhello+"), vec![Value::Text("hello".to_string())]);
}

#[test]
fn test_dispatch_is_deterministic_across_runs() {
    for _ in 0..3 {
        assert_eq!(numbers(&run("3,4+")), vec![7]);
        assert_eq!(run("Øhello+"), vec![Value::Text("hello".to_string())]);
    }
}

#[test]
fn test_no_matching_overload_is_fatal() {
    let result = run_program("hello,3-", vec![]);
    match result {
        Err(runic::Error::Runtime(e)) => {
            let message = e.to_string();
            assert!(message.contains('-'), "message was: {}", message);
            assert!(message.contains("Text"), "message was: {}", message);
        }
        other => panic!("expected a dispatch failure, got {:?}", other),
    }
}

#[test]
fn test_stack_underflow_yields_null() {
    // popping an empty stack feeds the null overload of +
    assert_eq!(numbers(&run("5+")), vec![5]);
}
