// File-backed parameter tests, run against a scratch directory.

use std::fs;
use std::path::PathBuf;

use runic::interpreter::engine::Interpreter;
use runic::interpreter::storage::FileStorage;
use runic::parser::ast;
use runic::parser::lexer::tokenize;
use runic::values::Value;

fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("runic-{}-{}", tag, std::process::id()));
    fs::create_dir_all(&dir).expect("cannot create scratch dir");
    dir
}

fn run_in_dir(dir: &PathBuf, source: &str) -> Vec<Value> {
    let interpreter = Interpreter::new();
    let tokens = tokenize(source);
    let forest = ast::build(&tokens, interpreter.registry()).expect("parse failed");
    interpreter
        .run_with_storage(
            &forest,
            vec![Value::Text("t".to_string())],
            Box::new(FileStorage::new(dir.clone())),
        )
        .expect("run failed")
}

#[test]
fn test_save_then_load_round_trip() {
    let dir = scratch_dir("roundtrip");

    // write two lines, then read them back and add them
    run_in_dir(&dir, "42⨋7⨋");
    let stack = run_in_dir(&dir, "∫ℤ∫ℤ+");
    assert_eq!(stack, vec![Value::Number(49)]);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_missing_input_pushes_nothing() {
    let dir = scratch_dir("missing");
    let stack = run_in_dir(&dir, "∫");
    assert!(stack.is_empty());
    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_load_integer_list() {
    let dir = scratch_dir("intlist");
    fs::write(dir.join("t.in"), "3\n1\n4\n").expect("cannot write input");

    let stack = run_in_dir(&dir, "∮/µ+)");
    assert_eq!(stack, vec![Value::Number(8)]);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_load_rows_splits_fields() {
    let dir = scratch_dir("rows");
    fs::write(dir.join("t.in"), "a b\nc d e\n").expect("cannot write input");

    let stack = run_in_dir(&dir, "⨖");
    match &stack[0] {
        Value::List(rows) => {
            let rows = rows.raw();
            assert_eq!(rows.len(), 2);
            match &rows[1] {
                Value::List(fields) => assert_eq!(fields.len(), 3),
                other => panic!("expected a row list, got {:?}", other),
            }
        }
        other => panic!("expected a list of rows, got {:?}", other),
    }

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_first_write_truncates_previous_output() {
    let dir = scratch_dir("truncate");
    fs::write(dir.join("t.out"), "stale\n").expect("cannot write output");

    run_in_dir(&dir, "1⨋2⨋");
    let contents = fs::read_to_string(dir.join("t.out")).expect("cannot read output");
    assert_eq!(contents, "1\n2\n");

    fs::remove_dir_all(&dir).ok();
}
