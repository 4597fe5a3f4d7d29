//! File-backed parameter I/O
//!
//! All four commands delegate to the environment's storage collaborator,
//! keyed by the program name. A missing input file produces nothing rather
//! than failing, so programs can probe for optional inputs.

use crate::interpreter::errors::RuntimeError;
use crate::interpreter::registry::ParamPattern as P;
use crate::interpreter::registry::{cmd, ov, CommandSignature};
use crate::values::{List, Value};

pub(crate) fn commands() -> Vec<CommandSignature> {
    vec![
        cmd('∫', "load", (0, 0, 0, false), vec![ov(
            &[],
            "read the next input line",
            |_, env, _| {
                Ok(env.load_value()?.map(|line| {
                    if line.is_empty() {
                        Value::Absent
                    } else {
                        Value::Text(line)
                    }
                }))
            },
        )]),
        cmd('⨋', "save", (1, 0, 0, false), vec![ov(
            &[P::Any],
            "append a value to the output file",
            |_, env, a| {
                let value = a.value(0);
                let line = if value.is_absent() {
                    String::new()
                } else {
                    value.to_string()
                };
                env.save_value(&line)?;
                Ok(None)
            },
        )]),
        cmd('∮', "load list", (0, 0, 0, false), vec![ov(
            &[],
            "input lines as a list of integers",
            |_, env, _| {
                let Some(lines) = env.file_lines()? else {
                    return Ok(None);
                };
                let mut numbers = Vec::new();
                for line in lines {
                    let n = line.trim().parse::<i64>().map_err(|_| {
                        RuntimeError::Domain {
                            message: format!("input line '{}' is not an integer", line),
                            span: None,
                        }
                    })?;
                    numbers.push(n);
                }
                Ok(Some(Value::List(List::from_numbers(numbers))))
            },
        )]),
        cmd('⨖', "load rows", (0, 0, 0, false), vec![ov(
            &[],
            "input lines as rows of whitespace-split fields",
            |_, env, _| {
                let Some(lines) = env.file_lines()? else {
                    return Ok(None);
                };
                let rows: Vec<Value> = lines
                    .iter()
                    .map(|line| {
                        Value::List(List::new(
                            line.split_whitespace()
                                .map(|field| Value::Text(field.to_string()))
                                .collect(),
                        ))
                    })
                    .collect();
                Ok(Some(Value::List(List::new(rows))))
            },
        )]),
    ]
}
