//! Text conversion and splitting commands
//!
//! String/list hybrids (reverse, shifts, sorting, joining, membership)
//! live with the list commands; this module holds the purely textual
//! conversions.

use crate::interpreter::errors::RuntimeError;
use crate::interpreter::registry::ParamPattern as P;
use crate::interpreter::registry::{cmd, ov, CommandSignature};
use crate::values::{List, Value};

pub(crate) fn commands() -> Vec<CommandSignature> {
    vec![
        cmd('\'', "str", (1, 0, 0, false), vec![
            ov(&[P::List], "join list elements as text", |_, _, a| {
                Ok(Some(Value::Text(a.list(0)?.stringify(false))))
            }),
            ov(&[P::Null], "null renders empty", |_, _, _| {
                Ok(Some(Value::Text(String::new())))
            }),
            ov(&[P::Any], "convert to text", |_, _, a| {
                Ok(Some(Value::Text(a.value(0).to_string())))
            }),
        ]),
        cmd('¦', "decode", (1, 0, 0, false), vec![
            ov(&[P::List], "code points to text", |_, _, a| {
                Ok(Some(Value::Text(a.list(0)?.stringify(true))))
            }),
            ov(&[P::Int], "code point to character", |_, _, a| {
                let n = a.num(0)?;
                let ch = u32::try_from(n)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or(RuntimeError::Domain {
                        message: format!("{} is not a code point", n),
                        span: None,
                    })?;
                Ok(Some(Value::Text(ch.to_string())))
            }),
        ]),
        cmd('ℤ', "integer", (1, 0, 0, false), vec![
            ov(&[P::Str], "parse text as an integer", |_, _, a| {
                Ok(a.text(0)?.trim().parse::<i64>().ok().map(Value::Number))
            }),
            ov(&[P::Any], "convert to an integer", |_, _, a| {
                Ok(a.value(0).int_value().map(Value::Number))
            }),
        ]),
        cmd('⤲', "split", (2, 0, 0, false), vec![
            ov(&[P::Str, P::Str], "split text on a separator", |_, _, a| {
                let (text, sep) = (a.text(0)?, a.text(1)?);
                if sep.is_empty() {
                    return Err(RuntimeError::Domain {
                        message: "cannot split on an empty separator".to_string(),
                        span: None,
                    });
                }
                Ok(Some(Value::List(List::new(
                    text.split(&sep)
                        .map(|part| Value::Text(part.to_string()))
                        .collect(),
                ))))
            }),
            ov(&[P::List, P::Any], "split a list on separator values", |_, _, a| {
                let separators = match a.value(1) {
                    Value::List(l) => l.raw(),
                    other => vec![other],
                };
                Ok(Some(Value::List(a.list(0)?.split_on(&separators))))
            }),
        ]),
    ]
}
