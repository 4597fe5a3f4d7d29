//! Set-flavored list commands
//!
//! Lists double as sets; these commands keep first-appearance order, so
//! results are deterministic without a separate set type.

use crate::interpreter::registry::ParamPattern as P;
use crate::interpreter::registry::{cmd, ov, CommandSignature};
use crate::values::Value;

pub(crate) fn commands() -> Vec<CommandSignature> {
    vec![
        cmd('⟈', "exclusion", (2, 0, 0, false), vec![
            ov(&[P::List, P::List], "values not in the second list", |_, _, a| {
                Ok(Some(Value::List(a.list(0)?.set_exclude(&a.list(1)?.raw()))))
            }),
            ov(&[P::Str, P::Str], "drop characters found in the second", |_, _, a| {
                let targets: Vec<char> = a.text(1)?.chars().collect();
                Ok(Some(Value::Text(
                    a.text(0)?
                        .chars()
                        .filter(|ch| !targets.contains(ch))
                        .collect(),
                )))
            }),
            ov(&[P::List, P::Any], "values other than the given one", |_, _, a| {
                Ok(Some(Value::List(a.list(0)?.set_exclude(&[a.value(1)]))))
            }),
        ]),
        cmd('∩', "intersection", (2, 0, 0, false), vec![
            ov(&[P::List, P::List], "values also in the second list", |_, _, a| {
                Ok(Some(Value::List(
                    a.list(0)?.set_intersect(&a.list(1)?.raw()),
                )))
            }),
            ov(&[P::Str, P::Str], "keep characters found in the second", |_, _, a| {
                let targets: Vec<char> = a.text(1)?.chars().collect();
                Ok(Some(Value::Text(
                    a.text(0)?
                        .chars()
                        .filter(|ch| targets.contains(ch))
                        .collect(),
                )))
            }),
        ]),
        cmd('∪', "union", (2, 0, 0, false), vec![ov(
            &[P::List, P::List],
            "all values, without repeating the second list's",
            |_, _, a| Ok(Some(Value::List(a.list(0)?.set_union(&a.list(1)?)))),
        )]),
        cmd('ṵ', "unique", (1, 0, 0, false), vec![ov(
            &[P::List],
            "unique values in first-appearance order",
            |_, _, a| Ok(Some(Value::List(a.list(0)?.unique()))),
        )]),
        cmd('⬇', "take one", (1, 0, 0, false), vec![ov(
            &[P::List],
            "remove and produce one value",
            |_, env, a| {
                let list = a.list(0)?;
                let value = list.pop_value();
                env.push(Value::List(list));
                Ok(Some(value))
            },
        )]),
        cmd('⬆', "add", (2, 0, 0, false), vec![ov(
            &[P::List, P::Any],
            "add a value unless already present",
            |_, _, a| Ok(Some(Value::List(a.list(0)?.add_value(a.value(1))))),
        )]),
    ]
}
