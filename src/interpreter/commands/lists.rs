//! Flat list commands: construction, selection, reshaping, higher-order
//! application, the key-value store and coordinates
//!
//! Lists are shared objects, so the update commands (`@`, `⬆`) mutate in
//! place and return the same list; everything else builds a new one.
//! Several glyphs carry both list and string overloads; a string behaves
//! as its character sequence wherever that reading makes sense.

use std::rc::Rc;

use crate::interpreter::commands::{apply1, apply2};
use crate::interpreter::registry::ParamPattern as P;
use crate::interpreter::registry::{cmd, ov, CommandSignature};
use crate::values::{Coordinate, List, Map, Slice, Value};

/// Gather stack values down to (and including) the nearest null marker.
fn gather_to_null(env: &crate::interpreter::environment::Environment) -> Vec<Value> {
    let mut values = Vec::new();
    while env.stack_depth() > 0 {
        let value = env.pop();
        if value.is_absent() {
            break;
        }
        values.push(value);
    }
    values.reverse();
    values
}

pub(crate) fn commands() -> Vec<CommandSignature> {
    vec![
        // Construction
        cmd('‿', "pair", (1, 1, 0, false), vec![
            ov(&[P::List, P::List], "join two lists end to end", |_, _, a| {
                Ok(Some(Value::List(a.list(0)?.concat(&a.list(1)?))))
            }),
            ov(&[P::List, P::Any], "append a value to a list", |_, _, a| {
                Ok(Some(Value::List(a.list(0)?.append(a.value(1)))))
            }),
            ov(&[P::Any, P::Any], "pair two values into a list", |_, _, a| {
                Ok(Some(Value::List(List::pair(&a.value(0), &a.value(1)))))
            }),
        ]),
        cmd('⁔', "extend", (2, 0, 0, false), vec![
            ov(&[P::List, P::List], "add a list as a member", |_, _, a| {
                Ok(Some(Value::List(a.list(0)?.append(a.value(1)))))
            }),
            ov(&[P::List, P::Any], "list append", |_, _, a| {
                Ok(Some(Value::List(a.list(0)?.append(a.value(1)))))
            }),
            ov(&[P::Any, P::List], "list prepend", |_, _, a| {
                Ok(Some(Value::List(a.list(1)?.prepend(a.value(0)))))
            }),
            ov(&[P::Any, P::Any], "pair values into a list", |_, _, a| {
                Ok(Some(Value::List(List::pair(&a.value(0), &a.value(1)))))
            }),
        ]),
        cmd('⏍', "gather", (0, 0, 0, false), vec![ov(
            &[],
            "stack values from the last null into a list",
            |_, env, _| Ok(Some(Value::List(List::new(gather_to_null(env))))),
        )]),
        cmd('☐', "gather n", (0, 1, 0, false), vec![ov(
            &[P::Int],
            "top n stack values into a list",
            |_, env, a| {
                let n = a.num(0)?.max(0) as usize;
                let mut values: Vec<Value> = (0..n).map(|_| env.pop()).collect();
                values.reverse();
                Ok(Some(Value::List(List::new(values))))
            },
        )]),
        cmd('☆', "scatter", (1, 0, 0, false), vec![
            ov(&[P::List], "push each list item onto the stack", |_, env, a| {
                for value in a.list(0)?.dense() {
                    env.push(value);
                }
                Ok(None)
            }),
            ov(&[P::Any], "push the value back", |_, _, a| Ok(Some(a.value(0)))),
        ]),
        cmd('⊟', "enlist", (1, 0, 0, false), vec![
            ov(&[P::Coordinate], "wrap a coordinate into a list", |_, _, a| {
                Ok(Some(Value::List(List::new(vec![a.value(0)]))))
            }),
            ov(&[P::List], "copy a list's slots into a fresh list", |_, _, a| {
                Ok(Some(Value::List(List::new(a.list(0)?.raw()))))
            }),
            ov(&[P::Any], "wrap a value into a list", |_, _, a| {
                Ok(Some(Value::List(List::new(vec![a.value(0)]))))
            }),
        ]),
        cmd('⍳', "iota", (1, 0, 0, false), vec![ov(
            &[P::Int],
            "integers from 1 to n",
            |_, _, a| Ok(Some(Value::List(List::iota(a.num(0)?)))),
        )]),
        cmd('‥', "range", (2, 0, 0, false), vec![ov(
            &[P::Int, P::Int],
            "integers from m to n inclusive",
            |_, _, a| Ok(Some(Value::List(List::int_range(a.num(0)?, a.num(1)?)))),
        )]),
        cmd('⧉', "copies", (2, 0, 0, false), vec![
            ov(&[P::List, P::Int], "cycle a list n times", |_, _, a| {
                Ok(Some(Value::List(List::copies(&a.value(0), a.num(1)?))))
            }),
            ov(&[P::Any, P::Int], "n copies of a value", |_, _, a| {
                Ok(Some(Value::List(List::copies(&a.value(0), a.num(1)?))))
            }),
        ]),
        cmd('ⁿ', "digits", (1, 0, 0, false), vec![
            ov(&[P::Str], "text to a list of code points", |_, _, a| {
                Ok(Some(Value::List(List::codepoints(&a.text(0)?))))
            }),
            ov(&[P::Int], "decimal digits of an integer", |_, _, a| {
                Ok(Some(Value::List(List::digits(a.num(0)?))))
            }),
        ]),
        // Updates
        cmd('@', "replace", (1, 2, 0, false), vec![
            ov(&[P::Map, P::Any, P::Any], "set the value for a key", |_, _, a| {
                let map = a.map(0)?;
                map.set(&a.value(1), a.value(2));
                Ok(Some(Value::Map(map)))
            }),
            ov(&[P::List, P::Any, P::Any], "set list slots by index", |_, _, a| {
                let list = a.list(0)?;
                let value = a.value(2);
                match a.value(1) {
                    Value::Slice(slice) => {
                        list.set_slice(&slice, value);
                    }
                    Value::List(indices) => {
                        for index in indices.raw() {
                            if let Some(ix) = index.int_value() {
                                list.set_at(ix, value.clone());
                            }
                        }
                    }
                    other => {
                        if let Some(ix) = other.int_value() {
                            list.set_at(ix, value);
                        }
                    }
                }
                Ok(Some(Value::List(list)))
            }),
        ]),
        cmd('ⓐ', "replace?", (1, 2, 0, false), vec![ov(
            &[P::List, P::List, P::Any],
            "set list slots marked by a boolean mask",
            |_, _, a| {
                Ok(Some(Value::List(
                    a.list(0)?.set_bool(&a.list(1)?, a.value(2)),
                )))
            },
        )]),
        // Slicing and selection
        cmd('٪', "skip", (1, 1, 0, false), vec![ov(
            &[P::List, P::Int],
            "every nth non-null item",
            |_, _, a| Ok(Some(Value::List(a.list(0)?.skip_every(a.num(1)?)))),
        )]),
        cmd('[', "slice", (1, 3, 0, false), vec![
            ov(
                &[P::List, P::Any, P::Any, P::Any],
                "slice a list [start:stop:step]",
                |_, _, a| {
                    let slice = Slice::new(&a.value(1), &a.value(2), &a.value(3));
                    Ok(Some(Value::List(a.list(0)?.slice(&slice))))
                },
            ),
            ov(
                &[P::Str, P::Any, P::Any, P::Any],
                "slice text [start:stop:step]",
                |_, _, a| {
                    let slice = Slice::new(&a.value(1), &a.value(2), &a.value(3));
                    Ok(Some(Value::Text(slice.slice_string(&a.text(0)?))))
                },
            ),
        ]),
        cmd('{', "make slice", (0, 3, 0, false), vec![ov(
            &[P::Any, P::Any, P::Any],
            "slice object [start:stop:step]",
            |_, _, a| {
                Ok(Some(Value::Slice(Rc::new(Slice::new(
                    &a.value(0),
                    &a.value(1),
                    &a.value(2),
                )))))
            },
        )]),
        cmd('#', "count", (1, 0, 0, false), vec![
            ov(&[P::Str], "text length", |_, _, a| {
                Ok(Some(Value::Number(a.text(0)?.chars().count() as i64)))
            }),
            ov(&[P::Coordinate], "coordinate dimension", |_, _, a| {
                Ok(Some(Value::Number(a.coordinate(0)?.len() as i64)))
            }),
            ov(&[P::List], "non-null length of a list", |_, _, a| {
                Ok(Some(Value::Number(a.list(0)?.count() as i64)))
            }),
        ]),
        cmd('⊕', "join", (2, 0, 0, false), vec![
            ov(&[P::List, P::List], "concatenate lists", |_, _, a| {
                Ok(Some(Value::List(a.list(0)?.concat(&a.list(1)?))))
            }),
            ov(&[P::Str, P::Str], "concatenate text", |_, _, a| {
                Ok(Some(Value::Text(a.text(0)? + &a.text(1)?)))
            }),
            ov(&[P::Null, P::Str], "concatenate to null", |_, _, a| {
                Ok(Some(a.value(1)))
            }),
            ov(&[P::List, P::Str], "join list items with a separator", |_, _, a| {
                Ok(Some(Value::Text(a.list(0)?.join_with(&a.text(1)?))))
            }),
        ]),
        cmd('▭', "flatten", (1, 0, 0, false), vec![ov(
            &[P::List],
            "splice nested lists flat",
            |_, _, a| Ok(Some(Value::List(a.list(0)?.flatten()))),
        )]),
        cmd('↑', "take", (1, 1, 0, false), vec![ov(
            &[P::List, P::Int],
            "first n values",
            |_, _, a| Ok(Some(Value::List(a.list(0)?.take(a.num(1)?)))),
        )]),
        cmd('↓', "drop", (1, 1, 0, false), vec![ov(
            &[P::List, P::Int],
            "all but the first n values",
            |_, _, a| Ok(Some(Value::List(a.list(0)?.drop_first(a.num(1)?)))),
        )]),
        cmd('↗', "sort", (1, 0, 0, false), vec![
            ov(&[P::List], "sort ascending", |_, _, a| {
                Ok(Some(Value::List(a.list(0)?.sorted(false))))
            }),
            ov(&[P::Str], "sort characters ascending", |_, _, a| {
                let mut chars: Vec<char> = a.text(0)?.chars().collect();
                chars.sort_unstable();
                Ok(Some(Value::Text(chars.into_iter().collect())))
            }),
        ]),
        cmd('↘', "r sort", (1, 0, 0, false), vec![
            ov(&[P::List], "sort descending", |_, _, a| {
                Ok(Some(Value::List(a.list(0)?.sorted(true))))
            }),
            ov(&[P::Str], "sort characters descending", |_, _, a| {
                let mut chars: Vec<char> = a.text(0)?.chars().collect();
                chars.sort_unstable_by(|x, y| y.cmp(x));
                Ok(Some(Value::Text(chars.into_iter().collect())))
            }),
        ]),
        cmd('⍋', "grade", (1, 0, 0, false), vec![ov(
            &[P::List],
            "indices in ascending sort order",
            |_, _, a| Ok(Some(Value::List(a.list(0)?.grade(false)))),
        )]),
        cmd('⍒', "r grade", (1, 0, 0, false), vec![ov(
            &[P::List],
            "indices in descending sort order",
            |_, _, a| Ok(Some(Value::List(a.list(0)?.grade(true)))),
        )]),
        cmd('⊃', "select?", (2, 0, 0, false), vec![
            ov(&[P::List, P::List], "select items by boolean mask", |_, _, a| {
                Ok(Some(Value::List(a.list(0)?.select_bool(&a.list(1)?))))
            }),
            ov(&[P::Str, P::List], "select characters by boolean mask", |_, _, a| {
                let text = a.text(0)?;
                let mask = a.list(1)?.raw();
                Ok(Some(Value::Text(
                    text.chars()
                        .zip(mask)
                        .filter(|(_, flag)| flag.truthy())
                        .map(|(ch, _)| ch)
                        .collect(),
                )))
            }),
        ]),
        cmd('⊇', "select", (2, 0, 0, false), vec![
            ov(&[P::Str, P::List], "select characters by indices", |_, _, a| {
                let chars: Vec<char> = a.text(0)?.chars().collect();
                let mut out = String::new();
                for index in a.list(1)?.raw() {
                    if let Some(ix) = index.int_value() {
                        if ix >= 0 && (ix as usize) < chars.len() {
                            out.push(chars[ix as usize]);
                        }
                    }
                }
                Ok(Some(Value::Text(out)))
            }),
            ov(&[P::Map, P::List], "fetch values by a list of keys", |_, _, a| {
                let map = a.map(0)?;
                Ok(Some(Value::List(List::new(
                    a.list(1)?.raw().iter().map(|k| map.fetch(k)).collect(),
                ))))
            }),
            ov(&[P::Map, P::Any], "fetch a value by key", |_, _, a| {
                Ok(Some(a.map(0)?.fetch(&a.value(1))))
            }),
            ov(&[P::List, P::List], "select items by indices", |_, _, a| {
                Ok(Some(Value::List(a.list(0)?.select_indices(&a.list(1)?))))
            }),
            ov(&[P::List, P::Int], "item at an index", |_, _, a| {
                Ok(Some(a.list(0)?.get(a.num(1)?)))
            }),
            ov(&[P::Str, P::Int], "character at an index", |_, _, a| {
                let text = a.text(0)?;
                let ch = text.chars().nth(a.num(1)?.max(0) as usize);
                Ok(Some(match ch {
                    Some(c) => Value::Text(c.to_string()),
                    None => Value::Absent,
                }))
            }),
            ov(&[P::Coordinate, P::Int], "nth dimension of a coordinate", |_, _, a| {
                Ok(Some(match a.coordinate(0)?.get(a.num(1)?) {
                    Some(n) => Value::Number(n),
                    None => Value::Absent,
                }))
            }),
        ]),
        cmd('⊆', "group", (2, 0, 0, false), vec![
            ov(
                &[P::List, P::List],
                "group items by a selector list",
                |_, _, a| {
                    let items = a.list(0)?.raw();
                    let selector = a.list(1)?.raw();
                    Ok(Some(Value::List(group_values(&items, &selector, |bucket| {
                        Value::List(List::new(bucket))
                    }))))
                },
            ),
            ov(
                &[P::Str, P::List],
                "group characters by a selector list",
                |_, _, a| {
                    let items: Vec<Value> = a
                        .text(0)?
                        .chars()
                        .map(|c| Value::Text(c.to_string()))
                        .collect();
                    let selector = a.list(1)?.raw();
                    Ok(Some(Value::List(group_values(&items, &selector, |bucket| {
                        Value::Text(
                            bucket
                                .iter()
                                .map(|v| v.to_string())
                                .collect::<String>(),
                        )
                    }))))
                },
            ),
        ]),
        cmd('∈', "member of?", (2, 0, 0, false), vec![
            ov(&[P::List, P::List], "membership mask in the second list", |_, _, a| {
                Ok(Some(Value::List(
                    a.list(0)?.member_mask(&a.list(1)?.raw()),
                )))
            }),
            ov(&[P::Str, P::Str], "is the text contained in the second?", |_, _, a| {
                Ok(Some(Value::Number(
                    a.text(1)?.contains(&a.text(0)?) as i64,
                )))
            }),
            ov(&[P::Any, P::List], "is the value in the list?", |_, _, a| {
                Ok(Some(Value::Number(
                    a.list(1)?.raw().contains(&a.value(0)) as i64,
                )))
            }),
        ]),
        cmd('⋸', "find all", (2, 0, 0, false), vec![
            ov(&[P::List, P::List], "indices of members of the second list", |_, _, a| {
                Ok(Some(Value::List(
                    a.list(0)?.member_indices(&a.list(1)?.raw()),
                )))
            }),
            ov(&[P::Str, P::Str], "indices of characters found in the second", |_, _, a| {
                let targets: Vec<char> = a.text(1)?.chars().collect();
                Ok(Some(Value::List(List::from_numbers(
                    a.text(0)?
                        .chars()
                        .enumerate()
                        .filter(|(_, ch)| targets.contains(ch))
                        .map(|(i, _)| i as i64)
                        .collect(),
                ))))
            }),
            ov(&[P::List, P::Any], "first index of a value", |_, _, a| {
                let indices = a.list(0)?.member_indices(&[a.value(1)]);
                Ok(indices.raw().first().cloned())
            }),
        ]),
        cmd('∊', "find all?", (2, 0, 0, false), vec![
            ov(&[P::List, P::List], "mask of members of the second list", |_, _, a| {
                Ok(Some(Value::List(
                    a.list(0)?.member_mask(&a.list(1)?.raw()),
                )))
            }),
            ov(&[P::Str, P::Str], "mask of characters found in the second", |_, _, a| {
                let targets: Vec<char> = a.text(1)?.chars().collect();
                Ok(Some(Value::List(List::from_numbers(
                    a.text(0)?
                        .chars()
                        .map(|ch| targets.contains(&ch) as i64)
                        .collect(),
                ))))
            }),
            ov(&[P::List, P::Any], "mask of a single value", |_, _, a| {
                Ok(Some(Value::List(a.list(0)?.member_mask(&[a.value(1)]))))
            }),
        ]),
        cmd('⋥', "bool list", (2, 0, 0, false), vec![
            ov(&[P::List, P::List], "index list to a mask shaped like a template", |_, _, a| {
                let len = a.list(1)?.len() as i64;
                Ok(Some(Value::List(a.list(0)?.bool_mask(len))))
            }),
            ov(&[P::List, P::Int], "index list to a mask of length n", |_, _, a| {
                Ok(Some(Value::List(a.list(0)?.bool_mask(a.num(1)?))))
            }),
        ]),
        cmd('⊒', "indices", (1, 0, 0, false), vec![ov(
            &[P::List],
            "boolean mask to an index list",
            |_, _, a| Ok(Some(Value::List(a.list(0)?.true_indices()))),
        )]),
        cmd('⊐', "first index", (1, 0, 0, false), vec![ov(
            &[P::List],
            "index of the first truthy slot",
            |_, _, a| Ok(a.list(0)?.first_true_index().map(Value::Number)),
        )]),
        cmd('⊏', "classify", (1, 0, 0, false), vec![ov(
            &[P::List],
            "occurrence indices of each unique value",
            |_, _, a| Ok(Some(Value::List(a.list(0)?.classify()))),
        )]),
        cmd('⎅', "reflect", (1, 0, 0, false), vec![
            ov(&[P::List], "reverse a list", |_, _, a| {
                Ok(Some(Value::List(a.list(0)?.reversed())))
            }),
            ov(&[P::Str], "reverse text", |_, _, a| {
                Ok(Some(Value::Text(a.text(0)?.chars().rev().collect())))
            }),
        ]),
        cmd('↦', "shr", (1, 0, 0, false), vec![
            ov(&[P::List], "shift right, filling with 0", |_, _, a| {
                Ok(Some(Value::List(a.list(0)?.shift_right())))
            }),
            ov(&[P::Str], "shift text right one place", |_, _, a| {
                let text = a.text(0)?;
                let mut shifted: String = " ".to_string();
                shifted.extend(text.chars().take(text.chars().count().saturating_sub(1)));
                Ok(Some(Value::Text(shifted)))
            }),
        ]),
        cmd('↤', "shl", (1, 0, 0, false), vec![
            ov(&[P::List], "shift left, filling with 0", |_, _, a| {
                Ok(Some(Value::List(a.list(0)?.shift_left())))
            }),
            ov(&[P::Str], "shift text left one place", |_, _, a| {
                let text = a.text(0)?;
                let mut shifted: String = text.chars().skip(1).collect();
                shifted.push(' ');
                Ok(Some(Value::Text(shifted)))
            }),
        ]),
        // Higher-order application
        cmd('¨', "map", (1, 0, 1, false), vec![
            ov(&[P::List, P::Fn], "map a function over a list", |it, env, a| {
                let f = a.func(1)?;
                let mut out = Vec::new();
                for item in a.list(0)?.raw() {
                    out.push(apply1(it, env, &f, item)?);
                }
                Ok(Some(Value::List(List::new(out))))
            }),
            ov(&[P::Str, P::Fn], "map a function over characters", |it, env, a| {
                let f = a.func(1)?;
                let mut out = Vec::new();
                for item in List::characters(&a.text(0)?).raw() {
                    out.push(apply1(it, env, &f, item)?);
                }
                Ok(Some(Value::List(List::new(out))))
            }),
        ]),
        cmd('}', "filter", (1, 0, 1, false), vec![ov(
            &[P::List, P::Fn],
            "keep values the predicate accepts",
            |it, env, a| {
                let f = a.func(1)?;
                let mut out = Vec::new();
                for item in a.list(0)?.raw() {
                    if apply1(it, env, &f, item.clone())?.truthy() {
                        out.push(item);
                    }
                }
                Ok(Some(Value::List(List::new(out))))
            },
        )]),
        cmd('/', "reduce", (1, 0, 1, false), vec![ov(
            &[P::List, P::Fn],
            "fold the function between values",
            |it, env, a| {
                let f = a.func(1)?;
                let values = a.list(0)?.dense();
                let Some((first, rest)) = values.split_first() else {
                    return Ok(None);
                };
                let mut acc = first.clone();
                for item in rest {
                    acc = apply2(it, env, &f, acc, item.clone())?;
                }
                Ok(Some(acc))
            },
        )]),
        cmd('∖', "scan", (1, 0, 1, false), vec![ov(
            &[P::List, P::Fn],
            "partial results of a fold",
            |it, env, a| {
                let f = a.func(1)?;
                let values = a.list(0)?.dense();
                let mut out = Vec::new();
                let mut acc: Option<Value> = None;
                for item in values {
                    let next = match acc.take() {
                        None => item,
                        Some(prev) => apply2(it, env, &f, prev, item)?,
                    };
                    out.push(next.clone());
                    acc = Some(next);
                }
                Ok(Some(Value::List(List::new(out))))
            },
        )]),
        cmd('⥆', "fold r", (1, 0, 1, false), vec![ov(
            &[P::List, P::Fn],
            "fold from the right",
            |it, env, a| {
                let f = a.func(1)?;
                let values = a.list(0)?.dense();
                let Some((last, rest)) = values.split_last() else {
                    return Ok(None);
                };
                let mut acc = last.clone();
                for item in rest.iter().rev() {
                    acc = apply2(it, env, &f, item.clone(), acc)?;
                }
                Ok(Some(acc))
            },
        )]),
        cmd('⥶', "scan r", (1, 0, 1, false), vec![ov(
            &[P::List, P::Fn],
            "partial results of a right fold",
            |it, env, a| {
                let f = a.func(1)?;
                let values = a.list(0)?.dense();
                let mut out: Vec<Value> = Vec::new();
                let mut acc: Option<Value> = None;
                for item in values.into_iter().rev() {
                    let next = match acc.take() {
                        None => item,
                        Some(prev) => apply2(it, env, &f, item, prev)?,
                    };
                    out.push(next.clone());
                    acc = Some(next);
                }
                out.reverse();
                Ok(Some(Value::List(List::new(out))))
            },
        )]),
        cmd('⊚', "outer product", (2, 0, 1, false), vec![
            ov(
                &[P::List, P::List, P::Fn],
                "table of the function over all pairings",
                |it, env, a| {
                    outer_product(it, env, a.list(0)?, a.list(1)?, &a.func(2)?)
                },
            ),
            ov(
                &[P::Str, P::List, P::Fn],
                "table over characters and items",
                |it, env, a| {
                    outer_product(it, env, List::characters(&a.text(0)?), a.list(1)?, &a.func(2)?)
                },
            ),
            ov(
                &[P::List, P::Str, P::Fn],
                "table over items and characters",
                |it, env, a| {
                    outer_product(it, env, a.list(0)?, List::characters(&a.text(1)?), &a.func(2)?)
                },
            ),
            ov(
                &[P::Str, P::Str, P::Fn],
                "table over characters of both strings",
                |it, env, a| {
                    outer_product(
                        it,
                        env,
                        List::characters(&a.text(0)?),
                        List::characters(&a.text(1)?),
                        &a.func(2)?,
                    )
                },
            ),
        ]),
        // Key-value store
        cmd('Δ', "dictionary", (0, 1, 0, false), vec![ov(
            &[P::Str],
            "create a key-value store bound to a name",
            |_, env, a| {
                let map = Map::new();
                env.assign(&a.text(0)?, Value::Map(map.clone()));
                Ok(Some(Value::Map(map)))
            },
        )]),
        // Coordinates
        cmd('¢', "coordinate", (1, 0, 0, false), vec![ov(
            &[P::List],
            "coordinate from list values",
            |_, _, a| {
                let mut values = Vec::new();
                for v in a.list(0)?.dense() {
                    match v.int_value() {
                        Some(n) => values.push(n),
                        None => {
                            return Err(crate::interpreter::errors::RuntimeError::TypeMismatch {
                                expected: "integer coordinate component",
                                got: v.type_tag().to_string(),
                                span: None,
                            })
                        }
                    }
                }
                Ok(Some(Value::Coordinate(Coordinate::new(values))))
            },
        )]),
        cmd('ɨ', "index list", (1, 0, 0, false), vec![ov(
            &[P::Coordinate],
            "coordinate to a list of values",
            |_, _, a| {
                Ok(Some(Value::List(List::from_numbers(
                    a.coordinate(0)?.values().to_vec(),
                ))))
            },
        )]),
    ]
}

/// Bucket items by the integer selector aligned with them; bucket `i`
/// collects the items whose selector value is `i`.
fn group_values(
    items: &[Value],
    selector: &[Value],
    build: fn(Vec<Value>) -> Value,
) -> List {
    let picks: Vec<i64> = selector
        .iter()
        .map(|v| v.int_value().unwrap_or(-1))
        .collect();
    let buckets = picks.iter().copied().max().unwrap_or(-1) + 1;
    let mut out = Vec::new();
    for bucket in 0..buckets {
        let members: Vec<Value> = items
            .iter()
            .zip(&picks)
            .filter(|(_, pick)| **pick == bucket)
            .map(|(v, _)| v.clone())
            .collect();
        out.push(build(members));
    }
    List::new(out)
}

fn outer_product(
    it: &crate::interpreter::engine::Interpreter,
    env: &crate::interpreter::environment::Environment,
    rows: List,
    cols: List,
    f: &crate::interpreter::closure::Callable,
) -> Result<Option<Value>, crate::interpreter::errors::RuntimeError> {
    let mut table = Vec::new();
    for x in rows.raw() {
        let mut row = Vec::new();
        for y in cols.raw() {
            row.push(apply2(it, env, f, x.clone(), y.clone())?);
        }
        table.push(Value::List(List::new(row)));
    }
    Ok(Some(Value::List(List::new(table))))
}
