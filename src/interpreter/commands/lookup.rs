//! Parameter, implicit-value and name lookup commands
//!
//! Three address spaces overlap here: program parameters (digits and the
//! ringed glyphs `➊`…`➎`), loop implicit values (`_`, `⍛` and the circled
//! depth glyphs `⓪`…`⑤`), and lexical names (letters, bound with `→` and
//! read with `$`). A missing parameter or implicit value produces nothing
//! at all (the stack is untouched), while a missing lexical name is a
//! fatal unbound-name error.

use crate::interpreter::registry::ParamPattern as P;
use crate::interpreter::registry::{cmd, ov, CommandSignature, CommandFn};
use crate::values::Value;

/// A `()`-arity command pushing program parameter `i`.
fn parameter_command(symbol: char, alias: &'static str, run: CommandFn) -> CommandSignature {
    cmd(symbol, alias, (0, 0, 0, false), vec![ov(&[], alias, run)])
}

/// Drop the absent sentinel so a missing value pushes nothing.
fn present(value: Value) -> Option<Value> {
    if value.is_absent() {
        None
    } else {
        Some(value)
    }
}

pub(crate) fn commands() -> Vec<CommandSignature> {
    vec![
        parameter_command('➊', "p1", |_, env, _| Ok(env.parameter(1))),
        parameter_command('➋', "p2", |_, env, _| Ok(env.parameter(2))),
        parameter_command('➌', "p3", |_, env, _| Ok(env.parameter(3))),
        parameter_command('➍', "p4", |_, env, _| Ok(env.parameter(4))),
        parameter_command('➎', "p5", |_, env, _| Ok(env.parameter(5))),
        parameter_command('⓪', "i0", |_, env, _| Ok(present(env.implicit(0)))),
        parameter_command('①', "i1", |_, env, _| Ok(present(env.implicit(1)))),
        parameter_command('②', "i2", |_, env, _| Ok(present(env.implicit(2)))),
        parameter_command('③', "i3", |_, env, _| Ok(present(env.implicit(3)))),
        parameter_command('④', "i4", |_, env, _| Ok(present(env.implicit(4)))),
        parameter_command('⑤', "i5", |_, env, _| Ok(present(env.implicit(5)))),
        parameter_command('_', "implicit", |_, env, _| Ok(present(env.implicit(0)))),
        parameter_command('⍛', "previous", |_, env, _| {
            Ok(present(env.previous_implicit()))
        }),
        cmd('$', "lookup", (0, 1, 0, false), vec![
            ov(&[P::Str], "look up a name", |_, env, a| {
                let name = a.text(0)?;
                if name.starts_with(|c: char| c.is_ascii_digit()) {
                    let index: usize = name.parse().unwrap_or(usize::MAX);
                    return Ok(env.parameter(index));
                }
                Ok(Some(env.lookup(&name)?))
            }),
            ov(&[P::Int], "look up a program parameter", |_, env, a| {
                Ok(env.parameter(a.num(0)?.max(0) as usize))
            }),
        ]),
        cmd('£', "execute", (0, 1, 0, false), vec![
            ov(&[P::Str], "run the function bound to a name", |it, env, a| {
                let value = env.lookup(&a.text(0)?)?;
                it.run_object(env, &value)?;
                Ok(None)
            }),
            ov(&[P::Int], "run a function passed as a parameter", |it, env, a| {
                if let Some(value) = env.parameter(a.num(0)?.max(0) as usize) {
                    it.run_object(env, &value)?;
                }
                Ok(None)
            }),
        ]),
        cmd('→', "assign", (1, 1, 0, false), vec![ov(
            &[P::Any, P::Str],
            "bind a name to a value or function",
            |_, env, a| {
                env.assign(&a.text(1)?, a.value(0));
                Ok(None)
            },
        )]),
        cmd('⇶', "pin", (0, 1, 0, false), vec![ov(
            &[P::Int],
            "pop n values into positional locals",
            |_, env, a| {
                env.pin(a.num(0)?.max(0) as usize);
                Ok(None)
            },
        )]),
        cmd('⇴', "local", (0, 1, 0, false), vec![ov(
            &[P::Int],
            "read the nth pinned local",
            |_, env, a| Ok(Some(env.local(a.num(0)?))),
        )]),
        parameter_command('⑴', "l1", |_, env, _| Ok(Some(env.local(1)))),
        parameter_command('⑵', "l2", |_, env, _| Ok(Some(env.local(2)))),
        parameter_command('⑶', "l3", |_, env, _| Ok(Some(env.local(3)))),
        parameter_command('⑷', "l4", |_, env, _| Ok(Some(env.local(4)))),
        parameter_command('⑸', "l5", |_, env, _| Ok(Some(env.local(5)))),
    ]
}
