//! Conditional expressions
//!
//! There is no statement-level control flow; conditionals are expressions
//! over deferred arguments. Only the selected branch ever runs, and its
//! result (if any) is left on the stack by the branch itself.

use crate::interpreter::registry::ParamPattern as P;
use crate::interpreter::registry::{cmd, ov, CommandSignature};
use crate::values::Value;

pub(crate) fn commands() -> Vec<CommandSignature> {
    vec![
        cmd('?', "if", (1, 0, 2, false), vec![ov(
            &[P::Any, P::Any, P::Any],
            "if predicate ? true_fn false_fn",
            |it, env, a| {
                let branch = if a.value(0).truthy() {
                    a.value(1)
                } else {
                    a.value(2)
                };
                it.run_object(env, &branch)?;
                Ok(None)
            },
        )]),
        cmd('⁈', "if or null", (1, 0, 1, false), vec![ov(
            &[P::Any, P::Any],
            "if predicate ? true_fn null",
            |it, env, a| {
                if a.value(0).truthy() {
                    it.run_object(env, &a.value(1))?;
                } else {
                    env.push(Value::Absent);
                }
                Ok(None)
            },
        )]),
        cmd('₡', "case", (0, 0, 3, false), vec![ov(
            &[P::Any, P::Any, P::Any],
            "case predicate true_fn else_fn",
            |it, env, a| {
                it.run_object(env, &a.value(0))?;
                let holds = env.pop().truthy();
                let branch = if holds { a.value(1) } else { a.value(2) };
                it.run_object(env, &branch)?;
                Ok(None)
            },
        )]),
        cmd('€', "else", (0, 0, 1, false), vec![ov(
            &[P::Any],
            "else action_fn",
            |it, env, a| {
                it.run_object(env, &a.value(0))?;
                Ok(None)
            },
        )]),
    ]
}
