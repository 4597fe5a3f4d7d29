//! Stack shuffling commands
//!
//! Every shuffle is a fixed pop/push sequence over the shared stack; the
//! pops happen in the dispatcher (stack arity), the pushes in the
//! environment primitives. None of these inspect their values.

use crate::interpreter::registry::ParamPattern as P;
use crate::interpreter::registry::{cmd, ov, CommandSignature};

pub(crate) fn commands() -> Vec<CommandSignature> {
    vec![
        cmd('◌', "drop", (1, 0, 0, false), vec![ov(
            &[P::Any],
            "discard the top stack value",
            |_, _, _| Ok(None),
        )]),
        cmd('⊢', "identity", (1, 0, 0, false), vec![ov(
            &[P::Any],
            "use the top stack value",
            |_, _, a| Ok(Some(a.value(0))),
        )]),
        cmd('⊣', "left", (2, 0, 0, false), vec![ov(
            &[P::Any, P::Any],
            "use the second stack value",
            |_, env, a| {
                env.push(a.value(1));
                Ok(Some(a.value(0)))
            },
        )]),
        cmd('⊩', "copy", (1, 0, 0, false), vec![ov(
            &[P::Any],
            "use and retain the top stack value",
            |_, env, a| {
                env.push(a.value(0));
                Ok(Some(a.value(0)))
            },
        )]),
        cmd('⫣', "copy left", (2, 0, 0, false), vec![ov(
            &[P::Any, P::Any],
            "use and retain the second stack value",
            |_, env, a| {
                env.push(a.value(0));
                env.push(a.value(1));
                Ok(Some(a.value(0)))
            },
        )]),
        cmd('⫤', "deep", (0, 1, 0, false), vec![ov(
            &[P::Int],
            "copy the stack value n below the top",
            |_, env, a| {
                env.deep(a.num(0)?);
                Ok(None)
            },
        )]),
        cmd('∂', "dup", (1, 0, 0, false), vec![ov(
            &[P::Any],
            "duplicate top stack value a -> aa",
            |_, env, a| {
                env.dup(a.value(0));
                Ok(None)
            },
        )]),
        cmd('ð', "dup2", (2, 0, 0, false), vec![ov(
            &[P::Any, P::Any],
            "duplicate top two stack values ab -> abab",
            |_, env, a| {
                env.dup2(a.value(0), a.value(1));
                Ok(None)
            },
        )]),
        cmd('«', "swap", (2, 0, 0, false), vec![ov(
            &[P::Any, P::Any],
            "swap top two stack values ab -> ba",
            |_, env, a| {
                env.swap(a.value(0), a.value(1));
                Ok(None)
            },
        )]),
        cmd('⨩', "under", (2, 0, 0, false), vec![ov(
            &[P::Any, P::Any],
            "copy second stack value to the top ab -> aba",
            |_, env, a| {
                env.under(a.value(0), a.value(1));
                Ok(None)
            },
        )]),
        cmd('ḋ', "dup under", (2, 0, 0, false), vec![ov(
            &[P::Any, P::Any],
            "duplicate second stack value in place ab -> aab",
            |_, env, a| {
                env.dup_under(a.value(0), a.value(1));
                Ok(None)
            },
        )]),
        cmd('®', "rot", (3, 0, 0, false), vec![ov(
            &[P::Any, P::Any, P::Any],
            "rotate top three stack values abc -> bca",
            |_, env, a| {
                env.rotate3(a.value(0), a.value(1), a.value(2));
                Ok(None)
            },
        )]),
    ]
}
