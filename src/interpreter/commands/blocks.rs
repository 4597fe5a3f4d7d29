//! Block constructors and invocation
//!
//! `(` runs its block immediately in a fresh child environment; `µ`, `λ`
//! and `κ` defer theirs as closure values (`λ` pulls the implicit loop
//! value as input, `κ` memoises on its input). `⏎` invokes whatever
//! callable is on the stack.

use std::rc::Rc;

use crate::interpreter::closure::{Callable, Closure};
use crate::interpreter::errors::RuntimeError;
use crate::interpreter::registry::ParamPattern as P;
use crate::interpreter::registry::{cmd, ov, Args, CommandSignature};
use crate::parser::ast::SyntaxNode;
use crate::values::Value;

/// Extract the trailing-block body from the gathered argument.
fn block_body(a: &Args, i: usize) -> Result<Rc<[SyntaxNode]>, RuntimeError> {
    match a.func(i)? {
        Callable::Block(block) => Ok(Rc::clone(&block.body)),
        other => Err(RuntimeError::TypeMismatch {
            expected: "block",
            got: format!("{:?}", other),
            span: None,
        }),
    }
}

pub(crate) fn commands() -> Vec<CommandSignature> {
    vec![
        cmd('(', "paren", (0, 0, 0, true), vec![ov(
            &[P::Block],
            "run a block immediately",
            |it, env, a| {
                let closure = Closure::plain(block_body(&a, 0)?);
                it.invoke_closure(env, &closure)?;
                Ok(None)
            },
        )]),
        cmd('λ', "lambda", (0, 0, 0, true), vec![ov(
            &[P::Block],
            "closure over one implicit input",
            |_, _, a| {
                Ok(Some(Value::Function(Callable::Closure(Rc::new(
                    Closure::with_implicit(block_body(&a, 0)?),
                )))))
            },
        )]),
        cmd('µ', "thunk", (0, 0, 0, true), vec![ov(
            &[P::Block],
            "closure taking no inputs",
            |_, _, a| {
                Ok(Some(Value::Function(Callable::Closure(Rc::new(
                    Closure::plain(block_body(&a, 0)?),
                )))))
            },
        )]),
        cmd('κ', "memo", (0, 0, 0, true), vec![ov(
            &[P::Block],
            "memoising closure over one input",
            |_, _, a| {
                Ok(Some(Value::Function(Callable::Closure(Rc::new(
                    Closure::memoising(block_body(&a, 0)?),
                )))))
            },
        )]),
        cmd('⏎', "run", (1, 0, 0, false), vec![ov(
            &[P::Fn],
            "invoke a block or function",
            |it, env, a| {
                it.run_callable(env, &a.func(0)?)?;
                Ok(None)
            },
        )]),
    ]
}
