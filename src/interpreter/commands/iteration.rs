//! Loop construction and exit
//!
//! `Ω` builds an iterator value from three init/while/update parts (fixed
//! numbers or deferred functions); `:` starts one over its trailing block,
//! accepting anything iterable in place of a ready-made iterator. `⌁`
//! requests exit from the innermost enclosing loop.

use std::cell::RefCell;
use std::rc::Rc;

use crate::interpreter::iterator::Iter;
use crate::interpreter::registry::ParamPattern as P;
use crate::interpreter::registry::{cmd, ov, CommandSignature};
use crate::values::Value;

pub(crate) fn commands() -> Vec<CommandSignature> {
    vec![
        cmd('Ω', "for", (0, 3, 0, false), vec![ov(
            &[P::Any, P::Any, P::Any],
            "iterator from init, while and update parts",
            |_, _, a| {
                let iter = Iter::general(a.value(0), a.value(1), a.value(2));
                Ok(Some(Value::Iterator(Rc::new(RefCell::new(iter)))))
            },
        )]),
        cmd(':', "iterate", (1, 0, 0, true), vec![
            ov(&[P::Iterator, P::Block], "run an iterator over the block", |it, env, a| {
                let body = a.func(1)?;
                let iter = match a.value(0) {
                    Value::Iterator(iter) => iter,
                    other => Rc::new(RefCell::new(Iter::from_value(&other))),
                };
                it.run_iterator(env, iter, &body)?;
                Ok(None)
            }),
            ov(&[P::Any, P::Block], "iterate over a value's items", |it, env, a| {
                let body = a.func(1)?;
                let iter = Rc::new(RefCell::new(Iter::from_value(&a.value(0))));
                it.run_iterator(env, iter, &body)?;
                Ok(None)
            }),
        ]),
        cmd('⌁', "break", (0, 0, 0, false), vec![ov(
            &[],
            "stop the innermost loop after this pass",
            |_, env, _| {
                env.exit_iteration();
                Ok(None)
            },
        )]),
    ]
}
