//! Combinators: point-free function composition over the stack
//!
//! Each combinator is a fixed stack-rewriting sequence over invoke, push
//! and pop; no combinator inspects values. Reading guide, with the stack
//! left of the glyph:
//!
//! ```text
//! x ℐ f      -> f(x)            identity
//! x 𝒲 f      -> f(x, x)         join (self-duplicate)
//! x y 𝒞 f    -> f(y, x)         flip
//! x ∘ f g    -> f(g(x))         compose
//! x 𝒮 f g    -> f(x, g(x))
//! x 𝔰 f g    -> f(g(x), x)
//! x y 𝚿 f g  -> f(g(x), g(y))   on
//! x y 𝒟 f g h-> f(g(x), h(y))   fork over two inputs
//! x 𝚽 f g h  -> f(g(x), h(x))   fork over one input
//! x y 𝛗 f g h-> f(g(x,y), h(x,y))
//! ```
//!
//! `⊸`/`⟜` build partial applications, `⍮` runs a function under the top
//! value, and `…`/`⍣` iterate a callable a fixed count or until a
//! predicate holds.

use std::rc::Rc;

use crate::interpreter::closure::{BindSide, Bound, Callable, Closure};
use crate::interpreter::registry::ParamPattern as P;
use crate::interpreter::registry::{cmd, ov, CommandSignature};
use crate::values::Value;

pub(crate) fn commands() -> Vec<CommandSignature> {
    vec![
        cmd('ℐ', "identity", (0, 0, 1, false), vec![ov(
            &[P::Fn],
            "apply the function unchanged",
            |it, env, a| {
                it.run_callable(env, &a.func(0)?)?;
                Ok(Some(env.pop()))
            },
        )]),
        cmd('𝒦', "constant", (1, 1, 0, false), vec![ov(
            &[P::Any, P::Any],
            "discard the input, produce the constant",
            |_, _, a| Ok(Some(a.value(1))),
        )]),
        cmd('𝒲', "join combinator", (0, 0, 1, false), vec![ov(
            &[P::Fn],
            "use the input twice: x -> f(x, x)",
            |it, env, a| {
                env.push(env.peek());
                it.run_callable(env, &a.func(0)?)?;
                Ok(Some(env.pop()))
            },
        )]),
        cmd('𝒞', "flip combinator", (0, 0, 1, false), vec![ov(
            &[P::Fn],
            "reverse the inputs: x y -> f(y, x)",
            |it, env, a| {
                let y = env.pop();
                let x = env.pop();
                env.push(y);
                env.push(x);
                it.run_callable(env, &a.func(0)?)?;
                Ok(Some(env.pop()))
            },
        )]),
        cmd('∘', "compose", (0, 0, 2, false), vec![ov(
            &[P::Fn, P::Fn],
            "apply one function to the other's result: x -> f(g(x))",
            |it, env, a| {
                it.run_callable(env, &a.func(1)?)?;
                it.run_callable(env, &a.func(0)?)?;
                Ok(Some(env.pop()))
            },
        )]),
        cmd('𝒮', "compare combinator", (0, 0, 2, false), vec![ov(
            &[P::Fn, P::Fn],
            "pair the input with its image: x -> f(x, g(x))",
            |it, env, a| {
                let x = env.peek();
                it.run_callable(env, &a.func(1)?)?;
                let gx = env.pop();
                env.push(x);
                env.push(gx);
                it.run_callable(env, &a.func(0)?)?;
                Ok(Some(env.pop()))
            },
        )]),
        cmd('𝔰', "compare flipped combinator", (0, 0, 2, false), vec![ov(
            &[P::Fn, P::Fn],
            "pair the image with the input: x -> f(g(x), x)",
            |it, env, a| {
                let x = env.peek();
                it.run_callable(env, &a.func(1)?)?;
                env.push(x);
                it.run_callable(env, &a.func(0)?)?;
                Ok(Some(env.pop()))
            },
        )]),
        cmd('𝚿', "on combinator", (0, 0, 2, false), vec![ov(
            &[P::Fn, P::Fn],
            "process both inputs first: x y -> f(g(x), g(y))",
            |it, env, a| {
                let g = a.func(1)?;
                it.run_callable(env, &g)?;
                let gy = env.pop();
                it.run_callable(env, &g)?;
                env.push(gy);
                it.run_callable(env, &a.func(0)?)?;
                Ok(Some(env.pop()))
            },
        )]),
        cmd('𝒟', "fork", (0, 0, 3, false), vec![ov(
            &[P::Fn, P::Fn, P::Fn],
            "different transforms per input: x y -> f(g(x), h(y))",
            |it, env, a| {
                it.run_callable(env, &a.func(2)?)?;
                let hy = env.pop();
                it.run_callable(env, &a.func(1)?)?;
                env.push(hy);
                it.run_callable(env, &a.func(0)?)?;
                Ok(Some(env.pop()))
            },
        )]),
        cmd('𝚽', "phi fork", (0, 0, 3, false), vec![ov(
            &[P::Fn, P::Fn, P::Fn],
            "two transforms of one input: x -> f(g(x), h(x))",
            |it, env, a| {
                env.push(env.peek());
                it.run_callable(env, &a.func(2)?)?;
                let hx = env.pop();
                it.run_callable(env, &a.func(1)?)?;
                env.push(hx);
                it.run_callable(env, &a.func(0)?)?;
                Ok(Some(env.pop()))
            },
        )]),
        cmd('𝛗', "phi dyad fork", (0, 0, 3, false), vec![ov(
            &[P::Fn, P::Fn, P::Fn],
            "two transforms of two inputs: x y -> f(g(x,y), h(x,y))",
            |it, env, a| {
                let y = env.pop();
                let x = env.pop();
                env.push(x.clone());
                env.push(y.clone());
                env.push(x);
                env.push(y);
                it.run_callable(env, &a.func(2)?)?;
                let h = env.pop();
                it.run_callable(env, &a.func(1)?)?;
                env.push(h);
                it.run_callable(env, &a.func(0)?)?;
                Ok(Some(env.pop()))
            },
        )]),
        cmd('⍣', "repeat until", (0, 0, 2, false), vec![ov(
            &[P::Fn, P::Fn],
            "apply f until the predicate holds",
            |it, env, a| {
                let f = a.func(0)?;
                let g = a.func(1)?;
                loop {
                    it.run_callable(env, &f)?;
                    it.run_callable(env, &g)?;
                    if env.pop().truthy() {
                        break;
                    }
                }
                Ok(Some(env.pop()))
            },
        )]),
        cmd('…', "repeat", (1, 0, 1, false), vec![ov(
            &[P::Int, P::Fn],
            "apply a function n times",
            |it, env, a| {
                let f = a.func(1)?;
                for _ in 0..a.num(0)?.max(0) {
                    it.run_callable(env, &f)?;
                }
                Ok(Some(env.pop()))
            },
        )]),
        cmd('⊸', "bind left", (0, 1, 1, false), vec![ov(
            &[P::Any, P::Fn],
            "fix the left operand: x f -> λy.f(x, y)",
            |_, _, a| {
                Ok(Some(Value::Function(Callable::Bound(Rc::new(Bound {
                    f: a.func(1)?,
                    fixed: a.value(0),
                    side: BindSide::Left,
                })))))
            },
        )]),
        cmd('⟜', "bind right", (0, 1, 1, false), vec![ov(
            &[P::Any, P::Fn],
            "fix the right operand: x f -> λy.f(y, x)",
            |_, _, a| {
                Ok(Some(Value::Function(Callable::Bound(Rc::new(Bound {
                    f: a.func(1)?,
                    fixed: a.value(0),
                    side: BindSide::Right,
                })))))
            },
        )]),
        cmd('⍮', "dip", (0, 0, 1, false), vec![ov(
            &[P::Fn],
            "apply under the top value: x y -> f(x) y",
            |it, env, a| {
                let y = env.pop();
                let x = env.pop();
                env.push(x);
                it.run_callable(env, &a.func(0)?)?;
                env.push(y);
                Ok(None)
            },
        )]),
        cmd('⩣', "defer", (0, 0, 1, false), vec![ov(
            &[P::Fn],
            "wrap a function as a value",
            |_, _, a| {
                Ok(Some(Value::Function(Callable::Closure(Rc::new(
                    Closure::wrapping(a.func(0)?),
                )))))
            },
        )]),
    ]
}
