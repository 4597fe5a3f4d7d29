//! Deferred callables and closures
//!
//! Four kinds of value behave as functions:
//!
//! - [`Thunk`]: a function-class argument, a syntax subtree captured
//!   together with the environment of the call site. Invoking it evaluates
//!   the subtree in that captured environment, so combinators see the
//!   lexical state as of their call, not a snapshot.
//! - [`BlockBody`]: a trailing block. It captures no environment; whoever
//!   invokes it supplies one, which is how loops give every iteration a
//!   fresh child environment.
//! - [`Closure`]: a `λ`/`µ`/`κ` object. It owns its body, may pull the
//!   implicit loop value as an input, and may memoise results keyed by its
//!   single (hashable) input.
//! - [`Bound`]: a partial application produced by `⊸`/`⟜`, fixing one
//!   operand of an underlying callable.
//!
//! All variants are cheaply cloneable handles; the interpreter invokes
//! them through `Interpreter::run_callable`.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::interpreter::environment::Environment;
use crate::parser::ast::SyntaxNode;
use crate::values::{MemoKey, Value};

/// Any runtime function value.
#[derive(Clone)]
pub enum Callable {
    Thunk(Rc<Thunk>),
    Block(Rc<BlockBody>),
    Closure(Rc<Closure>),
    Bound(Rc<Bound>),
}

/// A deferred function-class argument.
pub struct Thunk {
    /// Subtree to evaluate on invocation.
    pub node: Rc<SyntaxNode>,
    /// Environment of the call site the argument was gathered at.
    pub env: Environment,
    /// Evaluate-then-invoke: set for arguments written as block
    /// constructors or name lookups (`λ µ ( κ $`), whose evaluation
    /// *produces* the function to run.
    pub auto_run: bool,
}

/// A trailing block, run in whatever environment the owner supplies.
pub struct BlockBody {
    pub body: Rc<[SyntaxNode]>,
}

/// Body of a closure: either a block subtree or a wrapped callable.
pub enum ClosureBody {
    Tree(Rc<[SyntaxNode]>),
    Wrapped(Callable),
}

/// A `λ`/`µ`/`κ` closure object.
pub struct Closure {
    pub body: ClosureBody,
    /// Push the enclosing loop's implicit value before running.
    pub use_implicit: bool,
    /// Memoisation cache keyed by the single input, when enabled.
    pub cache: Option<RefCell<FxHashMap<MemoKey, Value>>>,
}

impl Closure {
    /// Plain block closure (`µ`, and `(` when run immediately).
    pub fn plain(body: Rc<[SyntaxNode]>) -> Self {
        Closure {
            body: ClosureBody::Tree(body),
            use_implicit: false,
            cache: None,
        }
    }

    /// One-input closure that pulls the implicit loop value (`λ`).
    pub fn with_implicit(body: Rc<[SyntaxNode]>) -> Self {
        Closure {
            body: ClosureBody::Tree(body),
            use_implicit: true,
            cache: None,
        }
    }

    /// Memoising closure (`κ`).
    pub fn memoising(body: Rc<[SyntaxNode]>) -> Self {
        Closure {
            body: ClosureBody::Tree(body),
            use_implicit: false,
            cache: Some(RefCell::new(FxHashMap::default())),
        }
    }

    /// Wrap an existing callable as a closure object (`⩣`).
    pub fn wrapping(callable: Callable) -> Self {
        Closure {
            body: ClosureBody::Wrapped(callable),
            use_implicit: false,
            cache: None,
        }
    }
}

/// Direction a fixed operand binds on.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum BindSide {
    Left,
    Right,
}

/// Partial application: a callable with one operand pre-supplied.
pub struct Bound {
    pub f: Callable,
    pub fixed: Value,
    pub side: BindSide,
}

impl std::fmt::Debug for Callable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Callable::Thunk(t) => write!(f, "<thunk {:?}>", t.node.span()),
            Callable::Block(_) => write!(f, "<block>"),
            Callable::Closure(c) => {
                let kind = match (&c.cache, c.use_implicit) {
                    (Some(_), _) => "memoising closure",
                    (None, true) => "λ closure",
                    (None, false) => "closure",
                };
                write!(f, "<{}>", kind)
            }
            Callable::Bound(_) => write!(f, "<bound fn>"),
        }
    }
}
