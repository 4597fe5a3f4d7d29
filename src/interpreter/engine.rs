//! Execution engine
//!
//! The engine walks the syntax forest depth-first against a chain of
//! environments sharing one data stack. For every call node it gathers the
//! four argument classes in order (stack pops, inline evaluations,
//! deferred function arguments, trailing block), resolves the overload by
//! the observed runtime types, applies the declared coercions and invokes
//! the implementation. A non-absent return value is pushed.
//!
//! The engine also owns the invocation machinery shared by commands:
//! running deferred callables, entering closures (with memoisation), and
//! the iterator protocol driver lives next door in
//! [`iterator`](super::iterator).

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use log::trace;

use crate::interpreter::closure::{BlockBody, Callable, Closure, ClosureBody, Thunk};
use crate::interpreter::environment::Environment;
use crate::interpreter::errors::RuntimeError;
use crate::interpreter::registry::{
    match_overload, Args, MatchMode, Overload, Registry,
};
use crate::interpreter::storage::{FileStorage, Storage};
use crate::parser::ast::{Forest, SyntaxNode};
use crate::parser::Span;
use crate::values::{List, Value};

use super::closure::BindSide;

/// Stages reported to an [`Observer`] around node evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceStage {
    /// A literal is about to push.
    Literal,
    /// A block terminator was reached.
    BlockEnd,
    /// A command is about to gather its arguments.
    Apply,
    /// A command finished; `value` carries what it produced.
    Produced,
}

/// One notification to an observer.
pub struct TraceEvent<'a> {
    pub stage: TraceStage,
    pub symbol: Option<char>,
    pub alias: Option<&'static str>,
    pub span: Span,
    pub value: Option<&'a Value>,
}

/// Optional tracing hook invoked around every node evaluation.
///
/// Absence of an observer has zero behavioral effect; the engine only
/// ever calls `notify`.
pub trait Observer {
    fn notify(&mut self, env: &Environment, event: &TraceEvent);
}

/// An observer that forwards events to the `log` crate at trace level.
pub struct LogObserver;

impl Observer for LogObserver {
    fn notify(&mut self, env: &Environment, event: &TraceEvent) {
        let glyph = event.symbol.map(String::from).unwrap_or_default();
        let alias = event.alias.unwrap_or("");
        match event.stage {
            TraceStage::Literal => {
                trace!(
                    "push {}  stack depth {}",
                    event.value.map(|v| v.to_string()).unwrap_or_default(),
                    env.stack_depth()
                );
            }
            TraceStage::BlockEnd => trace!("block end"),
            TraceStage::Apply => trace!("apply {} '{}'", glyph, alias),
            TraceStage::Produced => {
                trace!(
                    "{} '{}' -> {}  stack depth {}",
                    glyph,
                    alias,
                    event
                        .value
                        .map(|v| v.to_string())
                        .unwrap_or_else(|| "·".to_string()),
                    env.stack_depth()
                );
            }
        }
    }
}

/// The interpreter: a registry plus the tree-walking machinery.
///
/// The interpreter itself is stateless across runs; all run state lives in
/// the environment chain, so one interpreter can execute many programs.
pub struct Interpreter {
    registry: Registry,
    observer: RefCell<Option<Box<dyn Observer>>>,
}

impl Interpreter {
    pub fn new() -> Self {
        Interpreter {
            registry: Registry::new(),
            observer: RefCell::new(None),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Install a tracing observer.
    pub fn set_observer(&self, observer: Box<dyn Observer>) {
        *self.observer.borrow_mut() = Some(observer);
    }

    /// Run a program with file storage rooted at the working directory.
    ///
    /// Parameter 0 is the program's display name. Returns the final stack
    /// from bottom to top; collapsing a singleton stack to a bare value is
    /// the caller's concern.
    pub fn run(
        &self,
        forest: &Forest,
        parameters: Vec<Value>,
    ) -> Result<Vec<Value>, RuntimeError> {
        let dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        self.run_with_storage(forest, parameters, Box::new(FileStorage::new(dir)))
    }

    /// Run a program against an explicit storage collaborator.
    pub fn run_with_storage(
        &self,
        forest: &Forest,
        parameters: Vec<Value>,
        storage: Box<dyn Storage>,
    ) -> Result<Vec<Value>, RuntimeError> {
        let root = Environment::new_root(parameters, storage);
        self.eval_nodes(&root, &forest.nodes)?;
        Ok(root.stack_contents())
    }

    // --- Tree walking -----------------------------------------------------

    pub(crate) fn eval_nodes(
        &self,
        env: &Environment,
        nodes: &[SyntaxNode],
    ) -> Result<(), RuntimeError> {
        for node in nodes {
            self.eval_node(env, node)?;
        }
        Ok(())
    }

    pub(crate) fn eval_node(
        &self,
        env: &Environment,
        node: &SyntaxNode,
    ) -> Result<(), RuntimeError> {
        match node {
            SyntaxNode::Literal { value, meta } => {
                self.notify(
                    env,
                    &TraceEvent {
                        stage: TraceStage::Literal,
                        symbol: None,
                        alias: None,
                        span: meta.span,
                        value: Some(value),
                    },
                );
                env.push(value.clone());
                Ok(())
            }

            SyntaxNode::End { meta } => {
                self.notify(
                    env,
                    &TraceEvent {
                        stage: TraceStage::BlockEnd,
                        symbol: None,
                        alias: None,
                        span: meta.span,
                        value: None,
                    },
                );
                Ok(())
            }

            SyntaxNode::Call {
                symbol,
                arity,
                code_args,
                fn_args,
                block,
                meta,
            } => self.apply(env, *symbol, arity.stack, code_args, fn_args, block, meta.span),
        }
    }

    /// Gather a command's arguments, dispatch and invoke it.
    #[allow(clippy::too_many_arguments)]
    fn apply(
        &self,
        env: &Environment,
        symbol: char,
        stack_arity: usize,
        code_args: &[SyntaxNode],
        fn_args: &[Rc<SyntaxNode>],
        block: &Option<Rc<[SyntaxNode]>>,
        span: Span,
    ) -> Result<(), RuntimeError> {
        let command = self.registry.get(symbol).ok_or(RuntimeError::Domain {
            message: format!("symbol '{}' vanished from the registry", symbol),
            span: Some(span),
        })?;

        self.notify(
            env,
            &TraceEvent {
                stage: TraceStage::Apply,
                symbol: Some(symbol),
                alias: Some(command.alias),
                span,
                value: None,
            },
        );

        // 1. Stack arguments: already-computed values, oldest first.
        let mut params: Vec<Value> = (0..stack_arity).map(|_| env.pop()).collect();
        params.reverse();

        // 2. Inline arguments: evaluate adjacent code now, take its result.
        for node in code_args {
            self.eval_node(env, node)?;
            params.push(env.pop());
        }

        // 3. Function arguments: defer, closing over the current
        //    environment. Block constructors and name lookups are marked
        //    evaluate-then-invoke so they denote the function they build.
        for node in fn_args {
            let auto_run = matches!(node.symbol(), Some('λ' | 'µ' | '(' | 'κ' | '$'));
            params.push(Value::Function(Callable::Thunk(Rc::new(Thunk {
                node: Rc::clone(node),
                env: env.clone(),
                auto_run,
            }))));
        }

        // 4. Trailing block: deferred, run in an environment of the
        //    implementation's choosing.
        if let Some(body) = block {
            params.push(Value::Function(Callable::Block(Rc::new(BlockBody {
                body: Rc::clone(body),
            }))));
        }

        // 5. First matching overload in declaration order wins.
        let selected = command
            .overloads
            .iter()
            .find_map(|overload| {
                match_overload(overload.pattern, &params).map(|mode| (overload, mode))
            });
        let Some((overload, mode)) = selected else {
            return Err(RuntimeError::NoMatchingOverload {
                symbol,
                tags: params.iter().map(|v| v.type_tag()).collect(),
                span: Some(span),
            });
        };
        trace!(
            "dispatch {} '{}' -> {} ({:?})",
            symbol,
            command.alias,
            overload.description,
            mode
        );

        // 6. Coerce and invoke.
        let produced = match mode {
            MatchMode::Direct => {
                let coerced = overload
                    .pattern
                    .iter()
                    .zip(params)
                    .map(|(slot, value)| slot.coerce(value))
                    .collect();
                (overload.run)(self, env, Args(coerced)).map_err(|e| e.with_span(span))?
            }
            MatchMode::MapUnary => {
                Some(self.map_unary(env, overload, &params, span)?)
            }
            MatchMode::MapScalar | MatchMode::ZipLists => {
                Some(self.map_binary(env, overload, &params, mode, span)?)
            }
        };

        self.notify(
            env,
            &TraceEvent {
                stage: TraceStage::Produced,
                symbol: Some(symbol),
                alias: Some(command.alias),
                span,
                value: produced.as_ref(),
            },
        );

        // 7. Push a non-absent result.
        if let Some(value) = produced {
            env.push(value);
        }
        Ok(())
    }

    // --- Element-wise broadcasting ----------------------------------------

    fn element_int(value: &Value, span: Span) -> Result<Value, RuntimeError> {
        value
            .int_value()
            .map(Value::Number)
            .ok_or(RuntimeError::TypeMismatch {
                expected: "numeric list element",
                got: value.type_tag().to_string(),
                span: Some(span),
            })
    }

    /// Apply a scalar `[Int]` overload across a list.
    fn map_unary(
        &self,
        env: &Environment,
        overload: &Overload,
        params: &[Value],
        span: Span,
    ) -> Result<Value, RuntimeError> {
        let Value::List(list) = &params[0] else {
            return Err(RuntimeError::TypeMismatch {
                expected: "List",
                got: params[0].type_tag().to_string(),
                span: Some(span),
            });
        };
        let mut out = Vec::new();
        for item in list.raw() {
            let arg = Self::element_int(&item, span)?;
            let r = (overload.run)(self, env, Args(vec![arg]))
                .map_err(|e| e.with_span(span))?;
            out.push(r.unwrap_or(Value::Absent));
        }
        Ok(Value::List(List::new(out)))
    }

    /// Apply a scalar `[Int, Int]` overload across one or two lists.
    fn map_binary(
        &self,
        env: &Environment,
        overload: &Overload,
        params: &[Value],
        mode: MatchMode,
        span: Span,
    ) -> Result<Value, RuntimeError> {
        let Value::List(left) = &params[0] else {
            return Err(RuntimeError::TypeMismatch {
                expected: "List",
                got: params[0].type_tag().to_string(),
                span: Some(span),
            });
        };

        let mut out = Vec::new();
        match mode {
            MatchMode::MapScalar => {
                let right = Self::element_int(&params[1], span)?;
                for item in left.raw() {
                    let arg = Self::element_int(&item, span)?;
                    let r = (overload.run)(self, env, Args(vec![arg, right.clone()]))
                        .map_err(|e| e.with_span(span))?;
                    out.push(r.unwrap_or(Value::Absent));
                }
            }
            _ => {
                let Value::List(right) = &params[1] else {
                    return Err(RuntimeError::TypeMismatch {
                        expected: "List",
                        got: params[1].type_tag().to_string(),
                        span: Some(span),
                    });
                };
                for (a, b) in left.raw().into_iter().zip(right.raw()) {
                    let left_arg = Self::element_int(&a, span)?;
                    let right_arg = Self::element_int(&b, span)?;
                    let r = (overload.run)(self, env, Args(vec![left_arg, right_arg]))
                        .map_err(|e| e.with_span(span))?;
                    out.push(r.unwrap_or(Value::Absent));
                }
            }
        }
        Ok(Value::List(List::new(out)))
    }

    // --- Callable invocation ----------------------------------------------

    /// Invoke a deferred callable against the given environment.
    ///
    /// Results are communicated through the stack: every callable leaves
    /// whatever it produces on top.
    pub fn run_callable(
        &self,
        env: &Environment,
        callable: &Callable,
    ) -> Result<(), RuntimeError> {
        match callable {
            Callable::Thunk(thunk) => {
                // The subtree evaluates in its captured environment; the
                // stack is shared, so its result is visible here.
                self.eval_node(&thunk.env, &thunk.node)?;
                if thunk.auto_run {
                    let value = env.pop();
                    self.run_object(env, &value)?;
                }
                Ok(())
            }
            Callable::Block(block) => self.eval_nodes(env, &block.body),
            Callable::Closure(closure) => self.invoke_closure(env, closure),
            Callable::Bound(bound) => {
                let y = env.pop();
                match bound.side {
                    BindSide::Left => {
                        env.push(bound.fixed.clone());
                        env.push(y);
                    }
                    BindSide::Right => {
                        env.push(y);
                        env.push(bound.fixed.clone());
                    }
                }
                self.run_callable(env, &bound.f)
            }
        }
    }

    /// Run a value if it is callable; other values are left alone.
    pub fn run_object(&self, env: &Environment, value: &Value) -> Result<(), RuntimeError> {
        match value {
            Value::Function(callable) => self.run_callable(env, callable),
            _ => Ok(()),
        }
    }

    /// Enter a closure: implicit input, memo lookup, fresh environment.
    pub fn invoke_closure(
        &self,
        env: &Environment,
        closure: &Closure,
    ) -> Result<(), RuntimeError> {
        if closure.use_implicit {
            // Outside a loop there is no implicit input; pushing nothing
            // lets the body consume whatever the caller staged instead.
            let implicit = env.implicit(0);
            if !implicit.is_absent() {
                env.push(implicit);
            }
        }

        // Memoisation keys on the (hashable) top-of-stack input as the
        // body is about to see it.
        let memo_key = match &closure.cache {
            Some(cache) => {
                let key = env.peek().memo_key();
                if let Some(k) = &key {
                    if let Some(hit) = cache.borrow().get(k) {
                        env.pop();
                        env.push(hit.clone());
                        return Ok(());
                    }
                }
                key
            }
            None => None,
        };

        let local = env.child();
        match &closure.body {
            ClosureBody::Tree(nodes) => self.eval_nodes(&local, nodes)?,
            ClosureBody::Wrapped(callable) => self.run_callable(&local, callable)?,
        }

        if let (Some(cache), Some(key)) = (&closure.cache, memo_key) {
            cache.borrow_mut().insert(key, env.peek());
        }
        Ok(())
    }

    fn notify(&self, env: &Environment, event: &TraceEvent) {
        if let Some(observer) = self.observer.borrow_mut().as_mut() {
            observer.notify(env, event);
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Interpreter::new()
    }
}
