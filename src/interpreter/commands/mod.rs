//! The glyph command set
//!
//! Each submodule contributes one domain's commands as a static table of
//! [`CommandSignature`](crate::interpreter::registry::CommandSignature)s:
//!
//! - [`math`]: arithmetic, comparison and logic
//! - [`control`]: conditional expressions
//! - [`stack_ops`]: stack shuffling
//! - [`strings`]: text conversion and splitting
//! - [`lists`]: flat lists, selection, the key-value store and coordinates
//! - [`sets`]: set-flavored list operations
//! - [`lookup`]: parameters, implicit values, names and pinned locals
//! - [`blocks`]: block constructors and invocation
//! - [`combinators`]: point-free function composition
//! - [`iteration`]: loop construction and exit
//! - [`files`]: file-backed parameter I/O
//!
//! Adding a command never touches the parser or the engine: the tables
//! are the single source of truth for both arity and dispatch.

pub mod blocks;
pub mod combinators;
pub mod control;
pub mod files;
pub mod iteration;
pub mod lists;
pub mod lookup;
pub mod math;
pub mod sets;
pub mod stack_ops;
pub mod strings;

use crate::interpreter::closure::Callable;
use crate::interpreter::engine::Interpreter;
use crate::interpreter::environment::Environment;
use crate::interpreter::errors::RuntimeError;
use crate::interpreter::registry::CommandSignature;
use crate::values::Value;

/// Apply a deferred callable to one value through the stack.
pub(crate) fn apply1(
    it: &Interpreter,
    env: &Environment,
    f: &Callable,
    x: Value,
) -> Result<Value, RuntimeError> {
    env.push(x);
    it.run_callable(env, f)?;
    Ok(env.pop())
}

/// Apply a deferred callable to two values through the stack.
pub(crate) fn apply2(
    it: &Interpreter,
    env: &Environment,
    f: &Callable,
    x: Value,
    y: Value,
) -> Result<Value, RuntimeError> {
    env.push(x);
    env.push(y);
    it.run_callable(env, f)?;
    Ok(env.pop())
}

/// Every command in the language, in registration order.
pub(crate) fn all() -> Vec<CommandSignature> {
    let mut commands = Vec::new();
    commands.extend(math::commands());
    commands.extend(control::commands());
    commands.extend(stack_ops::commands());
    commands.extend(strings::commands());
    commands.extend(lists::commands());
    commands.extend(sets::commands());
    commands.extend(lookup::commands());
    commands.extend(blocks::commands());
    commands.extend(combinators::commands());
    commands.extend(iteration::commands());
    commands.extend(files::commands());
    commands
}
