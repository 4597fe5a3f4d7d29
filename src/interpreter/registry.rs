//! The command registry: arities and type-specialised overloads
//!
//! The registry is the single source of truth for two questions: how many
//! tokens of each class a glyph consumes (asked by the parser), and which
//! concrete implementation runs for the argument types observed at the
//! call (asked by the engine). It is populated once at startup from the
//! static tables in [`commands`](super::commands) and never mutated.
//!
//! Overload resolution is first-match-in-declared-order over each
//! command's [`Overload`] list, with two extensions:
//!
//! - the `Any` pattern matches every value, and
//! - purely numeric patterns (`[Int]` and `[Int, Int]`) broadcast
//!   element-wise when handed lists, so `²` squares a whole list and `+`
//!   zips two of them.

use rustc_hash::FxHashMap;

use crate::interpreter::closure::Callable;
use crate::interpreter::engine::Interpreter;
use crate::interpreter::environment::Environment;
use crate::interpreter::errors::RuntimeError;
use crate::values::{Coordinate, List, Map, Slice, TypeTag, Value};
use std::rc::Rc;

/// How many arguments of each class a command consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    /// Values popped from the shared data stack.
    pub stack: usize,
    /// Inline sub-expressions evaluated at the call.
    pub code: usize,
    /// Deferred function arguments.
    pub functions: usize,
    /// Whether a trailing block follows.
    pub block: bool,
}

impl Arity {
    pub const fn new(stack: usize, code: usize, functions: usize, block: bool) -> Self {
        Arity {
            stack,
            code,
            functions,
            block,
        }
    }
}

/// One slot of an overload's type pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamPattern {
    /// Matches anything.
    Any,
    /// Matches any value coercible to an integer (numbers, null, numeric
    /// text, numeric singleton lists); the argument arrives coerced.
    Int,
    Str,
    List,
    Coordinate,
    Map,
    /// Matches slice values.
    SliceVal,
    /// Matches live iterators and slices (a slice iterates as a
    /// progression).
    Iterator,
    /// Matches the null sentinel.
    Null,
    /// Matches any callable.
    Fn,
    /// Matches closure objects only.
    Lambda,
    /// Matches raw deferred arguments and blocks (not closures).
    Block,
}

impl ParamPattern {
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ParamPattern::Any => true,
            ParamPattern::Int => value.int_value().is_some(),
            ParamPattern::Str => matches!(value, Value::Text(_)),
            ParamPattern::List => matches!(value, Value::List(_)),
            ParamPattern::Coordinate => matches!(value, Value::Coordinate(_)),
            ParamPattern::Map => matches!(value, Value::Map(_)),
            ParamPattern::SliceVal => matches!(value, Value::Slice(_)),
            ParamPattern::Iterator => {
                matches!(value, Value::Iterator(_) | Value::Slice(_))
            }
            ParamPattern::Null => value.is_absent(),
            ParamPattern::Fn => matches!(value, Value::Function(_)),
            ParamPattern::Lambda => {
                matches!(value, Value::Function(Callable::Closure(_)))
            }
            ParamPattern::Block => matches!(
                value,
                Value::Function(Callable::Thunk(_)) | Value::Function(Callable::Block(_))
            ),
        }
    }

    /// Normalise a matched argument to the form the implementation expects.
    pub fn coerce(&self, value: Value) -> Value {
        match self {
            ParamPattern::Int => match value.int_value() {
                Some(n) => Value::Number(n),
                None => value,
            },
            ParamPattern::Null => Value::Absent,
            _ => value,
        }
    }
}

/// How a matched overload is to be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Apply to the arguments as given.
    Direct,
    /// `[Int]` pattern over a list: map over its slots.
    MapUnary,
    /// `[Int, Int]` pattern over a list and a scalar: map with the scalar
    /// as fixed right operand.
    MapScalar,
    /// `[Int, Int]` pattern over two lists: zip element-wise.
    ZipLists,
}

/// Decide whether a pattern accepts the observed arguments, and how.
///
/// Broadcasting is checked before slot-by-slot matching so a list meets a
/// numeric pattern as an aggregate, never via its singleton coercion.
pub fn match_overload(pattern: &[ParamPattern], params: &[Value]) -> Option<MatchMode> {
    use ParamPattern::Int;

    if pattern == [Int].as_slice() && params.len() == 1 && matches!(params[0], Value::List(_)) {
        return Some(MatchMode::MapUnary);
    }
    if pattern == [Int, Int].as_slice() && params.len() == 2 {
        if let Value::List(_) = params[0] {
            match &params[1] {
                Value::List(_) => return Some(MatchMode::ZipLists),
                Value::Number(_) => return Some(MatchMode::MapScalar),
                _ => {}
            }
        }
    }

    if pattern.len() != params.len() {
        return None;
    }
    if pattern
        .iter()
        .zip(params)
        .all(|(slot, value)| slot.matches(value))
    {
        Some(MatchMode::Direct)
    } else {
        None
    }
}

/// Implementation signature shared by every overload.
pub type CommandFn =
    fn(&Interpreter, &Environment, Args) -> Result<Option<Value>, RuntimeError>;

/// One type-specialised implementation of a command.
pub struct Overload {
    pub pattern: &'static [ParamPattern],
    pub description: &'static str,
    pub run: CommandFn,
}

/// A command: its glyph, alias, arity and ordered overloads.
pub struct CommandSignature {
    pub symbol: char,
    pub alias: &'static str,
    pub arity: Arity,
    pub overloads: Vec<Overload>,
}

/// Shorthand constructors used by the command tables.
pub fn cmd(
    symbol: char,
    alias: &'static str,
    arity: (usize, usize, usize, bool),
    overloads: Vec<Overload>,
) -> CommandSignature {
    CommandSignature {
        symbol,
        alias,
        arity: Arity::new(arity.0, arity.1, arity.2, arity.3),
        overloads,
    }
}

pub fn ov(
    pattern: &'static [ParamPattern],
    description: &'static str,
    run: CommandFn,
) -> Overload {
    Overload {
        pattern,
        description,
        run,
    }
}

/// The process-wide command table. Read-only after construction; lookup
/// is a single hash probe.
pub struct Registry {
    commands: FxHashMap<char, CommandSignature>,
}

impl Registry {
    pub fn new() -> Self {
        let mut commands = FxHashMap::default();
        for command in super::commands::all() {
            commands.insert(command.symbol, command);
        }
        Registry { commands }
    }

    pub fn get(&self, symbol: char) -> Option<&CommandSignature> {
        self.commands.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Registered glyphs, for listings and arity tests.
    pub fn symbols(&self) -> Vec<char> {
        self.commands.keys().copied().collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new()
    }
}

/// Gathered, coerced arguments handed to an overload.
///
/// Accessors assume the dispatcher already verified the pattern, so a
/// wrong-variant access is an interpreter bug reported as a type mismatch.
pub struct Args(pub Vec<Value>);

impl Args {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn value(&self, i: usize) -> Value {
        self.0.get(i).cloned().unwrap_or(Value::Absent)
    }

    fn mismatch(&self, i: usize, expected: &'static str) -> RuntimeError {
        RuntimeError::TypeMismatch {
            expected,
            got: self
                .0
                .get(i)
                .map(|v| v.type_tag().to_string())
                .unwrap_or_else(|| "missing argument".to_string()),
            span: None,
        }
    }

    pub fn num(&self, i: usize) -> Result<i64, RuntimeError> {
        match self.0.get(i) {
            Some(Value::Number(n)) => Ok(*n),
            _ => Err(self.mismatch(i, "Number")),
        }
    }

    pub fn text(&self, i: usize) -> Result<String, RuntimeError> {
        match self.0.get(i) {
            Some(Value::Text(s)) => Ok(s.clone()),
            _ => Err(self.mismatch(i, "Text")),
        }
    }

    pub fn list(&self, i: usize) -> Result<List, RuntimeError> {
        match self.0.get(i) {
            Some(Value::List(l)) => Ok(l.clone()),
            _ => Err(self.mismatch(i, "List")),
        }
    }

    pub fn coordinate(&self, i: usize) -> Result<Coordinate, RuntimeError> {
        match self.0.get(i) {
            Some(Value::Coordinate(c)) => Ok(c.clone()),
            _ => Err(self.mismatch(i, "Coordinate")),
        }
    }

    pub fn map(&self, i: usize) -> Result<Map, RuntimeError> {
        match self.0.get(i) {
            Some(Value::Map(m)) => Ok(m.clone()),
            _ => Err(self.mismatch(i, "Map")),
        }
    }

    pub fn slice(&self, i: usize) -> Result<Rc<Slice>, RuntimeError> {
        match self.0.get(i) {
            Some(Value::Slice(s)) => Ok(Rc::clone(s)),
            _ => Err(self.mismatch(i, "Slice")),
        }
    }

    pub fn func(&self, i: usize) -> Result<Callable, RuntimeError> {
        match self.0.get(i) {
            Some(Value::Function(c)) => Ok(c.clone()),
            _ => Err(self.mismatch(i, "Function")),
        }
    }

    /// Observed type tags, for dispatch-failure reporting.
    pub fn tags(&self) -> Vec<TypeTag> {
        self.0.iter().map(|v| v.type_tag()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_pattern_coerces() {
        assert!(ParamPattern::Int.matches(&Value::Number(3)));
        assert!(ParamPattern::Int.matches(&Value::Absent));
        assert!(ParamPattern::Int.matches(&Value::Text("12".to_string())));
        assert!(!ParamPattern::Int.matches(&Value::Text("x".to_string())));
        assert_eq!(
            ParamPattern::Int.coerce(Value::Text("12".to_string())),
            Value::Number(12)
        );
        assert_eq!(ParamPattern::Int.coerce(Value::Absent), Value::Number(0));
    }

    #[test]
    fn test_numeric_patterns_broadcast_over_lists() {
        use ParamPattern::Int;
        let list = Value::List(List::from_numbers(vec![1, 2]));
        assert_eq!(
            match_overload(&[Int], std::slice::from_ref(&list)),
            Some(MatchMode::MapUnary)
        );
        assert_eq!(
            match_overload(&[Int, Int], &[list.clone(), Value::Number(3)]),
            Some(MatchMode::MapScalar)
        );
        assert_eq!(
            match_overload(&[Int, Int], &[list.clone(), list.clone()]),
            Some(MatchMode::ZipLists)
        );
        // a scalar left operand does not broadcast
        assert_eq!(match_overload(&[Int, Int], &[Value::Number(3), list]), None);
    }

    #[test]
    fn test_registry_lookup() {
        let registry = Registry::new();
        let add = registry.get('+').expect("missing '+'");
        assert_eq!(add.arity, Arity::new(2, 0, 0, false));
        assert!(registry.get('☹').is_none());
        assert!(registry.len() > 90);
    }
}
