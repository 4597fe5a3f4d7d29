//! # Introduction
//!
//! Runic interprets a stack-based code-golf language in which every glyph is
//! a command. A command declares how many arguments it takes from each of
//! four independent classes (values popped from the shared data stack,
//! sub-expressions evaluated inline, deferred function arguments, and an
//! optional trailing block), and that arity table drives parsing itself.
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Lexer → Parser → Syntax forest → Interpreter → Final stack
//! ```
//!
//! 1. [`parser`] tokenises the source and builds the syntax forest, asking
//!    the command registry how many following nodes each glyph owns.
//! 2. [`interpreter`] walks the forest, dispatching each glyph to the
//!    first type-matching overload registered for it, against a shared data
//!    stack and a chain of lexical environments.
//! 3. [`values`] holds the tagged runtime value universe: numbers, text, flat
//!    lists, coordinates, key-value maps, slices, iterators, closures and
//!    the `Absent` null sentinel.
//!
//! ## Language surface
//!
//! Maths and comparisons, stack shuffling, strings, flat lists and sets,
//! slices, a key-value store, lexically scoped name bindings, general
//! iteration (`Ω`/`:`/`⌁`), deferred blocks (`λ µ κ (`) with optional
//! memoisation, an SKI-style combinator family, and file-backed program
//! parameters.

pub mod interpreter;
pub mod parser;
pub mod values;

use interpreter::engine::Interpreter;
use interpreter::errors::RuntimeError;
use parser::ast;
use parser::lexer::tokenize;
use parser::ParseError;
use values::Value;

/// Either stage of failure when running a program from source.
#[derive(Debug)]
pub enum Error {
    Parse(ParseError),
    Runtime(RuntimeError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Parse(e) => write!(f, "{}", e),
            Error::Runtime(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error::Parse(e)
    }
}

impl From<RuntimeError> for Error {
    fn from(e: RuntimeError) -> Self {
        Error::Runtime(e)
    }
}

/// Parse and run a program, returning the final stack from bottom to top.
///
/// `parameters` are the program parameters proper; the program name slot
/// (parameter 0) is filled with the default name `f`, matching the
/// conventional input/output file names `f.in` / `f.out`.
pub fn run_program(source: &str, parameters: Vec<Value>) -> Result<Vec<Value>, Error> {
    run_named_program(source, parameters, "f")
}

/// Parse and run a program under an explicit program name.
pub fn run_named_program(
    source: &str,
    parameters: Vec<Value>,
    name: &str,
) -> Result<Vec<Value>, Error> {
    let interpreter = Interpreter::new();
    let tokens = tokenize(source);
    let forest = ast::build(&tokens, interpreter.registry())?;

    let mut all_parameters = vec![Value::Text(name.to_string())];
    all_parameters.extend(parameters);

    Ok(interpreter.run(&forest, all_parameters)?)
}
