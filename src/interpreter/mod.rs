//! Glyph-language execution engine
//!
//! This module provides the runtime half of the interpreter:
//! - [`engine`]: the eval/apply tree walk and overload dispatch
//! - [`registry`]: the command table of arities and type-specialised overloads
//! - [`environment`]: lexical environments chained over one shared data stack
//! - [`iterator`]: the init/condition/update loop protocol
//! - [`closure`]: deferred callables, memoising closures and combinators
//! - [`commands`]: the glyph command set, grouped by domain
//! - [`storage`]: file-backed program parameters
//! - [`errors`]: runtime error types
//!
//! # Execution Model
//!
//! The engine walks the syntax forest in strict pre-order. A literal pushes
//! its value; a call node pops its declared stack arguments, evaluates its
//! inline arguments, wraps its function arguments and block as deferred
//! callables, and hands the lot to the first registered overload whose type
//! pattern matches. Whatever non-absent value the overload returns is
//! pushed back.
//!
//! Every error is fatal: the language has no exception handling, so the
//! first failure unwinds the whole run. The one deliberate exception is
//! stack underflow, which yields the `Absent` sentinel instead of failing.

pub mod closure;
pub mod commands;
pub mod constants;
pub mod engine;
pub mod environment;
pub mod errors;
pub mod iterator;
pub mod registry;
pub mod storage;
