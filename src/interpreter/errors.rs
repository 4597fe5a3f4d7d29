//! Runtime error types for the interpreter
//!
//! This module defines [`RuntimeError`], covering everything that can go
//! wrong after parsing succeeds. All runtime errors are fatal: the language
//! has no recovery mechanism, so the first error aborts the run and
//! surfaces the offending glyph, its source span and, for dispatch
//! failures, the observed argument types.
//!
//! Stack underflow is not an error: popping an empty stack yields the
//! `Absent` sentinel, and programs rely on that.

use std::fmt;

use crate::parser::Span;
use crate::values::TypeTag;

/// Runtime errors that can occur during execution
#[derive(Debug, Clone)]
pub enum RuntimeError {
    /// Name lookup exhausted the environment chain.
    UnboundName { name: String, span: Option<Span> },

    /// No registered overload matched the observed argument types.
    NoMatchingOverload {
        symbol: char,
        tags: Vec<TypeTag>,
        span: Option<Span>,
    },

    /// An argument had the right tag for dispatch but an unusable value.
    TypeMismatch {
        expected: &'static str,
        got: String,
        span: Option<Span>,
    },

    /// Checked integer arithmetic overflowed 64 bits.
    Overflow { operation: String, span: Option<Span> },

    /// Division or modulo by zero.
    DivisionByZero { operation: String, span: Option<Span> },

    /// An argument was outside a command's domain (negative exponent,
    /// zero-length window, …).
    Domain { message: String, span: Option<Span> },

    /// The storage collaborator failed to read or write a value file.
    Storage { message: String },
}

impl RuntimeError {
    pub fn span(&self) -> Option<Span> {
        match self {
            RuntimeError::UnboundName { span, .. } => *span,
            RuntimeError::NoMatchingOverload { span, .. } => *span,
            RuntimeError::TypeMismatch { span, .. } => *span,
            RuntimeError::Overflow { span, .. } => *span,
            RuntimeError::DivisionByZero { span, .. } => *span,
            RuntimeError::Domain { span, .. } => *span,
            RuntimeError::Storage { .. } => None,
        }
    }

    /// Attach a source span to an error raised without position context.
    /// An already-present span is kept: it is closer to the fault.
    pub fn with_span(mut self, at: Span) -> Self {
        let slot = match &mut self {
            RuntimeError::UnboundName { span, .. } => span,
            RuntimeError::NoMatchingOverload { span, .. } => span,
            RuntimeError::TypeMismatch { span, .. } => span,
            RuntimeError::Overflow { span, .. } => span,
            RuntimeError::DivisionByZero { span, .. } => span,
            RuntimeError::Domain { span, .. } => span,
            RuntimeError::Storage { .. } => return self,
        };
        if slot.is_none() {
            *slot = Some(at);
        }
        self
    }
}

fn write_span(f: &mut fmt::Formatter<'_>, span: &Option<Span>) -> fmt::Result {
    match span {
        Some(span) => write!(f, " at {}", span),
        None => Ok(()),
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::UnboundName { name, span } => {
                write!(f, "Unbound name '{}'", name)?;
                write_span(f, span)
            }
            RuntimeError::NoMatchingOverload { symbol, tags, span } => {
                let observed: Vec<String> = tags.iter().map(|t| t.to_string()).collect();
                write!(
                    f,
                    "No matching overload for '{}' with arguments ({})",
                    symbol,
                    observed.join(", ")
                )?;
                write_span(f, span)
            }
            RuntimeError::TypeMismatch {
                expected,
                got,
                span,
            } => {
                write!(f, "Expected {}, got {}", expected, got)?;
                write_span(f, span)
            }
            RuntimeError::Overflow { operation, span } => {
                write!(f, "Integer overflow in {}", operation)?;
                write_span(f, span)
            }
            RuntimeError::DivisionByZero { operation, span } => {
                write!(f, "Division by zero in {}", operation)?;
                write_span(f, span)
            }
            RuntimeError::Domain { message, span } => {
                write!(f, "{}", message)?;
                write_span(f, span)
            }
            RuntimeError::Storage { message } => {
                write!(f, "Storage failure: {}", message)
            }
        }
    }
}

impl std::error::Error for RuntimeError {}
