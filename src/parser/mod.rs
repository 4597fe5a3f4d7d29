//! Glyph-language source parser
//!
//! This module turns annotated source text into an executable syntax forest:
//! - [`lexer`]: tokenization (source text → value / symbol / block-end tokens)
//! - [`ast`]: arity-directed tree building (tokens → syntax forest)
//!
//! # Arity-directed parsing
//!
//! Tokenization is ordinary left-to-right scanning, but tree building is
//! not context free: how many of the following nodes belong to a glyph is
//! decided by that glyph's registered arity. The tree builder therefore
//! consults the command registry for every symbol token, and an unregistered
//! symbol is a parse error, not a runtime one.

pub mod ast;
pub mod lexer;

use std::fmt;

/// Half-open span of character offsets into the comment-stripped source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "columns {}-{}", self.start, self.end)
    }
}

/// Errors raised while building the syntax forest.
///
/// Both variants are fatal: without an arity for every symbol the stream
/// cannot even be segmented, and a truncated program has no meaningful
/// partial tree.
#[derive(Debug, Clone)]
pub enum ParseError {
    /// A symbol token has no entry in the command registry.
    UnknownSymbol { symbol: char, span: Span },

    /// The token stream ran out while a command was still owed inline or
    /// function children.
    UnexpectedEndOfProgram { symbol: char, span: Span },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnknownSymbol { symbol, span } => {
                write!(f, "Unknown symbol '{}' at {}", symbol, span)
            }
            ParseError::UnexpectedEndOfProgram { symbol, span } => {
                write!(
                    f,
                    "Unexpected end of program while parsing '{}' at {}",
                    symbol, span
                )
            }
        }
    }
}

impl std::error::Error for ParseError {}
