//! PHP front end: a grammar-checked parser that splits a template into
//! statements, and a printer for the statements the generator builds.
//!
//! Template statements are never re-printed. The parser keeps each one as the
//! exact source slice it came from ([`Verbatim`]), so rendering an unmodified
//! [`Document`] reproduces the template byte-for-byte. Only nodes appended
//! after parsing go through the pretty printer.
//!
//! Parsing uses the `tree-sitter-php` grammar. A template is accepted only
//! when its syntax tree holds no error or missing node.

mod ast;
mod parse;
mod print;

pub use ast::{ArrayItem, Comment, Document, Expr, IncludeKind, Scalar, Stmt, Verbatim};
pub use parse::parse;

use thiserror::Error;

/// A template that is not valid PHP.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseError {
    message: String,
    line: usize,
}

impl ParseError {
    pub(crate) fn unexpected(what: &str, line: usize) -> Self {
        Self {
            message: format!("Syntax error, unexpected {what} on line {line}"),
            line,
        }
    }

    /// The PHP grammar could not be loaded or run. Not tied to a line.
    pub(crate) fn grammar(reason: &str) -> Self {
        Self {
            message: format!("PHP grammar unavailable: {reason}"),
            line: 0,
        }
    }

    /// Human-readable description, including the line number.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// 1-indexed line the error was detected on, or 0 when the grammar failed.
    pub fn line(&self) -> usize {
        self.line
    }
}
