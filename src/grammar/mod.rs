//! SQL DDL grammar.
//!
//! Parses a schema dump into a flat list of [`syntax::Statement`]s. Only
//! `CREATE TABLE` and `ALTER TABLE ... ADD CONSTRAINT ... FOREIGN KEY` are
//! parsed structurally; every other statement is kept as raw text so the
//! caller can skip it.

mod cursor;
pub mod parse;
pub mod syntax;

pub use parse::{MAX_PAREN_DEPTH, parse};

/// Fatal error returned by [`parse`]. Positions are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A recognized statement is malformed after its prefix.
    #[error("syntax error at line {line}, column {column}: expected {expected}, found {found}")]
    Syntax {
        line: usize,
        column: usize,
        expected: String,
        found: String,
    },
    /// Input ended inside a statement, string, comment or parenthesized group.
    #[error("unterminated {what} starting at line {line}, column {column}")]
    Unterminated { what: &'static str, line: usize, column: usize },
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
