/*!
# Rust Language Module

This Rust module provides lexical analysis of the funny language
and the error type shared by every stage of the interpreter.

*/

/// Character range of a token within its source line.
pub type Column = std::ops::Range<usize>;

/// One-based line number within a source file.
pub type Row = usize;

#[macro_use]
mod error;
mod lex;
mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use lex::{lex, lex_lines, Lexer};
pub use token::{Location, Token};
