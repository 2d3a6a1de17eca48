//! # funny
//!
//! A small stack-based scripting language. Words are separated by
//! whitespace, arithmetic is postfix, and programs are built from
//! variables, functions, conditionals, loops, and file attachment.
//!
//! Run a program by passing its path to the executable.
//! ```text
//! $ funny hello.funny
//! Hello World
//! ```
//!
//! The language itself is described in the introduction chapter.

#[path = "doc/introduction.rs"]
#[allow(non_snake_case)]
pub mod _Introduction;

pub mod lang;
pub mod mach;
pub mod term;
