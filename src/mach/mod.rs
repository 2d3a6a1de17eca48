/*!
## Rust Machine Module

This Rust module maps tokens to operations and executes them
on a stack-based virtual machine.

*/

pub type Address = usize;

mod function;
pub mod host;
mod link;
mod opcode;
mod operation;
mod program;
mod runtime;
mod stack;
mod val;
mod var;

pub use function::{Body, Function};
pub use host::{Console, ProgramSource};
pub use link::Link;
pub use opcode::Opcode;
pub use operation::Operation;
pub use program::Program;
pub use runtime::{Event, Runtime, INPUT_PROMPT};
pub use stack::Stack;
pub use val::{format_number, parse_number, Val};
pub use var::{Scope, Var};
