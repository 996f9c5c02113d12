//! clike execution engine
//!
//! This module provides the core execution logic:
//! - [`engine`]: Interpreter state, program entry and function calls
//! - [`errors`]: Runtime error types
//! - [`terminal`]: Captured `print` output
//!
//! # Execution Model
//!
//! The interpreter walks the AST directly. The program gets one activation
//! record named `global`; every call pushes a record one level deeper than
//! its caller. Statements report how they finished through a `Flow` value so
//! `return` can unwind to its call without exceptions.
//!
//! Statement, loop, expression and operator handling are split across the
//! remaining files as `impl Interpreter` blocks.

pub mod engine;
pub mod errors;
pub mod terminal;

mod expressions;
mod jumps;
mod loops;
mod ops;
mod statements;

pub use engine::Interpreter;
pub use errors::RuntimeError;
pub use terminal::Terminal;
