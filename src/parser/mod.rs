//! clike source code parser
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parser state, program entry point and `#include` handling
//! - [`includes`]: Include path resolution and source loading
//! - [`ast`]: AST node definitions
//!
//! # Supported Language
//!
//! - Types: `int`, `float`, `char`, `string`, `void`, fixed-size arrays
//! - Statements: declarations, assignments, `if`/`else`, `while`, `for`,
//!   `print`, `return`, function calls
//! - Expressions: arithmetic, comparison, logical `&&`/`||`, unary `+`/`-`
//! - `#include "file"` pulls function definitions out of other files
//! - No pointers, structs, globals, or escape sequences in literals
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser, one function per precedence level.
//! No external parser generator dependencies.

pub mod ast;
pub mod includes;
pub mod lexer;
pub mod parse;

mod declarations;
mod expressions;
mod statements;

pub use parse::{ParseError, Parser};
