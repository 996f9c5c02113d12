//! # Introduction
//!
//! clike lexes, parses, checks and executes programs written in a small C-like
//! language: `int`/`float`/`char`/`string` variables, fixed-size arrays,
//! functions, `if`/`while`/`for`, `print`, and `#include` of other source
//! files.
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Lexer → Parser (+ includes) → AST → SemanticAnalyzer → Interpreter → output lines
//! ```
//!
//! 1. [`parser`]: tokenises the source, resolves `#include`s and builds an AST.
//! 2. [`semantic`]: lexical scope checking, call arity and the float-to-int guard.
//! 3. [`interpreter`]: walks the AST over a call stack of activation records.
//! 4. [`memory`]: runtime [`memory::value::Value`]s and the
//!    [`memory::stack::CallStack`].
//! 5. [`diagnostics`]: opt-in scope, stack and debug tracing.
//! 6. [`pipeline`]: runs every stage and tags failures with their stage.
//!
//! ## Example
//!
//! ```
//! use clike::diagnostics::TraceConfig;
//! use clike::parser::includes::MemoryLoader;
//! use std::path::Path;
//!
//! let source = "int main() { int x = 5; x = x + 3; print(x); }";
//! let output = clike::run_source(source, Path::new("."), &MemoryLoader::new(), TraceConfig::default()).unwrap();
//! assert_eq!(output, vec!["8"]);
//! ```

pub mod diagnostics;
pub mod interpreter;
pub mod memory;
pub mod parser;
pub mod pipeline;
pub mod semantic;

pub use pipeline::{run_file, run_source, Error};
