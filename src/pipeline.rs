//! Front-to-back driver: parse, analyze, execute
//!
//! [`run_source`] is the embeddable entry point; [`run_file`] reads an entry
//! file from disk and resolves its includes next to it. Both return the
//! program's printed lines, and every failure is tagged with the stage that
//! produced it.

use crate::diagnostics::{TraceConfig, Tracer};
use crate::interpreter::{Interpreter, RuntimeError, Terminal};
use crate::parser::ast::Program;
use crate::parser::includes::{FsLoader, IncludeContext, SourceLoader};
use crate::parser::{ParseError, Parser};
use crate::semantic::{SemanticAnalyzer, SemanticError};
use std::fmt;
use std::fs;
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::thread;

/// Stack size of the thread a program runs on. Parsing, analysis and
/// execution all recurse over the AST, so call depth is bounded by this.
pub const WORKER_STACK_SIZE: usize = 256 * 1024 * 1024;

/// Any failure of the pipeline
#[derive(Debug)]
pub enum Error {
    /// The entry file could not be read
    Io { path: PathBuf, source: io::Error },
    /// The worker thread could not be spawned
    Thread(io::Error),
    Parse(ParseError),
    Semantic(SemanticError),
    Runtime(RuntimeError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io { path, source } => {
                write!(f, "Error: File '{}' not found ({})", path.display(), source)
            }
            Error::Thread(err) => write!(f, "Error: cannot start interpreter thread ({})", err),
            Error::Parse(err) => write!(f, "Error during parsing: {}", err),
            Error::Semantic(err) => write!(f, "Error during semantic analysis: {}", err),
            Error::Runtime(err) => write!(f, "Error during execution: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            Error::Thread(err) => Some(err),
            Error::Parse(err) => Some(err),
            Error::Semantic(err) => Some(err),
            Error::Runtime(err) => Some(err),
        }
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::Parse(err)
    }
}

impl From<SemanticError> for Error {
    fn from(err: SemanticError) -> Self {
        Error::Semantic(err)
    }
}

impl From<RuntimeError> for Error {
    fn from(err: RuntimeError) -> Self {
        Error::Runtime(err)
    }
}

/// Parse `source`, resolving includes through `includes`
pub fn parse_source(
    source: &str,
    includes: &mut IncludeContext<'_>,
    tracer: &Tracer,
) -> Result<Program, ParseError> {
    tracer.debug(|| "Main: Starting lexer and parser");
    Parser::with_tracer(source, tracer.clone())?.parse_program_with(includes)
}

/// Run `job` on a scoped thread with a [`WORKER_STACK_SIZE`] stack.
/// A panic on the worker is resumed on the caller.
pub fn on_worker_stack<T, F>(job: F) -> Result<T, Error>
where
    F: FnOnce() -> Result<T, Error> + Send,
    T: Send,
{
    thread::scope(|scope| {
        let handle = thread::Builder::new()
            .name("clike".to_string())
            .stack_size(WORKER_STACK_SIZE)
            .spawn_scoped(scope, job)
            .map_err(Error::Thread)?;
        handle
            .join()
            .unwrap_or_else(|payload| panic::resume_unwind(payload))
    })
}

/// Run a program held in memory. Includes resolve against `base_dir` through `loader`.
pub fn run_source(
    source: &str,
    base_dir: &Path,
    loader: &dyn SourceLoader,
    config: TraceConfig,
) -> Result<Vec<String>, Error> {
    on_worker_stack(|| {
        let tracer = Tracer::console(config);
        let mut includes = IncludeContext::new(base_dir, loader);
        execute(source, &mut includes, &tracer, Terminal::new())
    })
}

/// Read `path` and run it, resolving includes next to it
pub fn run_file(path: &Path, config: TraceConfig) -> Result<Vec<String>, Error> {
    on_worker_stack(|| run_file_with(path, &Tracer::console(config), Terminal::new()))
}

/// [`run_file`] with an explicit tracer and output terminal, on the calling thread
pub fn run_file_with(path: &Path, tracer: &Tracer, terminal: Terminal) -> Result<Vec<String>, Error> {
    let source = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracer.debug(|| format!("Main: Reading input file '{}'", path.display()));

    let loader = FsLoader;
    let mut includes = IncludeContext::for_entry(path, &loader);
    execute(&source, &mut includes, tracer, terminal)
}

/// Parse, analyze and interpret on the calling thread; each stage only runs
/// if the previous one succeeded
pub fn execute(
    source: &str,
    includes: &mut IncludeContext<'_>,
    tracer: &Tracer,
    terminal: Terminal,
) -> Result<Vec<String>, Error> {
    let program = parse_source(source, includes, tracer)?;

    tracer.debug(|| "Main: Starting semantic analysis");
    SemanticAnalyzer::new(tracer.clone()).analyze(&program)?;

    tracer.debug(|| "Main: Starting interpreter");
    let mut interpreter = Interpreter::with_terminal(tracer.clone(), terminal);
    interpreter.run(&program)?;
    tracer.debug(|| "Main: Interpretation completed");

    Ok(interpreter.into_terminal().into_output())
}
