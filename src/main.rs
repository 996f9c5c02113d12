// clike: run a C-like program from the command line

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use crossterm::style::Stylize;

use clike::diagnostics::{TraceConfig, Tracer};
use clike::interpreter::Terminal;
use clike::pipeline::{on_worker_stack, run_file_with};

/// Interpreter for a small C-like language
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Source file to run; `#include`s resolve next to it
    file: PathBuf,

    /// Print each symbol table when its scope closes
    #[arg(long)]
    scope: bool,

    /// Print the call stack on every program/function enter and leave
    #[arg(long)]
    stack: bool,

    /// Trace parser, analyzer and interpreter steps
    #[arg(long)]
    debug: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let config = TraceConfig {
        scope: args.scope,
        stack: args.stack,
        debug: args.debug,
        ..TraceConfig::default()
    };

    let outcome = on_worker_stack(|| {
        let tracer = Tracer::console(config);
        run_file_with(&args.file, &tracer, Terminal::echoing())
    });

    match outcome {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            let message = err.to_string();
            if io::stderr().is_terminal() {
                eprintln!("{}", message.red());
            } else {
                eprintln!("{}", message);
            }
            ExitCode::FAILURE
        }
    }
}
