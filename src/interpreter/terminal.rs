//! Program output capture

use crate::parser::ast::SourceLocation;
use std::fmt;
use std::io::{self, Write};

/// A line of program output with the location of the `print` that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct TerminalLine {
    pub text: String,
    pub location: SourceLocation,
}

/// Collects `print` output, optionally echoing each line to a writer as it is produced
#[derive(Default)]
pub struct Terminal {
    pub lines: Vec<TerminalLine>,
    echo: Option<Box<dyn Write + Send>>,
}

impl fmt::Debug for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Terminal")
            .field("lines", &self.lines)
            .field("echo", &self.echo.is_some())
            .finish()
    }
}

impl Terminal {
    pub fn new() -> Self {
        Terminal::default()
    }

    /// Terminal that also writes every line to stdout
    pub fn echoing() -> Self {
        Self::echoing_to(io::stdout())
    }

    pub fn echoing_to(out: impl Write + Send + 'static) -> Self {
        Terminal {
            lines: Vec::new(),
            echo: Some(Box::new(out)),
        }
    }

    /// Record a line and echo it. The line is kept even when the echo fails;
    /// after a failed write the terminal stops echoing.
    pub fn print(&mut self, text: String, location: SourceLocation) -> io::Result<()> {
        let echoed = match self.echo.as_mut() {
            Some(out) => writeln!(out, "{}", text).and_then(|()| out.flush()),
            None => Ok(()),
        };
        if echoed.is_err() {
            self.echo = None;
        }
        self.lines.push(TerminalLine { text, location });
        echoed
    }

    /// Get all lines as a vector of strings
    pub fn get_output(&self) -> Vec<String> {
        self.lines.iter().map(|line| line.text.clone()).collect()
    }

    pub fn into_output(self) -> Vec<String> {
        self.lines.into_iter().map(|line| line.text).collect()
    }
}
