//! Diagnostic tracing
//!
//! Purely observational output about what the pipeline is doing. Nothing here
//! influences program semantics; a disabled [`Tracer`] formats nothing.
//!
//! Three independent channels mirror the command-line flags:
//! - [`Channel::Scope`]: symbol table dumps when an analyzer scope closes
//! - [`Channel::Stack`]: activation record dumps on program/function enter and leave
//! - [`Channel::Debug`]: verbose step tracing from the parser, analyzer and interpreter

use crossterm::style::Stylize;
use std::cell::RefCell;
use std::fmt;
use std::io::{self, IsTerminal};
use std::rc::Rc;

/// Default limit on nested user function calls
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1000;

/// Which diagnostics are enabled, plus the runtime call-depth guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceConfig {
    pub scope: bool,
    pub stack: bool,
    pub debug: bool,
    pub max_call_depth: usize,
}

impl TraceConfig {
    pub fn enabled(&self, channel: Channel) -> bool {
        match channel {
            Channel::Scope => self.scope,
            Channel::Stack => self.stack,
            Channel::Debug => self.debug,
        }
    }
}

impl Default for TraceConfig {
    fn default() -> Self {
        TraceConfig {
            scope: false,
            stack: false,
            debug: false,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

/// Diagnostic channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Scope,
    Stack,
    Debug,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Scope => write!(f, "scope"),
            Channel::Stack => write!(f, "stack"),
            Channel::Debug => write!(f, "debug"),
        }
    }
}

/// Destination for trace output
pub trait TraceSink {
    fn emit(&mut self, channel: Channel, text: &str);
}

/// Discards everything
#[derive(Debug, Default)]
pub struct NullSink;

impl TraceSink for NullSink {
    fn emit(&mut self, _channel: Channel, _text: &str) {}
}

/// Writes traces to stderr, keeping stdout for program output.
/// Tags are coloured only when stderr is a terminal.
#[derive(Debug)]
pub struct ConsoleSink {
    colored: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        ConsoleSink {
            colored: io::stderr().is_terminal(),
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl TraceSink for ConsoleSink {
    fn emit(&mut self, channel: Channel, text: &str) {
        let tag = format!("[{}]", channel);
        let tag = match channel {
            Channel::Scope => tag.cyan(),
            Channel::Stack => tag.magenta(),
            Channel::Debug => tag.dark_grey(),
        };
        for line in text.lines() {
            if self.colored {
                eprintln!("{} {}", tag, line);
            } else {
                eprintln!("{} {}", tag.content(), line);
            }
        }
    }
}

/// Collects every entry in memory
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub entries: Vec<(Channel, String)>,
}

impl RecordingSink {
    /// All entries emitted on one channel, in order
    pub fn channel(&self, channel: Channel) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(c, _)| *c == channel)
            .map(|(_, text)| text.as_str())
            .collect()
    }
}

impl TraceSink for RecordingSink {
    fn emit(&mut self, channel: Channel, text: &str) {
        self.entries.push((channel, text.to_string()));
    }
}

/// Shared handle to a sink, gated by a [`TraceConfig`]
#[derive(Clone)]
pub struct Tracer {
    config: TraceConfig,
    sink: Rc<RefCell<dyn TraceSink>>,
}

impl Tracer {
    pub fn new(config: TraceConfig, sink: Rc<RefCell<dyn TraceSink>>) -> Self {
        Tracer { config, sink }
    }

    /// Tracer writing enabled channels to stderr
    pub fn console(config: TraceConfig) -> Self {
        Self::new(config, Rc::new(RefCell::new(ConsoleSink::new())))
    }

    /// Tracer with every channel off
    pub fn disabled() -> Self {
        Self::new(TraceConfig::default(), Rc::new(RefCell::new(NullSink)))
    }

    pub fn config(&self) -> &TraceConfig {
        &self.config
    }

    /// Emit on `channel`; `message` only runs when the channel is on
    pub fn trace<F, S>(&self, channel: Channel, message: F)
    where
        F: FnOnce() -> S,
        S: AsRef<str>,
    {
        if self.config.enabled(channel) {
            let text = message();
            self.sink.borrow_mut().emit(channel, text.as_ref());
        }
    }

    pub fn debug<F, S>(&self, message: F)
    where
        F: FnOnce() -> S,
        S: AsRef<str>,
    {
        self.trace(Channel::Debug, message);
    }
}

impl Default for Tracer {
    fn default() -> Self {
        Self::disabled()
    }
}

impl fmt::Debug for Tracer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracer").field("config", &self.config).finish()
    }
}
