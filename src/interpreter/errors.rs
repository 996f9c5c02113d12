//! Runtime error types for the interpreter
//!
//! This module defines [`RuntimeError`], which represents all errors that can occur
//! during program execution (as opposed to parse or semantic errors).
//!
//! All runtime errors are fatal - they halt execution and unwind every frame.

use crate::parser::ast::SourceLocation;
use std::fmt;

/// Runtime errors that can occur during execution
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// Division with a zero divisor (int or float)
    DivisionByZero { location: SourceLocation },

    /// Array index outside `0..len`, or not an integer at all
    IndexOutOfBounds {
        name: String,
        index: String,
        location: SourceLocation,
    },

    /// Array declaration whose storage cannot be allocated
    ArrayTooLarge {
        name: String,
        size: usize,
        location: SourceLocation,
    },

    /// Indexed a name that is not bound to an array in the current frame
    NotAnArray {
        name: String,
        location: SourceLocation,
    },

    /// No frame holds a function with this name
    UndefinedFunction {
        name: String,
        location: SourceLocation,
    },

    /// `return` executed outside any function body
    ReturnOutsideFunction { location: SourceLocation },

    /// Operator applied to operands it does not support
    TypeError {
        message: String,
        location: SourceLocation,
    },

    /// Integer overflow in arithmetic operation
    IntegerOverflow {
        operation: String,
        location: SourceLocation,
    },

    /// Echoing a `print` line to the output stream failed
    OutputFailed {
        message: String,
        location: SourceLocation,
    },

    /// Nested calls exceeded the configured call depth
    StackOverflow {
        name: String,
        depth: usize,
        location: SourceLocation,
    },
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::DivisionByZero { location } => {
                write!(f, "Division by zero at line {}", location.line)
            }
            RuntimeError::IndexOutOfBounds {
                name,
                index,
                location,
            } => {
                write!(
                    f,
                    "Index {} out of bounds for array '{}' at line {}",
                    index, name, location.line
                )
            }
            RuntimeError::ArrayTooLarge {
                name,
                size,
                location,
            } => {
                write!(
                    f,
                    "Array '{}' of size {} is too large at line {}",
                    name, size, location.line
                )
            }
            RuntimeError::NotAnArray { name, location } => {
                write!(f, "'{}' is not an array at line {}", name, location.line)
            }
            RuntimeError::UndefinedFunction { name, location } => {
                write!(
                    f,
                    "Function '{}' not found at line {}",
                    name, location.line
                )
            }
            RuntimeError::ReturnOutsideFunction { location } => {
                write!(
                    f,
                    "Return outside of a function at line {}",
                    location.line
                )
            }
            RuntimeError::TypeError { message, location } => {
                write!(f, "Type error at line {}: {}", location.line, message)
            }
            RuntimeError::IntegerOverflow {
                operation,
                location,
            } => {
                write!(
                    f,
                    "Integer overflow in operation: {} at line {}",
                    operation, location.line
                )
            }
            RuntimeError::OutputFailed { message, location } => {
                write!(f, "Cannot write output at line {}: {}", location.line, message)
            }
            RuntimeError::StackOverflow {
                name,
                depth,
                location,
            } => {
                write!(
                    f,
                    "Stack overflow calling '{}' at line {}: call depth limit {} exceeded",
                    name, location.line, depth
                )
            }
        }
    }
}

impl std::error::Error for RuntimeError {}
