//! Semantic analysis error types

use crate::parser::ast::SourceLocation;
use std::fmt;

/// Errors raised while checking a parsed program. The first one aborts analysis.
#[derive(Debug, Clone, PartialEq)]
pub enum SemanticError {
    /// Name does not resolve through the scope chain (or a call target is not a function)
    IdNotFound {
        name: String,
        location: SourceLocation,
    },

    /// Call site passes a different number of arguments than the function declares
    ArgCountMismatch {
        name: String,
        expected: usize,
        got: usize,
        location: SourceLocation,
    },

    /// Float literal assigned straight into an `int` variable
    FloatToInt {
        name: String,
        location: SourceLocation,
    },
}

impl SemanticError {
    pub fn location(&self) -> SourceLocation {
        match self {
            SemanticError::IdNotFound { location, .. }
            | SemanticError::ArgCountMismatch { location, .. }
            | SemanticError::FloatToInt { location, .. } => *location,
        }
    }
}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let location = self.location();
        write!(
            f,
            "Semantic error at line {}, column {}: ",
            location.line, location.column
        )?;
        match self {
            SemanticError::IdNotFound { name, .. } => {
                write!(f, "Identifier not found: '{}'", name)
            }
            SemanticError::ArgCountMismatch {
                name,
                expected,
                got,
                ..
            } => write!(
                f,
                "Wrong number of arguments to '{}': expected {}, got {}",
                name, expected, got
            ),
            SemanticError::FloatToInt { name, .. } => {
                write!(f, "Cannot assign float to int variable '{}'", name)
            }
        }
    }
}

impl std::error::Error for SemanticError {}
