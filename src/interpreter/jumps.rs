//! `return` handling
//!
//! Statement execution yields a [`Flow`] instead of unwinding through a panic or
//! exception: a `Return` bubbles up through compounds, branches and loops until
//! a function call consumes it. The program level treats an unconsumed
//! `Return` as fatal.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::value::Value;
use crate::parser::ast::{Expr, SourceLocation};

/// How a statement finished
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Flow {
    /// Fall through to the next statement
    Normal,
    /// Unwind to the nearest call boundary
    Return {
        value: Option<Value>,
        location: SourceLocation,
    },
}

impl Flow {
    pub(crate) fn is_return(&self) -> bool {
        matches!(self, Flow::Return { .. })
    }
}

impl Interpreter<'_> {
    pub(crate) fn execute_return(
        &mut self,
        expr: Option<&Expr>,
        location: SourceLocation,
    ) -> Result<Flow, RuntimeError> {
        let value = match expr {
            Some(expr) => Some(self.evaluate_expr(expr)?),
            None => None,
        };
        self.tracer.debug(|| match &value {
            Some(v) => format!("Interpreter: Return {}", v),
            None => "Interpreter: Return".to_string(),
        });
        Ok(Flow::Return { value, location })
    }
}
