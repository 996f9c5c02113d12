//! Statement execution
//!
//! Adds the statement dispatcher to [`Interpreter`]. Loops live in `loops`,
//! `return` in `jumps`, assignment and element access in `ops`.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::interpreter::jumps::Flow;
use crate::memory::value::Value;
use crate::parser::ast::*;

impl Interpreter<'_> {
    pub(crate) fn execute_statement(&mut self, stmt: &Stmt) -> Result<Flow, RuntimeError> {
        match stmt {
            Stmt::VarDecl { name, var_type, .. } => {
                self.tracer.debug(|| {
                    format!("Interpreter: Declared {} of type {}", name, var_type)
                });
                self.bind(name, Value::default_for(*var_type));
                Ok(Flow::Normal)
            }

            Stmt::ArrayDecl {
                name,
                elem_type,
                size,
                location,
            } => {
                self.tracer.debug(|| {
                    format!(
                        "Interpreter: Declared array {} of type {} size {}",
                        name, elem_type, size
                    )
                });
                let array = Value::array_of(*elem_type, *size).ok_or_else(|| {
                    RuntimeError::ArrayTooLarge {
                        name: name.clone(),
                        size: *size,
                        location: *location,
                    }
                })?;
                self.bind(name, array);
                Ok(Flow::Normal)
            }

            Stmt::Assign { target, value, .. } => {
                self.execute_assignment(target, value)?;
                Ok(Flow::Normal)
            }

            Stmt::Compound(compound) => self.execute_compound(compound),

            Stmt::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                if self.evaluate_expr(condition)?.is_truthy() {
                    self.execute_statement(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute_statement(else_branch)
                } else {
                    Ok(Flow::Normal)
                }
            }

            Stmt::While {
                condition, body, ..
            } => self.execute_while(condition, body),

            Stmt::For {
                init,
                condition,
                post,
                body,
                ..
            } => self.execute_for(init, condition, post, body),

            Stmt::Print { expr, location } => {
                let value = self.evaluate_expr(expr)?;
                self.terminal
                    .print(value.to_string(), *location)
                    .map_err(|err| RuntimeError::OutputFailed {
                        message: err.to_string(),
                        location: *location,
                    })?;
                Ok(Flow::Normal)
            }

            Stmt::Return { expr, location } => self.execute_return(expr.as_ref(), *location),

            Stmt::Call(call) => {
                self.call_function(call)?;
                Ok(Flow::Normal)
            }

            Stmt::NoOp => Ok(Flow::Normal),
        }
    }

    /// Run children in order, stopping at the first `return`
    pub(crate) fn execute_compound(&mut self, compound: &Compound) -> Result<Flow, RuntimeError> {
        for child in &compound.children {
            let flow = self.execute_statement(child)?;
            if flow.is_return() {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    /// Bind `name` in the current record
    pub(crate) fn bind(&mut self, name: &str, value: Value) {
        if let Some(record) = self.stack.peek_mut() {
            record.set(name, value);
        }
    }
}
