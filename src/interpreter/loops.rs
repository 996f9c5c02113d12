//! Loop statement execution (`while`, `for`).
//!
//! A `return` inside a loop body ends the loop immediately and its [`Flow`] is
//! handed back to the enclosing statement. There is no `break` or `continue`.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::interpreter::jumps::Flow;
use crate::parser::ast::{Expr, Stmt};

impl Interpreter<'_> {
    /// Executes a `while (condition) body` loop.
    ///
    /// The condition is evaluated before each iteration.
    pub(crate) fn execute_while(
        &mut self,
        condition: &Expr,
        body: &Stmt,
    ) -> Result<Flow, RuntimeError> {
        while self.evaluate_expr(condition)?.is_truthy() {
            let flow = self.execute_statement(body)?;
            if flow.is_return() {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    /// Executes a `for (init; condition; post) body` loop.
    ///
    /// `init` runs once; `post` runs after every completed body. Both are plain
    /// statements (possibly a grouped compound, possibly empty).
    pub(crate) fn execute_for(
        &mut self,
        init: &Stmt,
        condition: &Expr,
        post: &Stmt,
        body: &Stmt,
    ) -> Result<Flow, RuntimeError> {
        self.execute_statement(init)?;

        while self.evaluate_expr(condition)?.is_truthy() {
            let flow = self.execute_statement(body)?;
            if flow.is_return() {
                return Ok(flow);
            }
            self.execute_statement(post)?;
        }
        Ok(Flow::Normal)
    }
}
