//! Expression evaluation
//!
//! Operands are always evaluated left to right, and both sides of `&&`/`||`
//! are evaluated. Operator semantics live in `ops::binary` and `ops::unary`.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::stack::Member;
use crate::memory::value::Value;
use crate::parser::ast::*;

impl Interpreter<'_> {
    pub(crate) fn evaluate_expr(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Num(Number::Int(n), _) => Ok(Value::Int(*n)),
            Expr::Num(Number::Float(x), _) => Ok(Value::Float(*x)),
            Expr::Str(s, _) => Ok(Value::Str(s.clone())),
            Expr::Char(c, _) => Ok(Value::Char(*c)),

            Expr::Var { name, location } => self.read_variable(name, *location),

            Expr::ArrayAccess {
                name,
                index,
                location,
            } => {
                let index = self.evaluate_expr(index)?;
                self.read_element(name, &index, *location)
            }

            Expr::Binary {
                op,
                left,
                right,
                location,
            } => {
                let left = self.evaluate_expr(left)?;
                let right = self.evaluate_expr(right)?;
                self.binary_op(*op, &left, &right, *location)
            }

            Expr::Unary {
                op,
                operand,
                location,
            } => {
                let value = self.evaluate_expr(operand)?;
                self.unary_op(*op, &value, *location)
            }

            Expr::Call(call) => self.call_function(call),
        }
    }

    /// Current-record lookup; unbound names read as [`Value::Void`]
    fn read_variable(&self, name: &str, location: SourceLocation) -> Result<Value, RuntimeError> {
        match self.stack.peek().and_then(|record| record.get(name)) {
            Some(Member::Value(value)) => Ok(value.clone()),
            Some(Member::Function(_)) => Err(RuntimeError::TypeError {
                message: format!("function '{}' used as a value", name),
                location,
            }),
            None => Ok(Value::Void),
        }
    }
}
