//! Binary operator semantics
//!
//! Operand classes:
//! - numeric: `int`, `float` and `bool` (as 0/1); any float operand promotes
//!   the operation to float, otherwise it is checked 64-bit integer math
//! - text: `string` and `char`; `+` concatenates any two text values
//!
//! `/` is always real division. Equality across unrelated classes is simply
//! false, while ordering across them is a type error.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::value::Value;
use crate::parser::ast::{BinOp, SourceLocation};
use std::cmp::Ordering;

/// Numeric view of a value
#[derive(Debug, Clone, Copy)]
enum Numeric {
    Int(i64),
    Float(f64),
}

impl Numeric {
    fn of(value: &Value) -> Option<Numeric> {
        match value {
            Value::Int(n) => Some(Numeric::Int(*n)),
            Value::Float(x) => Some(Numeric::Float(*x)),
            Value::Bool(b) => Some(Numeric::Int(*b as i64)),
            _ => None,
        }
    }

    fn as_f64(self) -> f64 {
        match self {
            Numeric::Int(n) => n as f64,
            Numeric::Float(x) => x,
        }
    }

    fn is_zero(self) -> bool {
        match self {
            Numeric::Int(n) => n == 0,
            Numeric::Float(x) => x == 0.0,
        }
    }
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::Str(s) => Some(s.clone()),
        Value::Char(c) => Some(c.to_string()),
        _ => None,
    }
}

impl Interpreter<'_> {
    pub(crate) fn binary_op(
        &self,
        op: BinOp,
        left: &Value,
        right: &Value,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        match op {
            BinOp::Add => {
                if let (Some(a), Some(b)) = (text_of(left), text_of(right)) {
                    return Ok(Value::Str(a + &b));
                }
                self.arithmetic(op, left, right, location)
            }
            BinOp::Sub | BinOp::Mul => self.arithmetic(op, left, right, location),
            BinOp::Div => self.divide(left, right, location),
            BinOp::Eq => Ok(Value::Bool(values_equal(left, right))),
            BinOp::Ne => Ok(Value::Bool(!values_equal(left, right))),
            BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => {
                let ordering = compare(left, right).ok_or_else(|| {
                    operand_error(op, left, right, location)
                })?;
                let result = match op {
                    BinOp::Lt => ordering == Ordering::Less,
                    BinOp::Le => ordering != Ordering::Greater,
                    BinOp::Gt => ordering == Ordering::Greater,
                    _ => ordering != Ordering::Less,
                };
                Ok(Value::Bool(result))
            }
            BinOp::And => Ok(Value::Bool(left.is_truthy() && right.is_truthy())),
            BinOp::Or => Ok(Value::Bool(left.is_truthy() || right.is_truthy())),
        }
    }

    /// `+ - *` on numeric operands
    fn arithmetic(
        &self,
        op: BinOp,
        left: &Value,
        right: &Value,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let (a, b) = match (Numeric::of(left), Numeric::of(right)) {
            (Some(a), Some(b)) => (a, b),
            _ => return Err(operand_error(op, left, right, location)),
        };

        match (a, b) {
            (Numeric::Int(a), Numeric::Int(b)) => {
                let result = match op {
                    BinOp::Add => a.checked_add(b),
                    BinOp::Sub => a.checked_sub(b),
                    _ => a.checked_mul(b),
                };
                result
                    .map(Value::Int)
                    .ok_or_else(|| RuntimeError::IntegerOverflow {
                        operation: format!("{} {} {}", a, op.symbol(), b),
                        location,
                    })
            }
            (a, b) => {
                let (a, b) = (a.as_f64(), b.as_f64());
                let result = match op {
                    BinOp::Add => a + b,
                    BinOp::Sub => a - b,
                    _ => a * b,
                };
                Ok(Value::Float(result))
            }
        }
    }

    fn divide(
        &self,
        left: &Value,
        right: &Value,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let (a, b) = match (Numeric::of(left), Numeric::of(right)) {
            (Some(a), Some(b)) => (a, b),
            _ => return Err(operand_error(BinOp::Div, left, right, location)),
        };
        if b.is_zero() {
            return Err(RuntimeError::DivisionByZero { location });
        }
        Ok(Value::Float(a.as_f64() / b.as_f64()))
    }
}

fn values_equal(left: &Value, right: &Value) -> bool {
    if let (Some(a), Some(b)) = (Numeric::of(left), Numeric::of(right)) {
        return match (a, b) {
            (Numeric::Int(a), Numeric::Int(b)) => a == b,
            (a, b) => a.as_f64() == b.as_f64(),
        };
    }
    if let (Some(a), Some(b)) = (text_of(left), text_of(right)) {
        return a == b;
    }
    match (left, right) {
        (Value::Array(a), Value::Array(b)) => {
            let (a, b) = (a.borrow(), b.borrow());
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| values_equal(x, y))
        }
        (Value::Void, Value::Void) => true,
        _ => false,
    }
}

/// Ordering for numeric or text pairs; `None` for anything else (and NaN)
fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    if let (Some(a), Some(b)) = (Numeric::of(left), Numeric::of(right)) {
        return match (a, b) {
            (Numeric::Int(a), Numeric::Int(b)) => Some(a.cmp(&b)),
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        };
    }
    if let (Some(a), Some(b)) = (text_of(left), text_of(right)) {
        return Some(a.cmp(&b));
    }
    None
}

fn operand_error(op: BinOp, left: &Value, right: &Value, location: SourceLocation) -> RuntimeError {
    RuntimeError::TypeError {
        message: format!(
            "unsupported operands for '{}': {} and {}",
            op.symbol(),
            left.type_name(),
            right.type_name()
        ),
        location,
    }
}
