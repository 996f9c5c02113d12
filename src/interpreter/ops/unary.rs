use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::value::Value;
use crate::parser::ast::{SourceLocation, UnOp};

impl Interpreter<'_> {
    /// Unary `+`/`-` on numbers; booleans count as 0/1
    pub(crate) fn unary_op(
        &self,
        op: UnOp,
        value: &Value,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        match (op, value) {
            (UnOp::Plus, Value::Int(n)) => Ok(Value::Int(*n)),
            (UnOp::Plus, Value::Float(x)) => Ok(Value::Float(*x)),
            (UnOp::Plus, Value::Bool(b)) => Ok(Value::Int(*b as i64)),
            (UnOp::Neg, Value::Int(n)) => {
                n.checked_neg()
                    .map(Value::Int)
                    .ok_or_else(|| RuntimeError::IntegerOverflow {
                        operation: format!("-({})", n),
                        location,
                    })
            }
            (UnOp::Neg, Value::Float(x)) => Ok(Value::Float(-x)),
            (UnOp::Neg, Value::Bool(b)) => Ok(Value::Int(-(*b as i64))),
            (op, other) => Err(RuntimeError::TypeError {
                message: format!(
                    "bad operand type for unary '{}': {}",
                    match op {
                        UnOp::Plus => "+",
                        UnOp::Neg => "-",
                    },
                    other.type_name()
                ),
                location,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Tracer;

    fn eval(op: UnOp, value: Value) -> Result<Value, RuntimeError> {
        Interpreter::new(Tracer::disabled()).unary_op(op, &value, SourceLocation::default())
    }

    #[test]
    fn test_negation() {
        assert_eq!(eval(UnOp::Neg, Value::Int(4)), Ok(Value::Int(-4)));
        assert_eq!(eval(UnOp::Neg, Value::Float(1.5)), Ok(Value::Float(-1.5)));
        assert_eq!(eval(UnOp::Plus, Value::Bool(true)), Ok(Value::Int(1)));
        assert!(matches!(
            eval(UnOp::Neg, Value::Int(i64::MIN)),
            Err(RuntimeError::IntegerOverflow { .. })
        ));
    }

    #[test]
    fn test_non_numeric_operand() {
        assert!(matches!(
            eval(UnOp::Neg, Value::Str("a".to_string())),
            Err(RuntimeError::TypeError { .. })
        ));
        assert!(matches!(
            eval(UnOp::Plus, Value::Char('a')),
            Err(RuntimeError::TypeError { .. })
        ));
    }
}
