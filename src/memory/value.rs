//! Runtime value representation
//!
//! This module defines the [`Value`] enum, which represents all possible runtime
//! values in the interpreter. Values are tagged; operators dispatch on the tags
//! of both operands at run time.
//!
//! # Value Types
//!
//! - [`Value::Int`]: 64-bit signed integer
//! - [`Value::Float`]: 64-bit float
//! - [`Value::Char`]: a single Unicode scalar
//! - [`Value::Str`]: owned string
//! - [`Value::Bool`]: result of comparisons and logical operators
//! - [`Value::Array`]: fixed-size array, shared by reference
//! - [`Value::Void`]: "no value" (unbound names, void calls)
//!
//! # Sharing
//!
//! Arrays are reference-counted: passing an array to a function or assigning
//! it to another name aliases the same storage, so element writes are visible
//! through every name bound to it.

use crate::parser::ast::TypeSpec;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Shared array storage
pub type ArrayRef = Rc<RefCell<Vec<Value>>>;

/// Largest element count an array declaration may ask for
pub const MAX_ARRAY_LEN: usize = 1 << 24;

/// Runtime values in the interpreter
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    Int(i64),
    Float(f64),
    Char(char),
    Str(String),
    Bool(bool),
    Array(ArrayRef),
    #[default]
    Void,
}

impl Value {
    /// Initial value of a freshly declared variable
    pub fn default_for(spec: TypeSpec) -> Value {
        match spec {
            TypeSpec::Int => Value::Int(0),
            TypeSpec::Float => Value::Float(0.0),
            TypeSpec::Char => Value::Char('\0'),
            TypeSpec::Str => Value::Str(String::new()),
            TypeSpec::Void => Value::Void,
        }
    }

    /// `size` copies of the element default, or `None` if the storage cannot be allocated
    pub fn array_of(elem: TypeSpec, size: usize) -> Option<Value> {
        if size > MAX_ARRAY_LEN {
            return None;
        }
        let mut items = Vec::new();
        items.try_reserve_exact(size).ok()?;
        items.resize(size, Value::default_for(elem));
        Some(Value::from_vec(items))
    }

    pub fn from_vec(items: Vec<Value>) -> Value {
        Value::Array(Rc::new(RefCell::new(items)))
    }

    /// Truthiness used by `if`, loops and the logical operators
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Int(n) => *n != 0,
            Value::Float(x) => *x != 0.0,
            Value::Char(_) => true,
            Value::Str(s) => !s.is_empty(),
            Value::Bool(b) => *b,
            Value::Array(items) => !items.borrow().is_empty(),
            Value::Void => false,
        }
    }

    /// Kind name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Char(_) => "char",
            Value::Str(_) => "string",
            Value::Bool(_) => "bool",
            Value::Array(_) => "array",
            Value::Void => "void",
        }
    }

    pub fn as_array(&self) -> Option<&ArrayRef> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Array element rendering: text values are quoted
    fn fmt_element(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "\"{}\"", s),
            Value::Char(c) => write!(f, "'{}'", c),
            other => write!(f, "{}", other),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => fmt_float(*x, f),
            Value::Char(c) => write!(f, "{}", c),
            Value::Str(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.borrow().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.fmt_element(f)?;
                }
                f.write_str("]")
            }
            Value::Void => f.write_str("void"),
        }
    }
}

/// Whole floats keep a trailing `.0` so they never read as ints
fn fmt_float(x: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if x.is_nan() {
        f.write_str("nan")
    } else if x.is_infinite() {
        f.write_str(if x > 0.0 { "inf" } else { "-inf" })
    } else if x.fract() == 0.0 && x.abs() < 1e16 {
        write!(f, "{:.1}", x)
    } else {
        write!(f, "{}", x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(Value::default_for(TypeSpec::Int), Value::Int(0));
        assert_eq!(Value::default_for(TypeSpec::Float), Value::Float(0.0));
        assert_eq!(Value::default_for(TypeSpec::Char), Value::Char('\0'));
        assert_eq!(Value::default_for(TypeSpec::Str), Value::Str(String::new()));

        let array = Value::array_of(TypeSpec::Int, 3).unwrap();
        assert_eq!(array.to_string(), "[0, 0, 0]");
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Float(4.0).to_string(), "4.0");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::Float(-0.125).to_string(), "-0.125");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Void.to_string(), "void");
        assert_eq!(Value::Str("hi".to_string()).to_string(), "hi");

        let mixed = Value::from_vec(vec![Value::Str("a".to_string()), Value::Char('b'), Value::Int(1)]);
        assert_eq!(mixed.to_string(), "[\"a\", 'b', 1]");
    }

    #[test]
    fn test_truthiness() {
        assert!(!Value::Int(0).is_truthy());
        assert!(!Value::Float(0.0).is_truthy());
        assert!(!Value::Str(String::new()).is_truthy());
        assert!(!Value::Void.is_truthy());
        assert!(!Value::from_vec(Vec::new()).is_truthy());
        assert!(Value::Char('\0').is_truthy());
        assert!(Value::Int(-1).is_truthy());
        assert!(Value::array_of(TypeSpec::Int, 1).unwrap().is_truthy());
    }

    #[test]
    fn test_arrays_alias() {
        let first = Value::array_of(TypeSpec::Int, 2).unwrap();
        let second = first.clone();

        if let Some(items) = second.as_array() {
            items.borrow_mut()[1] = Value::Int(7);
        }

        assert_eq!(first.to_string(), "[0, 7]");
    }

    #[test]
    fn test_oversized_array() {
        assert!(Value::array_of(TypeSpec::Int, MAX_ARRAY_LEN + 1).is_none());
        assert!(Value::array_of(TypeSpec::Float, usize::MAX).is_none());
        assert!(Value::array_of(TypeSpec::Char, 0).is_some());
    }
}
