//! Array element access
//!
//! Arrays are looked up in the current record only, like every other variable.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::value::{ArrayRef, Value};
use crate::parser::ast::SourceLocation;

impl Interpreter<'_> {
    pub(crate) fn read_element(
        &self,
        name: &str,
        index: &Value,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let array = self.array_named(name, location)?;
        let items = array.borrow();
        let slot = checked_index(name, index, items.len(), location)?;
        let value = items[slot].clone();
        Ok(value)
    }

    pub(crate) fn write_element(
        &mut self,
        name: &str,
        index: &Value,
        value: Value,
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        let array = self.array_named(name, location)?;
        let mut items = array.borrow_mut();
        let slot = checked_index(name, index, items.len(), location)?;
        items[slot] = value;
        Ok(())
    }

    /// Handle to the array bound to `name` in the current record
    fn array_named(&self, name: &str, location: SourceLocation) -> Result<ArrayRef, RuntimeError> {
        self.stack
            .peek()
            .and_then(|record| record.value(name))
            .and_then(Value::as_array)
            .cloned()
            .ok_or_else(|| RuntimeError::NotAnArray {
                name: name.to_string(),
                location,
            })
    }
}

fn checked_index(
    name: &str,
    index: &Value,
    len: usize,
    location: SourceLocation,
) -> Result<usize, RuntimeError> {
    match index {
        Value::Int(i) if *i >= 0 && (*i as u64) < len as u64 => Ok(*i as usize),
        other => Err(RuntimeError::IndexOutOfBounds {
            name: name.to_string(),
            index: other.to_string(),
            location,
        }),
    }
}

#[cfg(test)]
mod tests {
    use crate::diagnostics::Tracer;
    use crate::interpreter::engine::Interpreter;
    use crate::interpreter::errors::RuntimeError;
    use crate::parser::Parser;

    fn run(source: &str) -> Result<Vec<String>, RuntimeError> {
        let program = Parser::new(source).unwrap().parse_program().unwrap();
        let mut interpreter = Interpreter::new(Tracer::disabled());
        interpreter.run(&program)?;
        Ok(interpreter.output())
    }

    #[test]
    fn test_element_read_write() {
        let output = run("int main() { int a[3]; a[0] = 1; a[2] = a[0] + 5; print(a[2]); print(a); }").unwrap();
        assert_eq!(output, vec!["6", "[1, 0, 6]"]);
    }

    #[test]
    fn test_out_of_bounds_write() {
        let err = run("int main() { int a[3]; a[0] = 1; a[5] = 2; }").unwrap_err();
        assert!(matches!(err, RuntimeError::IndexOutOfBounds { ref name, ref index, .. } if name == "a" && index == "5"));
    }

    #[test]
    fn test_negative_and_float_indices() {
        assert!(matches!(
            run("int main() { int a[3]; print(a[-1]); }"),
            Err(RuntimeError::IndexOutOfBounds { .. })
        ));
        assert!(matches!(
            run("int main() { int a[3]; print(a[1.0]); }"),
            Err(RuntimeError::IndexOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_index_non_array() {
        let err = run("int main() { int x; x[0] = 1; }").unwrap_err();
        assert!(matches!(err, RuntimeError::NotAnArray { ref name, .. } if name == "x"));
    }

    #[test]
    fn test_arrays_passed_by_reference() {
        let source = "void fill(int xs[], int v) { xs[1] = v; } int main() { int a[2]; fill(a, 9); print(a); }";
        assert_eq!(run(source).unwrap(), vec!["[0, 9]"]);
    }
}
