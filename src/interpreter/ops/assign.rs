use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::parser::ast::{Expr, LValue};

impl Interpreter<'_> {
    /// Evaluate the right side, then bind it. For element targets the index is
    /// evaluated after the value.
    pub(crate) fn execute_assignment(&mut self, target: &LValue, value: &Expr) -> Result<(), RuntimeError> {
        let value = self.evaluate_expr(value)?;

        match target {
            LValue::Var { name, .. } => {
                self.tracer
                    .debug(|| format!("Interpreter: Assigned {} = {}", name, value));
                self.bind(name, value);
            }
            LValue::Index {
                name,
                index,
                location,
            } => {
                let index = self.evaluate_expr(index)?;
                self.tracer.debug(|| {
                    format!("Interpreter: Assigned {}[{}] = {}", name, index, value)
                });
                self.write_element(name, &index, value, *location)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::diagnostics::Tracer;
    use crate::interpreter::engine::Interpreter;
    use crate::parser::Parser;

    fn run(source: &str) -> Vec<String> {
        let program = Parser::new(source).unwrap().parse_program().unwrap();
        let mut interpreter = Interpreter::new(Tracer::disabled());
        interpreter.run(&program).unwrap();
        interpreter.output()
    }

    #[test]
    fn test_assignment_rebinds() {
        assert_eq!(run("int main() { int x = 5; x = x + 3; print(x); }"), vec!["8"]);
    }

    #[test]
    fn test_array_assignment_aliases() {
        let output = run("int main() { int a[2]; int b[1]; b = a; b[0] = 4; print(a[0]); }");
        assert_eq!(output, vec!["4"]);
    }

    #[test]
    fn test_dynamic_typing_of_variables() {
        // analysis only guards bare float literals, so other values still land
        let output = run("int main() { int x; x = \"text\"; print(x); x = 1 + 0.5; print(x); }");
        assert_eq!(output, vec!["text", "1.5"]);
    }
}
