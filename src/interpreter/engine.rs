// Execution engine for the clike interpreter

use crate::diagnostics::{Channel, Tracer};
use crate::interpreter::errors::RuntimeError;
use crate::interpreter::jumps::Flow;
use crate::interpreter::terminal::Terminal;
use crate::memory::stack::{ActivationRecord, CallStack, FrameKind};
use crate::memory::value::Value;
use crate::parser::ast::*;

/// Tree-walking interpreter over a borrowed, already analyzed [`Program`]
pub struct Interpreter<'a> {
    /// Call stack; the program record sits at the bottom while running
    pub(crate) stack: CallStack<'a>,

    /// Captured `print` output
    pub(crate) terminal: Terminal,

    pub(crate) tracer: Tracer,

    /// Function records currently on the stack
    pub(crate) call_depth: usize,
}

impl<'a> Interpreter<'a> {
    pub fn new(tracer: Tracer) -> Self {
        Self::with_terminal(tracer, Terminal::new())
    }

    pub fn with_terminal(tracer: Tracer, terminal: Terminal) -> Self {
        Interpreter {
            stack: CallStack::new(),
            terminal,
            tracer,
            call_depth: 0,
        }
    }

    /// Run the program from start to finish
    pub fn run(&mut self, program: &'a Program) -> Result<(), RuntimeError> {
        self.stack = CallStack::new();
        self.call_depth = 0;

        self.stack
            .push(ActivationRecord::new("global", FrameKind::Program, 1));
        self.trace_stack(|| "ENTER PROGRAM".to_string());

        if let Some(global) = self.stack.peek_mut() {
            for function in &program.functions {
                global.define_function(function);
            }
        }

        if let Flow::Return { location, .. } = self.execute_block(&program.main_block)? {
            return Err(RuntimeError::ReturnOutsideFunction { location });
        }

        self.trace_stack(|| "LEAVE PROGRAM".to_string());
        self.stack.pop();
        Ok(())
    }

    fn execute_block(&mut self, block: &Block) -> Result<Flow, RuntimeError> {
        for declaration in &block.declarations {
            let flow = self.execute_statement(declaration)?;
            if flow.is_return() {
                return Ok(flow);
            }
        }
        self.execute_compound(&block.body)
    }

    /// Call a user function and return its result ([`Value::Void`] when it
    /// falls off the end or returns nothing)
    pub(crate) fn call_function(&mut self, call: &Call) -> Result<Value, RuntimeError> {
        self.tracer
            .debug(|| format!("Interpreter: Calling function '{}'", call.name));

        let decl = self
            .stack
            .find_function(&call.name)
            .ok_or_else(|| RuntimeError::UndefinedFunction {
                name: call.name.clone(),
                location: call.location,
            })?;

        let max_depth = self.tracer.config().max_call_depth;
        if self.call_depth >= max_depth {
            return Err(RuntimeError::StackOverflow {
                name: call.name.clone(),
                depth: max_depth,
                location: call.location,
            });
        }

        // Arguments are evaluated in the caller's frame; extras are never evaluated
        let mut bindings = Vec::with_capacity(decl.params.len());
        for (param, arg) in decl.params.iter().zip(&call.args) {
            bindings.push((param.name.clone(), self.evaluate_expr(arg)?));
        }

        let level = self.stack.peek().map_or(1, |ar| ar.level) + 1;
        let mut record = ActivationRecord::new(decl.name.clone(), FrameKind::Function, level);
        for (name, value) in bindings {
            record.set(name, value);
        }

        self.stack.push(record);
        self.call_depth += 1;
        self.trace_stack(|| format!("ENTER FUNCTION {}", decl.name));

        let flow = self.execute_compound(&decl.body)?;
        let result = match flow {
            Flow::Return { value, .. } => value.unwrap_or(Value::Void),
            Flow::Normal => Value::Void,
        };

        self.trace_stack(|| format!("LEAVE FUNCTION {} return {}", decl.name, result));
        self.call_depth -= 1;
        self.stack.pop();

        self.tracer
            .debug(|| format!("Interpreter: Function {} returned {}", decl.name, result));
        Ok(result)
    }

    /// Stack-channel trace: a heading followed by the full call stack
    fn trace_stack<F: FnOnce() -> String>(&self, heading: F) {
        self.tracer
            .trace(Channel::Stack, || format!("{}\n{}", heading(), self.stack.dump()));
    }

    /// Lines printed so far
    pub fn output(&self) -> Vec<String> {
        self.terminal.get_output()
    }

    pub fn into_terminal(self) -> Terminal {
        self.terminal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{RecordingSink, TraceConfig};
    use crate::parser::Parser;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn run(source: &str) -> Result<Vec<String>, RuntimeError> {
        let program = Parser::new(source).unwrap().parse_program().unwrap();
        let mut interpreter = Interpreter::new(Tracer::disabled());
        interpreter.run(&program)?;
        Ok(interpreter.output())
    }

    #[test]
    fn test_recursion() {
        let source = "int fact(int n) { if (n <= 1) { return 1; } return n * fact(n - 1); }\n\
                      int main() { print(fact(5)); }";
        assert_eq!(run(source).unwrap(), vec!["120"]);
    }

    #[test]
    fn test_void_function_result() {
        let source = "void f() { } int main() { print(f()); }";
        assert_eq!(run(source).unwrap(), vec!["void"]);
    }

    #[test]
    fn test_return_in_main_is_fatal() {
        let err = run("int main() { print(1); return 0; }").unwrap_err();
        assert!(matches!(err, RuntimeError::ReturnOutsideFunction { .. }));
    }

    #[test]
    fn test_extra_arguments_are_not_evaluated() {
        // the extra argument would divide by zero if it were evaluated
        let source = "int one(int a) { return a; } int main() { print(one(1, 1 / 0)); }";
        assert_eq!(run(source).unwrap(), vec!["1"]);
    }

    #[test]
    fn test_missing_parameters_stay_unbound() {
        let source = "int second(int a, int b) { print(b); return a; } int main() { print(second(7)); }";
        assert_eq!(run(source).unwrap(), vec!["void", "7"]);
    }

    #[test]
    fn test_undefined_function() {
        let err = run("int main() { missing(); }").unwrap_err();
        assert!(matches!(err, RuntimeError::UndefinedFunction { ref name, .. } if name == "missing"));
    }

    #[test]
    fn test_call_depth_limit() {
        let source = "int down(int n) { return down(n + 1); } int main() { down(0); }";
        let program = Parser::new(source).unwrap().parse_program().unwrap();
        let config = TraceConfig {
            max_call_depth: 50,
            ..TraceConfig::default()
        };
        let tracer = Tracer::new(config, Rc::new(RefCell::new(RecordingSink::default())));

        let err = Interpreter::new(tracer).run(&program).unwrap_err();
        assert!(matches!(err, RuntimeError::StackOverflow { depth: 50, .. }));
    }

    #[test]
    fn test_stack_trace_levels() {
        let sink = Rc::new(RefCell::new(RecordingSink::default()));
        let config = TraceConfig {
            stack: true,
            ..TraceConfig::default()
        };
        let program = Parser::new("int id(int v) { return v; } int main() { int x; x = id(3); }")
            .unwrap()
            .parse_program()
            .unwrap();

        Interpreter::new(Tracer::new(config, sink.clone()))
            .run(&program)
            .unwrap();

        let sink = sink.borrow();
        let entries = sink.channel(Channel::Stack);
        assert_eq!(entries.len(), 4);
        assert!(entries[0].starts_with("ENTER PROGRAM\nCALL STACK:"));
        assert!(entries[1].starts_with("ENTER FUNCTION id"));
        assert!(entries[1].contains("AR FUNCTION id level 2"));
        assert!(entries[1].contains("v: 3"));
        assert!(entries[2].starts_with("LEAVE FUNCTION id return 3"));
        assert!(entries[3].starts_with("LEAVE PROGRAM"));
        assert!(entries[3].contains("x: 3"));
    }
}
