// Integration tests for the clike pipeline

use clike::diagnostics::{Channel, RecordingSink, TraceConfig, Tracer};
use clike::interpreter::{Interpreter, RuntimeError};
use clike::parser::includes::MemoryLoader;
use clike::parser::Parser;
use clike::semantic::{SemanticAnalyzer, SemanticError};
use clike::{run_source, Error};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

fn run(source: &str) -> Result<Vec<String>, Error> {
    run_source(source, Path::new("."), &MemoryLoader::new(), TraceConfig::default())
}

/// Parse and interpret without semantic analysis, keeping whatever was printed
fn interpret(source: &str) -> (Result<(), RuntimeError>, Vec<String>) {
    let mut parser = Parser::new(source).expect("Parser creation failed");
    let program = parser.parse_program().expect("Parsing failed");

    let mut interpreter = Interpreter::new(Tracer::disabled());
    let result = interpreter.run(&program);
    (result, interpreter.output())
}

#[test]
fn test_simple_arithmetic() {
    let output = run("int main(){ int x = 5; x = x + 3; print(x); }").expect("Execution failed");
    assert_eq!(output, vec!["8"]);
}

#[test]
fn test_recursive_factorial() {
    let source = r#"
        int fact(int n) {
            if (n <= 1) {
                return 1;
            }
            return n * fact(n - 1);
        }

        int main() {
            print(fact(5));
        }
    "#;

    assert_eq!(run(source).unwrap(), vec!["120"]);
}

#[test]
fn test_function_call() {
    let source = r#"
        int add(int a, int b) {
            return a + b;
        }

        int main() {
            int result = add(3, 4);
            print(result);
        }
    "#;

    assert_eq!(run(source).unwrap(), vec!["7"]);
}

#[test]
fn test_array_out_of_bounds() {
    let err = run("int main(){ int a[3]; a[0]=1; a[5]=2; }").unwrap_err();

    match err {
        Error::Runtime(RuntimeError::IndexOutOfBounds { name, index, .. }) => {
            assert_eq!(name, "a");
            assert_eq!(index, "5");
        }
        other => panic!("Expected IndexOutOfBounds, got {:?}", other),
    }
}

#[test]
fn test_oversized_array_is_a_runtime_error() {
    let err = run("int main() { int a[9223372036854775807]; print(1); }").unwrap_err();

    assert!(matches!(
        err,
        Error::Runtime(RuntimeError::ArrayTooLarge { ref name, .. }) if name == "a"
    ));
    assert!(err.to_string().starts_with("Error during execution: Array 'a'"));
}

#[test]
fn test_division_by_zero_emits_no_line() {
    let (result, output) = interpret("int main() { print(5/0); }");

    assert!(matches!(result, Err(RuntimeError::DivisionByZero { .. })));
    assert!(output.is_empty());
}

#[test]
fn test_output_kept_up_to_runtime_error() {
    let (result, output) = interpret("int main() { print(1); print(2); print(3 / 0); print(4); }");

    assert!(result.is_err());
    assert_eq!(output, vec!["1", "2"]);
}

#[test]
fn test_arg_count_mismatch() {
    let err = run("int f(int a) { return a; } int main() { print(f(1, 2)); }").unwrap_err();

    assert!(matches!(
        err,
        Error::Semantic(SemanticError::ArgCountMismatch { expected: 1, got: 2, .. })
    ));
}

#[test]
fn test_float_literal_into_int() {
    let err = run("int main() { int x; x = 1.5; }").unwrap_err();

    assert!(matches!(err, Error::Semantic(SemanticError::FloatToInt { .. })));
}

#[test]
fn test_scope_flatness_at_runtime() {
    // Analysis rejects this program; the interpreter alone shows that a
    // function cannot see main's variables.
    let source = "int peek() { return x; } int main() { int x = 5; print(peek()); }";

    let program = Parser::new(source).unwrap().parse_program().unwrap();
    let analysis = SemanticAnalyzer::new(Tracer::disabled()).analyze(&program);
    assert!(matches!(analysis, Err(SemanticError::IdNotFound { .. })));

    let (result, output) = interpret(source);
    assert!(result.is_ok());
    assert_eq!(output, vec!["void"]);
}

#[test]
fn test_functions_cannot_reach_each_others_locals() {
    let source = r#"
        int inner(int n) {
            return n + 1;
        }

        int outer(int n) {
            int local = n * 10;
            return inner(local);
        }

        int main() {
            print(outer(2));
        }
    "#;

    assert_eq!(run(source).unwrap(), vec!["21"]);
}

#[test]
fn test_return_in_main_is_fatal() {
    let err = run("int main() { print(1); return 0; }").unwrap_err();

    assert!(matches!(
        err,
        Error::Runtime(RuntimeError::ReturnOutsideFunction { .. })
    ));
}

#[test]
fn test_output_is_deterministic() {
    let source = r#"
        int fib(int n) {
            if (n < 2) return n;
            return fib(n - 1) + fib(n - 2);
        }

        int main() {
            int i;
            for (i = 0; i < 10; i = i + 1) {
                print(fib(i));
            }
        }
    "#;

    let first = run(source).unwrap();
    let second = run(source).unwrap();

    assert_eq!(first, vec!["0", "1", "1", "2", "3", "5", "8", "13", "21", "34"]);
    assert_eq!(first, second);
}

#[test]
fn test_strings_and_chars() {
    let source = r#"
        string greet(string name) {
            return "hello " + name;
        }

        int main() {
            char bang = '!';
            print(greet("world") + bang);
        }
    "#;

    assert_eq!(run(source).unwrap(), vec!["hello world!"]);
}

#[test]
fn test_array_sum_through_parameter() {
    let source = r#"
        int sum(int xs[], int n) {
            int total = 0;
            int i;
            for (i = 0; i < n; i = i + 1) {
                total = total + xs[i];
            }
            return total;
        }

        int main() {
            int a[4];
            int i;
            for (i = 0; i < 4; i = i + 1) a[i] = i * i;
            print(sum(a, 4));
        }
    "#;

    assert_eq!(run(source).unwrap(), vec!["14"]);
}

#[test]
fn test_keywords_are_case_insensitive() {
    let output = run("INT main() { Int x = 2; WHILE (x > 0) { PRINT(x); x = x - 1; } }").unwrap();
    assert_eq!(output, vec!["2", "1"]);
}

#[test]
fn test_lex_error_reported_as_parse_stage() {
    let err = run("int main() { int x; x = 1 @ 2; }").unwrap_err();

    assert!(matches!(err, Error::Parse(_)));
    assert!(err.to_string().contains("line 1, column 27"));
}

#[test]
fn test_debug_trace_channels() {
    let sink = Rc::new(RefCell::new(RecordingSink::default()));
    let config = TraceConfig {
        debug: true,
        ..TraceConfig::default()
    };
    let tracer = Tracer::new(config, sink.clone());

    let program = Parser::with_tracer("int main() { int x = 1; print(x); }", tracer.clone())
        .unwrap()
        .parse_program()
        .unwrap();
    SemanticAnalyzer::new(tracer.clone()).analyze(&program).unwrap();
    Interpreter::new(tracer).run(&program).unwrap();

    let sink = sink.borrow();
    let debug = sink.channel(Channel::Debug);
    assert!(debug.contains(&"Parser: Parsing program"));
    assert!(debug.contains(&"Interpreter: Declared x of type int"));
    assert!(debug.contains(&"Interpreter: Assigned x = 1"));
    assert!(sink.channel(Channel::Stack).is_empty());
    assert!(sink.channel(Channel::Scope).is_empty());
}
