use clike::diagnostics::TraceConfig;
use clike::interpreter::RuntimeError;
use clike::parser::includes::MemoryLoader;
use clike::{run_file, run_source, Error};
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn run(source: &str) -> Result<Vec<String>, Error> {
    run_source(source, Path::new("."), &MemoryLoader::new(), TraceConfig::default())
}

#[test]
fn test_arithmetic_across_kinds() {
    let output = run_file(&fixture("arithmetic.clike"), TraceConfig::default())
        .expect("Execution failed");

    assert_eq!(
        output,
        vec![
            "10", "-3", "14", "3.5", "4.0", "9.5", "abc", "cc", "-7", "true", "true", "false",
            "true",
        ]
    );
}

#[test]
fn test_division_by_zero() {
    let err = run("int main() { print(5 / 0); }").unwrap_err();

    assert!(matches!(err, Error::Runtime(RuntimeError::DivisionByZero { .. })));
}

#[test]
fn test_mismatched_operands() {
    let err = run("int main() { print(1); print(2 * \"x\"); }").unwrap_err();

    assert!(matches!(err, Error::Runtime(RuntimeError::TypeError { .. })));
}

#[test]
fn test_integer_overflow() {
    let err = run("int main() { int x = 9223372036854775807; x = x + 1; }").unwrap_err();

    assert!(matches!(err, Error::Runtime(RuntimeError::IntegerOverflow { .. })));
}

#[test]
fn test_float_formatting() {
    let output = run("int main() { float f; print(f); f = 0.1 + 0.2; print(f * 10); print(3.0); }").unwrap();

    assert_eq!(output, vec!["0.0", "3.0000000000000004", "3.0"]);
}
