//! End-to-end compile and execute

use neve::vm::{Chunk, VMError, VM};
use neve::{compile, interpret, run, ExecutionOutcome};

#[test]
fn test_arithmetic_precedence() {
    assert_eq!(run("1 + 2 * 3").unwrap(), "7");
    assert_eq!(run("(1 + 2) * 3").unwrap(), "9");
    assert_eq!(run("10 - 4 - 3").unwrap(), "3");
}

#[test]
fn test_string_concatenation() {
    assert_eq!(run("\"a\" + \"b\"").unwrap(), "ab");
    assert_eq!(run("\"a\" + \"b\" + \"c\"").unwrap(), "abc");
}

#[test]
fn test_number_formatting() {
    assert_eq!(run("1 / 3").unwrap(), "0.33333333333333");
    assert_eq!(run("1 / 2").unwrap(), "0.5");
    assert_eq!(run("4 / 2").unwrap(), "2");
    assert_eq!(run("100000000000000.0 * 10").unwrap(), "1e+15");
    assert_eq!(run("-0.0").unwrap(), "-0");
    assert_eq!(run("1 / 0").unwrap(), "inf");
}

#[test]
fn test_keywords_and_logic() {
    assert_eq!(run("nil").unwrap(), "nil");
    assert_eq!(run("not nil").unwrap(), "true");
    assert_eq!(run("not (1 < 2)").unwrap(), "false");
    assert_eq!(run("1 <= 1 == true").unwrap(), "true");
}

#[test]
fn test_integer_operators() {
    assert_eq!(run("7 >> 1").unwrap(), "3");
    assert_eq!(run("1 << 10").unwrap(), "1024");
    assert_eq!(run("6 & 3 | 8").unwrap(), "10");
    assert_eq!(run("6 ^ 3").unwrap(), "5");
}

#[test]
fn test_equality_tests() {
    assert_eq!(run("2 - 2 == 0").unwrap(), "true");
    assert_eq!(run("1 - 2 != -1").unwrap(), "false");
    assert_eq!(run("\"ab\" == \"a\" + \"b\"").unwrap(), "true");
    assert_eq!(run("nil == nil").unwrap(), "true");
}

#[test]
fn test_interpolation() {
    assert_eq!(
        run("\"x = #{1 + 1}, ok = #{1 < 2}\"").unwrap(),
        "x = 2, ok = true"
    );
    assert_eq!(run("\"#{\"in\" + \"ner\"}!\"").unwrap(), "inner!");
    assert_eq!(run("\"#{nil}#{2.5}\"").unwrap(), "nil2.5");
}

#[test]
fn test_interpret_compiled_chunk() {
    let compilation = compile("2 * 21", "answer.nv");
    assert_eq!(compilation.file, "answer.nv");
    let chunk = compilation.chunk.expect("compiles");
    assert_eq!(
        interpret(&chunk),
        ExecutionOutcome::Ok {
            output: "42".to_string()
        }
    );
}

#[test]
fn test_runtime_error_outcome() {
    let mut chunk = Chunk::new();
    chunk.write(0xEE, 1);
    let outcome = interpret(&chunk);
    assert!(!outcome.is_ok());
    assert_eq!(outcome, ExecutionOutcome::RuntimeError(VMError::InvalidOpcode(0xEE)));
}

#[test]
fn test_heap_accounting() {
    let compilation = neve::Compiler::with_config(neve::CompilerConfig::unoptimized())
        .compile("\"a\" + \"b\" + \"#{1}\"", "heap.nv");
    let chunk = compilation.chunk.expect("compiles");

    let mut vm = VM::new();
    let value = vm.interpret(&chunk).unwrap();
    assert_eq!(vm.display(value), "ab1");

    // two constants, two concatenations, one stringified number
    let stats = vm.shutdown();
    assert_eq!(stats.allocated, 5);
    assert_eq!(stats.released, 5);
    assert!(stats.is_balanced());
}

#[test]
fn test_run_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("main.nv");
    std::fs::write(&path, "# comment\n6 * 7\n").unwrap();
    assert_eq!(neve::run_file(&path).unwrap(), "42");

    assert!(neve::run_file(&dir.path().join("missing.nv")).is_err());
}
