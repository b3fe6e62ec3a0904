//! Compile errors through the public API

use neve::util::diagnostic::{ErrorCollector, ErrorKind, Reporter};
use neve::util::span::Location;
use neve::{compile, run, Compiler};

#[test]
fn test_unclosed_parenthesis() {
    let compilation = compile("(1", "paren.nv");
    assert!(compilation.chunk.is_none());
    assert_eq!(compilation.error_count(), 1);
    assert_eq!(compilation.diagnostics[0].kind, ErrorKind::UnbalancedParenthesis);
    assert_eq!(compilation.diagnostics[0].code, "E0007");
}

#[test]
fn test_type_mismatch() {
    let compilation = compile("true == nil", "mismatch.nv");
    assert!(!compilation.is_success());
    let diagnostic = &compilation.diagnostics[0];
    assert_eq!(diagnostic.code, "E1003");
    assert_eq!(
        diagnostic.message,
        "types do not match: cannot compare 'Bool' with 'Nil'"
    );
    assert_eq!(diagnostic.location, Location::new(1, 1, 8));
}

#[test]
fn test_errors_are_aggregated() {
    let compilation = compile("(true + 1) * 2 == (nil - 1) * 2", "many.nv");
    assert_eq!(compilation.error_count(), 2);
    assert!(compilation.chunk.is_none());

    let err = run("(true + 1) * 2 == (nil - 1) * 2").unwrap_err();
    assert!(err.to_string().starts_with("2 compile error(s)"));
}

#[test]
fn test_chunk_present_iff_no_errors() {
    for source in ["1 + 2", "1 +", "\"abc", "1 2", "-true", "\"#{1}\"", ""] {
        let compilation = compile(source, "t.nv");
        assert_eq!(
            compilation.chunk.is_some(),
            compilation.error_count() == 0,
            "{:?}",
            source
        );
    }
}

#[test]
fn test_custom_reporter() {
    let mut seen = Vec::new();
    let mut reporter = |d: neve::util::diagnostic::Diagnostic| seen.push(d.code);
    let chunk = Compiler::new().compile_with_reporter("1 + $ 2 == true", &mut reporter);
    assert!(chunk.is_none());
    assert_eq!(seen, vec!["E0003", "E1003"]);
}

#[test]
fn test_collector_reporter() {
    let mut collector = ErrorCollector::new("collected.nv");
    assert!(Compiler::new()
        .compile_with_reporter("1 2", &mut collector)
        .is_none());
    collector.report(
        neve::util::diagnostic::ErrorCodeDefinition::unmatched_brace()
            .at(Location::new(1, 1, 1))
            .build(),
    );
    assert_eq!(collector.error_count(), 2);
}

#[test]
fn test_diagnostics_as_json() {
    let compilation = compile("true == nil", "json.nv");
    let json = compilation.diagnostics_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value[0]["code"], "E1003");
    assert_eq!(value[0]["kind"], "unapplicable-operator");
    assert_eq!(value[0]["location"]["line"], 1);
}

#[test]
fn test_deep_nesting_is_a_compile_error() {
    let source = format!("{}1{}", "(".repeat(20_000), ")".repeat(20_000));
    let compilation = compile(&source, "deep.nv");
    assert!(compilation.chunk.is_none());
    assert_eq!(compilation.error_count(), 1);
    assert_eq!(compilation.diagnostics[0].code, "E0010");

    let chain = vec!["1"; 20_000].join(" - ");
    assert_eq!(compile(&chain, "chain.nv").diagnostics[0].code, "E0010");
}

#[test]
fn test_lexical_error_does_not_hide_type_error() {
    let compilation = compile("true + 1 @", "lex.nv");
    let codes: Vec<_> = compilation.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec!["E0003", "E1001"]);
}
