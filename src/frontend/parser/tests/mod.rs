//! Parser tests module


use crate::frontend::parser::{ast::Node, parse, pretty};
use crate::util::diagnostic::{Diagnostic, ErrorCollector};

/// Parse and collect every diagnostic
pub(crate) fn parse_collect(source: &str) -> (Node<'_>, Vec<Diagnostic>) {
    let mut collector = ErrorCollector::new("test.nv");
    let output = parse(source, &mut collector);
    assert_eq!(output.error_count, collector.error_count());
    (output.root, collector.into_diagnostics())
}

/// Parse source that must be error free and render it
pub(crate) fn render_ok(source: &str) -> String {
    let (root, diagnostics) = parse_collect(source);
    assert!(diagnostics.is_empty(), "unexpected errors for {:?}: {:?}", source, diagnostics);
    pretty::render(&root)
}

/// Error codes reported for a source, in order
pub(crate) fn codes(source: &str) -> Vec<&'static str> {
    parse_collect(source).1.iter().map(|d| d.code).collect()
}
