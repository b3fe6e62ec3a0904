//! Middle end tests


use crate::frontend::parser::{ast::Node, parse};
use crate::util::diagnostic::ErrorCollector;

/// Parse source that must be error free
pub(crate) fn parse_ok(source: &str) -> Node<'_> {
    let mut collector = ErrorCollector::new("test.nv");
    let output = parse(source, &mut collector);
    assert!(
        !output.has_errors(),
        "unexpected errors for {:?}: {:?}",
        source,
        collector.diagnostics()
    );
    output.root
}
