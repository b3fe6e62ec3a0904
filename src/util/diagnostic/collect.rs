//! 错误收集
//!
//! 编译器只通过 [`Reporter`] 报告诊断，不关心它们如何被展示。

use super::Diagnostic;
use serde::Serialize;

/// Sink for located compile errors
pub trait Reporter {
    /// Record one diagnostic
    fn report(
        &mut self,
        diagnostic: Diagnostic,
    );
}

impl<F> Reporter for F
where
    F: FnMut(Diagnostic),
{
    fn report(
        &mut self,
        diagnostic: Diagnostic,
    ) {
        self(diagnostic)
    }
}

/// Collects every diagnostic reported for one source file
#[derive(Debug, Clone, Default, Serialize)]
pub struct ErrorCollector {
    /// File the diagnostics belong to
    file: String,
    /// Diagnostics in report order
    diagnostics: Vec<Diagnostic>,
}

impl ErrorCollector {
    /// Create an empty collector
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            diagnostics: Vec::new(),
        }
    }

    /// Name of the file being compiled
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Number of errors reported so far
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    /// Check if any error was reported
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// All diagnostics
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Take the diagnostics out of the collector
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Serialize the collected diagnostics as JSON for external renderers
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Reporter for ErrorCollector {
    fn report(
        &mut self,
        diagnostic: Diagnostic,
    ) {
        tracing::debug!("{}: {}", self.file, diagnostic);
        self.diagnostics.push(diagnostic);
    }
}
