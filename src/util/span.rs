//! Source location tracking

use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;

/// Span of source text on a single line
///
/// `line` and `col` are 1-indexed, `length` counts bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub col: usize,
    /// Length in bytes
    pub length: usize,
}

impl Location {
    /// Create a new location
    #[inline]
    pub fn new(
        line: usize,
        col: usize,
        length: usize,
    ) -> Self {
        Self { line, col, length }
    }

    /// Location of the first byte of a file, zero length
    #[inline]
    pub fn start() -> Self {
        Self {
            line: 1,
            col: 1,
            length: 0,
        }
    }

    /// Merge two locations into one covering both
    ///
    /// The line is the integer average of both lines and the length is the
    /// distance between the two columns. Not associative: composite spans
    /// are always merged left operand, operator, right operand.
    pub fn merge(
        left: Location,
        right: Location,
    ) -> Location {
        Location {
            line: (left.line + right.line) / 2,
            col: left.col.min(right.col),
            length: left.col.abs_diff(right.col),
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Location {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Source file information
///
/// This is all the core needs from its host: a name to attach to
/// diagnostics and the text itself.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// File name
    pub name: String,
    /// File content
    pub content: String,
    /// Byte offset of every line start
    line_offsets: Vec<usize>,
}

impl SourceFile {
    /// Create a new source file
    pub fn new(
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let content = content.into();
        let mut line_offsets = vec![0];
        line_offsets.extend(
            content
                .bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i + 1),
        );

        Self {
            name: name.into(),
            content,
            line_offsets,
        }
    }

    /// Read a source file from disk
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        Ok(Self::new(path.display().to_string(), content))
    }

    /// Number of lines in the file
    pub fn line_count(&self) -> usize {
        self.line_offsets.len()
    }

    /// Text of a 1-indexed line, without its line terminator
    pub fn line_text(
        &self,
        line: usize,
    ) -> Option<&str> {
        let start = *self.line_offsets.get(line.checked_sub(1)?)?;
        let end = self
            .line_offsets
            .get(line)
            .map(|next| next - 1)
            .unwrap_or(self.content.len());
        self.content
            .get(start..end)
            .map(|text| text.trim_end_matches('\r'))
    }

    /// Source text covered by a location
    pub fn source_text(
        &self,
        loc: Location,
    ) -> Option<&str> {
        let line = self.line_text(loc.line)?;
        let start = loc.col.checked_sub(1)?;
        line.get(start..(start + loc.length).min(line.len()))
    }
}

impl fmt::Display for SourceFile {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests;
