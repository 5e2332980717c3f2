//! Source positions for traceability.

use std::fmt;

/// Where a declaration or relation was found in the analyzed source.
///
/// Positions are carried through the pipeline for traceability only; no
/// algorithm in this crate family depends on them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Position {
    file: String,
    offset: usize,
    line: u32,
    column: u32,
}

impl Position {
    /// Create a new position.
    pub fn new(file: impl Into<String>, offset: usize, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            offset,
            line,
            column,
        }
    }

    /// Create a position that only records the origin file.
    pub fn in_file(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            ..Self::default()
        }
    }

    /// Get the origin file.
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Get the byte offset within the origin file.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Get the one-based line number.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Get the one-based column number.
    pub fn column(&self) -> u32 {
        self.column
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}
