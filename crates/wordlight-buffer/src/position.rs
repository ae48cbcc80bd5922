//! Line/column positions.
//!
//! ## Learning: Newtype Pattern
//!
//! `Position` wraps line/column coordinates instead of a bare
//! `(usize, usize)`, so line and column can't be swapped by accident.

use serde::{Deserialize, Serialize};

/// A position in a document (line and column).
///
/// Both line and column are 0-indexed. Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// Line number (0-indexed)
    pub line: usize,
    /// Column number (0-indexed, in characters not bytes)
    pub column: usize,
}

impl Position {
    /// Creates a new position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.line.cmp(&other.line) {
            std::cmp::Ordering::Equal => self.column.cmp(&other.column),
            other => other,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Display as 1-indexed for user-facing output
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}
