//! One-based source locations.

use std::fmt;

/// Where a node starts, counted from 1 as editors and compilers report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Line, starting at 1.
    pub line: u32,
    /// Byte column within the line, starting at 1.
    pub column: u32,
}

impl Position {
    pub(crate) fn from_point(point: tree_sitter::Point) -> Self {
        let one_based = |zero: usize| u32::try_from(zero.saturating_add(1)).unwrap_or(u32::MAX);
        Self {
            line: one_based(point.row),
            column: one_based(point.column),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
