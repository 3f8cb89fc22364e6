//! Domain models for selections, refs, and remote URL rewriting.

use serde::{Deserialize, Serialize};

/// An inclusive, 1-based range of lines derived from an editor selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub begin: u32,
    pub end: u32,
}

impl LineRange {
    /// Create a range from 1-based endpoints, swapping them when reversed.
    pub fn new(begin: u32, end: u32) -> Self {
        Self {
            begin: begin.min(end).max(1),
            end: begin.max(end).max(1),
        }
    }

    /// Convert a selection's 0-based `(row, col)` endpoints into a line range.
    ///
    /// A zero-width selection (start and end coincide exactly) means no
    /// selection was made and yields `None` rather than a one-line range.
    pub fn from_selection(start: (u32, u32), end: (u32, u32)) -> Option<Self> {
        if start == end {
            return None;
        }
        Some(Self::new(start.0 + 1, end.0 + 1))
    }
}

/// Result of resolving what HEAD currently points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadRef {
    /// A named branch (possibly `remotes/<remote>/...` qualified).
    Branch(String),
    /// Detached HEAD; carries the commit hash to search branches for.
    Detached(String),
}

impl HeadRef {
    /// The ref name to try remote resolution with first.
    pub fn name(&self) -> &str {
        match self {
            HeadRef::Branch(name) => name,
            HeadRef::Detached(commit) => commit,
        }
    }
}

/// One entry of the ordered remote-URL replacement table.
///
/// The first entry whose `prefix` matches the start of a raw remote URL wins;
/// the prefix is replaced (first occurrence only) with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    pub prefix: String,
    pub replacement: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_normalizes_reversed_endpoints() {
        assert_eq!(LineRange::new(20, 10), LineRange { begin: 10, end: 20 });
    }

    #[test]
    fn selection_rows_become_one_based_lines() {
        let range = LineRange::from_selection((9, 0), (19, 4)).unwrap();
        assert_eq!(range, LineRange { begin: 10, end: 20 });
    }

    #[test]
    fn zero_width_selection_is_absent() {
        assert_eq!(LineRange::from_selection((5, 3), (5, 3)), None);
    }

    #[test]
    fn same_row_nonzero_width_selection_is_a_single_line() {
        let range = LineRange::from_selection((5, 3), (5, 9)).unwrap();
        assert_eq!(range, LineRange { begin: 6, end: 6 });
    }
}
