//! Foldable line ranges.

use std::fmt;

/// A foldable block spanning 1-based lines `start..=end`.
///
/// Invariant: `start < end`. Same-line pairs never become ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FoldRange {
    pub start: usize,
    pub end: usize,
}

impl FoldRange {
    /// Returns `None` unless the pair spans at least two lines.
    pub fn new(start: usize, end: usize) -> Option<Self> {
        (end > start).then_some(Self { start, end })
    }

    /// True when `line` lies strictly between the boundary lines.
    pub fn contains_interior(&self, line: usize) -> bool {
        self.start < line && line < self.end
    }

    /// Lines hidden while this range alone is folded.
    pub fn interior_len(&self) -> usize {
        self.end - self.start - 1
    }
}

impl fmt::Display for FoldRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
