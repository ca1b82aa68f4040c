//! Range normalization.
//!
//! Raw matcher output may contain several ranges beginning on the same line
//! (e.g. `foo({` closes `}` then `)` on later lines). Only the outermost range
//! per start line survives so each line carries at most one fold affordance.
//! Ranges with distinct starts are all kept; nesting is preserved.
//!
//! Invariants of [`RangeSet`]:
//! * sorted by `start` ascending
//! * `start` values are unique
//! * every entry satisfies `start < end`

use crate::range::FoldRange;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeSet {
    ranges: Vec<FoldRange>,
}

/// Sort by start ascending, end descending, then keep the first per start.
pub fn normalize(mut raw: Vec<FoldRange>) -> RangeSet {
    raw.sort_unstable_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));
    raw.dedup_by_key(|r| r.start);
    RangeSet { ranges: raw }
}

impl RangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FoldRange> {
        self.ranges.iter()
    }

    pub fn as_slice(&self) -> &[FoldRange] {
        &self.ranges
    }

    pub fn starts(&self) -> impl Iterator<Item = usize> + '_ {
        self.ranges.iter().map(|r| r.start)
    }

    /// The range beginning on `line`, if any.
    pub fn starting_at(&self, line: usize) -> Option<&FoldRange> {
        self.ranges
            .binary_search_by_key(&line, |r| r.start)
            .ok()
            .map(|idx| &self.ranges[idx])
    }

    pub fn has_start(&self, line: usize) -> bool {
        self.starting_at(line).is_some()
    }

    /// Ranges whose start line is strictly before `line`.
    pub fn starting_before(&self, line: usize) -> &[FoldRange] {
        let idx = self.ranges.partition_point(|r| r.start < line);
        &self.ranges[..idx]
    }
}

impl<'a> IntoIterator for &'a RangeSet {
    type Item = &'a FoldRange;
    type IntoIter = std::slice::Iter<'a, FoldRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn r(start: usize, end: usize) -> FoldRange {
        FoldRange { start, end }
    }

    #[test]
    fn outermost_wins_per_start() {
        let set = normalize(vec![r(3, 4), r(1, 5), r(1, 9), r(3, 8)]);
        assert_eq!(set.as_slice(), &[r(1, 9), r(3, 8)]);
    }

    #[test]
    fn nesting_with_distinct_starts_is_kept() {
        let set = normalize(vec![r(2, 4), r(1, 5)]);
        assert_eq!(set.as_slice(), &[r(1, 5), r(2, 4)]);
    }

    #[test]
    fn lookup_by_start() {
        let set = normalize(vec![r(2, 4), r(1, 5), r(7, 9)]);
        assert_eq!(set.starting_at(7), Some(&r(7, 9)));
        assert_eq!(set.starting_at(4), None);
        assert!(set.has_start(1));
        assert_eq!(set.starting_before(7), &[r(1, 5), r(2, 4)]);
        assert_eq!(set.starts().collect::<Vec<_>>(), vec![1, 2, 7]);
    }

    #[test]
    fn empty_input() {
        let set = normalize(Vec::new());
        assert!(set.is_empty());
        assert!(set.starting_before(10).is_empty());
    }
}
