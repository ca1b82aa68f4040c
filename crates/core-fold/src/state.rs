//! Fold state store: the set of collapsed range start lines.
//!
//! Pure toggle semantics. The store does not know about ranges; callers
//! (see `FoldModel`) only toggle starts present in the current range set.

use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoldState {
    folded: BTreeSet<usize>,
}

impl FoldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip `start`. Returns `true` when the line is folded afterwards.
    pub fn toggle(&mut self, start: usize) -> bool {
        let folded = if self.folded.remove(&start) {
            false
        } else {
            self.folded.insert(start);
            true
        };
        tracing::trace!(target: "fold.state", start, folded, total = self.folded.len(), "toggle");
        folded
    }

    pub fn fold(&mut self, start: usize) {
        self.folded.insert(start);
    }

    pub fn reset(&mut self) {
        if !self.folded.is_empty() {
            tracing::trace!(target: "fold.state", cleared = self.folded.len(), "reset");
        }
        self.folded.clear();
    }

    pub fn is_folded(&self, start: usize) -> bool {
        self.folded.contains(&start)
    }

    pub fn len(&self) -> usize {
        self.folded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }

    /// Folded starts in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.folded.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_restores() {
        let mut s = FoldState::new();
        s.toggle(4);
        let before = s.clone();
        assert!(s.toggle(9));
        assert!(!s.toggle(9));
        assert_eq!(s, before);
    }

    #[test]
    fn toggle_reports_new_state() {
        let mut s = FoldState::new();
        assert!(s.toggle(1));
        assert!(s.is_folded(1));
        assert!(!s.toggle(1));
        assert!(!s.is_folded(1));
    }

    #[test]
    fn reset_clears_everything() {
        let mut s = FoldState::new();
        s.fold(3);
        s.fold(1);
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![1, 3]);
        s.reset();
        assert!(s.is_empty());
        assert_eq!(s.len(), 0);
    }
}
