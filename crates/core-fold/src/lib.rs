//! Structural folding engine.
//!
//! Pipeline (run once per content load, synchronous, no I/O):
//!
//! ```text
//! text ─▶ scanner (per line) ─▶ stack matcher (whole file) ─▶ normalizer ─▶ RangeSet
//! RangeSet + FoldState ─▶ visibility resolver ─▶ LineDirective per line
//! ```
//!
//! [`FoldModel`] owns the range set and the fold state for one viewer. Loading
//! new content resets the fold state before the new range set is published,
//! so a render pass never mixes ranges and folds from different content.
//!
//! Malformed input never errors: unmatched closers are ignored where they
//! occur and unmatched openers are dropped at the end, which only means fewer
//! folds.

use core_events::SelectionSnapshot;
use core_text::Buffer;

pub mod matcher;
pub mod normalize;
pub mod range;
pub mod scanner;
pub mod state;
pub mod token;
pub mod visibility;

pub use matcher::{MatchOutcome, StackMatcher};
pub use normalize::{RangeSet, normalize};
pub use range::FoldRange;
pub use scanner::{DEFAULT_COMMENT_MARKERS, HeuristicScanner, LineScan};
pub use state::FoldState;
pub use token::{Bracket, Token, TokenKind};
pub use visibility::{
    FOLDABLE_CLASS, FOLDED_CLASS, FoldAction, LineDirective, LineVisibility, resolve, resolve_all,
};

/// Run scanner, matcher and normalizer over every line of `buffer`.
///
/// Deterministic: depends only on the text and the scanner configuration.
pub fn compute_ranges(buffer: &Buffer, scanner: &dyn LineScan) -> RangeSet {
    let mut matcher = StackMatcher::new();
    for (number, line) in buffer.lines() {
        let tokens = scanner.scan_line(&line, number);
        matcher.feed_all(&tokens);
    }
    let outcome = matcher.finish();
    let raw = outcome.ranges.len();
    let ranges = normalize(outcome.ranges);
    tracing::debug!(
        target: "fold.pipeline",
        lines = buffer.line_count(),
        raw,
        ranges = ranges.len(),
        unmatched_openers = outcome.unmatched_openers,
        ignored_closers = outcome.ignored_closers,
        "ranges_computed"
    );
    ranges
}

/// Range set + fold state for one viewer.
#[derive(Debug)]
pub struct FoldModel {
    scanner: Box<dyn LineScan>,
    ranges: RangeSet,
    state: FoldState,
    revision: u64,
}

impl Default for FoldModel {
    fn default() -> Self {
        Self::new(HeuristicScanner::default())
    }
}

impl FoldModel {
    pub fn new(scanner: impl LineScan + 'static) -> Self {
        Self {
            scanner: Box::new(scanner),
            ranges: RangeSet::new(),
            state: FoldState::new(),
            revision: 0,
        }
    }

    /// Recompute ranges for new content. `None` publishes an empty range set.
    ///
    /// The fold state is cleared first, then the new ranges replace the old.
    pub fn load(&mut self, buffer: Option<&Buffer>) {
        self.state.reset();
        let ranges = match buffer {
            Some(buffer) if !buffer.is_empty() => compute_ranges(buffer, self.scanner.as_ref()),
            _ => RangeSet::new(),
        };
        self.ranges = ranges;
        self.revision += 1;
        tracing::debug!(
            target: "fold.pipeline",
            revision = self.revision,
            ranges = self.ranges.len(),
            "ranges_published"
        );
    }

    /// Bumped on every [`load`](Self::load).
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn ranges(&self) -> &RangeSet {
        &self.ranges
    }

    pub fn state(&self) -> &FoldState {
        &self.state
    }

    pub fn range_at(&self, start: usize) -> Option<&FoldRange> {
        self.ranges.starting_at(start)
    }

    /// Toggle the range beginning on `start`. Returns the new folded flag, or
    /// `None` (no change) when no range begins there.
    pub fn toggle(&mut self, start: usize) -> Option<bool> {
        if !self.ranges.has_start(start) {
            tracing::trace!(target: "fold.state", start, "toggle_not_a_range_start");
            return None;
        }
        Some(self.state.toggle(start))
    }

    /// Apply an activation handler taken from a directive.
    pub fn activate(&mut self, action: FoldAction, selection: &SelectionSnapshot) -> bool {
        let FoldAction::Toggle { start } = action;
        if !self.ranges.has_start(start) {
            tracing::trace!(target: "fold.state", start, "stale_activation_ignored");
            return false;
        }
        action.apply(&mut self.state, selection)
    }

    pub fn fold_all(&mut self) {
        for start in self.ranges.starts() {
            self.state.fold(start);
        }
    }

    pub fn unfold_all(&mut self) {
        self.state.reset();
    }

    pub fn visibility(&self, line: usize) -> LineVisibility {
        resolve(line, &self.ranges, &self.state)
    }

    pub fn directive(&self, line: usize) -> LineDirective {
        LineDirective::from_visibility(line, self.visibility(line))
    }

    /// Directives for lines `1..=line_count`.
    pub fn directives(&self, line_count: usize) -> Vec<LineDirective> {
        resolve_all(line_count, &self.ranges, &self.state)
            .into_iter()
            .enumerate()
            .map(|(idx, vis)| LineDirective::from_visibility(idx + 1, vis))
            .collect()
    }

    /// Number of lines a renderer shows out of `line_count`.
    pub fn visible_line_count(&self, line_count: usize) -> usize {
        resolve_all(line_count, &self.ranges, &self.state)
            .iter()
            .filter(|v| !v.is_hidden())
            .count()
    }
}
