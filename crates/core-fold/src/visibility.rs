//! Line visibility resolver.
//!
//! Combines the range set with the fold state into one of three outcomes per
//! line. A line is hidden only when it sits strictly inside a folded range, so
//! a folded range keeps its start line (the summary) and its end line (the
//! closer) on screen. Hiding is a render directive only; line data is never
//! touched.

use crate::normalize::RangeSet;
use crate::range::FoldRange;
use crate::state::FoldState;
use core_events::SelectionSnapshot;

/// Marker class for a foldable line that is currently expanded.
pub const FOLDABLE_CLASS: &str = "foldable-line";
/// Marker class for a foldable line that is currently collapsed.
pub const FOLDED_CLASS: &str = "foldable-line folded";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineVisibility {
    Plain,
    Foldable { range: FoldRange, folded: bool },
    Hidden,
}

impl LineVisibility {
    pub fn is_hidden(&self) -> bool {
        matches!(self, LineVisibility::Hidden)
    }
}

/// Resolve a single 1-based line.
pub fn resolve(line: usize, ranges: &RangeSet, state: &FoldState) -> LineVisibility {
    let hidden = ranges
        .starting_before(line)
        .iter()
        .any(|r| state.is_folded(r.start) && r.contains_interior(line));
    if hidden {
        return LineVisibility::Hidden;
    }
    match ranges.starting_at(line) {
        Some(range) => LineVisibility::Foldable {
            range: *range,
            folded: state.is_folded(range.start),
        },
        None => LineVisibility::Plain,
    }
}

/// Resolve lines `1..=line_count` in one sweep over the sorted range set.
///
/// Equivalent to calling [`resolve`] per line. Tracks the furthest end of any
/// folded range that started above the current line.
pub fn resolve_all(line_count: usize, ranges: &RangeSet, state: &FoldState) -> Vec<LineVisibility> {
    let sorted = ranges.as_slice();
    let mut out = Vec::with_capacity(line_count);
    let mut next = 0;
    let mut folded_until = 0;
    for line in 1..=line_count {
        while next < sorted.len() && sorted[next].start < line {
            let r = &sorted[next];
            if state.is_folded(r.start) {
                folded_until = folded_until.max(r.end);
            }
            next += 1;
        }
        let vis = if line < folded_until {
            LineVisibility::Hidden
        } else {
            match sorted.get(next) {
                Some(r) if r.start == line => LineVisibility::Foldable {
                    range: *r,
                    folded: state.is_folded(r.start),
                },
                _ => LineVisibility::Plain,
            }
        };
        out.push(vis);
    }
    out
}

/// Handler attached to a foldable line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldAction {
    Toggle { start: usize },
}

impl FoldAction {
    /// Run the action for an activation that produced `selection`.
    ///
    /// Does nothing when the gesture also selected text. Returns whether the
    /// fold state changed.
    pub fn apply(self, state: &mut FoldState, selection: &SelectionSnapshot) -> bool {
        if !selection.is_empty() {
            tracing::trace!(
                target: "fold.state",
                action = ?self,
                selected_len = selection.text().len(),
                "activation_suppressed_by_selection"
            );
            return false;
        }
        match self {
            FoldAction::Toggle { start } => {
                state.toggle(start);
                true
            }
        }
    }
}

/// Per-line output consumed by a line renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineDirective {
    pub line: usize,
    pub hidden: bool,
    pub foldable_marker_class: Option<&'static str>,
    pub on_activate: Option<FoldAction>,
}

impl LineDirective {
    pub fn from_visibility(line: usize, vis: LineVisibility) -> Self {
        match vis {
            LineVisibility::Hidden => Self {
                line,
                hidden: true,
                foldable_marker_class: None,
                on_activate: None,
            },
            LineVisibility::Foldable { range, folded } => Self {
                line,
                hidden: false,
                foldable_marker_class: Some(if folded { FOLDED_CLASS } else { FOLDABLE_CLASS }),
                on_activate: Some(FoldAction::Toggle { start: range.start }),
            },
            LineVisibility::Plain => Self {
                line,
                hidden: false,
                foldable_marker_class: None,
                on_activate: None,
            },
        }
    }

    pub fn is_folded(&self) -> bool {
        self.foldable_marker_class == Some(FOLDED_CLASS)
    }
}
