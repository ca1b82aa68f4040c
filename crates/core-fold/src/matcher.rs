//! Stack matcher: pairs openers with closers across the whole file.
//!
//! One stack lives for the full pass. Openers push; a closer pops only when it
//! matches the top entry, otherwise it is ignored in place. The matcher never
//! backtracks and never fails: malformed input just yields fewer ranges.
//! Openers still on the stack at the end are dropped.

use crate::range::FoldRange;
use crate::token::{Bracket, Token, TokenKind};

/// Identity of an unmatched opener. Tag names are owned because entries
/// outlive the line they were scanned from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol {
    Bracket(Bracket),
    Tag(String),
}

impl Symbol {
    fn closes_with(&self, kind: &TokenKind<'_>) -> bool {
        match (self, kind) {
            (Symbol::Bracket(open), TokenKind::BracketClose(close)) => open == close,
            (Symbol::Tag(open), TokenKind::TagClose(close)) => open == close,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackEntry {
    pub line: usize,
    pub symbol: Symbol,
}

#[derive(Debug, Default)]
pub struct StackMatcher {
    stack: Vec<StackEntry>,
    ranges: Vec<FoldRange>,
    ignored_closers: usize,
}

/// Raw matcher output, before normalization.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    pub ranges: Vec<FoldRange>,
    pub unmatched_openers: usize,
    pub ignored_closers: usize,
}

impl StackMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, token: &Token<'_>) {
        match token.kind {
            TokenKind::BracketOpen(b) => self.stack.push(StackEntry {
                line: token.line,
                symbol: Symbol::Bracket(b),
            }),
            TokenKind::TagOpen(name) => self.stack.push(StackEntry {
                line: token.line,
                symbol: Symbol::Tag(name.to_owned()),
            }),
            ref close @ (TokenKind::BracketClose(_) | TokenKind::TagClose(_)) => {
                let matches_top = self
                    .stack
                    .last()
                    .is_some_and(|top| top.symbol.closes_with(close));
                if !matches_top {
                    self.ignored_closers += 1;
                    tracing::trace!(target: "fold.match", %token, depth = self.stack.len(), "closer_ignored");
                    return;
                }
                if let Some(opener) = self.stack.pop()
                    && let Some(range) = FoldRange::new(opener.line, token.line)
                {
                    self.ranges.push(range);
                }
            }
        }
    }

    pub fn feed_all<'t, 'a: 't, I>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = &'t Token<'a>>,
    {
        for token in tokens {
            self.feed(token);
        }
    }

    /// Current open depth.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// End of input: discard leftover openers and hand back the raw ranges.
    pub fn finish(self) -> MatchOutcome {
        let unmatched_openers = self.stack.len();
        if unmatched_openers > 0 {
            tracing::trace!(target: "fold.match", unmatched_openers, "openers_discarded");
        }
        MatchOutcome {
            ranges: self.ranges,
            unmatched_openers,
            ignored_closers: self.ignored_closers,
        }
    }
}
