//! Line scanner: extracts ordered structural tokens from one line of text.
//!
//! This is a best-effort heuristic, not a lexer:
//! * A line whose trimmed content starts with a comment marker is skipped
//!   whole. Trailing comments, block comment bodies and string literals are
//!   not recognized.
//! * Anything shaped like a markup tag is a tag token, so `a<b> c` yields an
//!   opening `b` tag. Self-closing tags (`<br/>`) never produce tokens.
//! * An opening tag consumes everything up to its first `>`, including any
//!   brackets inside its attributes.
//!
//! Scanning runs left to right. At each byte the scanner tries, in order, an
//! opening tag, a closing tag, then a single bracket; on a match it resumes
//! after the matched text, otherwise it advances one byte. Every structural
//! character is ASCII so byte scanning never splits a UTF-8 sequence.

use crate::token::{Bracket, Token, TokenKind};
use smallvec::SmallVec;
use std::fmt;

/// Markers that skip a line when its trimmed content starts with one of them.
pub const DEFAULT_COMMENT_MARKERS: [&str; 4] = ["//", "/*", "*", "#"];

/// Tokens found on a single line, in order of appearance.
pub type LineTokens<'a> = SmallVec<[Token<'a>; 8]>;

/// Seam between per-line tokenization and the stack matcher. A language-aware
/// lexer can replace [`HeuristicScanner`] without touching matching or
/// normalization.
pub trait LineScan: fmt::Debug {
    fn scan_line<'a>(&self, text: &'a str, line: usize) -> LineTokens<'a>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeuristicScanner {
    comment_markers: Vec<String>,
}

impl Default for HeuristicScanner {
    fn default() -> Self {
        Self::with_comment_markers(DEFAULT_COMMENT_MARKERS)
    }
}

impl HeuristicScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a scanner with a custom marker set. Empty markers are dropped
    /// since they would skip every line.
    pub fn with_comment_markers<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let comment_markers = markers
            .into_iter()
            .map(Into::into)
            .filter(|m: &String| !m.is_empty())
            .collect();
        Self { comment_markers }
    }

    pub fn comment_markers(&self) -> &[String] {
        &self.comment_markers
    }

    pub fn is_comment_line(&self, text: &str) -> bool {
        let trimmed = text.trim_matches(is_line_padding);
        self.comment_markers
            .iter()
            .any(|m| trimmed.starts_with(m.as_str()))
    }
}

/// Characters stripped before the comment-marker check: Unicode whitespace
/// plus the byte-order mark, minus NEL (U+0085).
fn is_line_padding(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

impl LineScan for HeuristicScanner {
    fn scan_line<'a>(&self, text: &'a str, line: usize) -> LineTokens<'a> {
        let mut out = LineTokens::new();
        if self.is_comment_line(text) {
            tracing::trace!(target: "fold.scan", line, "comment_line_skipped");
            return out;
        }
        let bytes = text.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            let b = bytes[i];
            if b == b'<' {
                if let Some((name, next)) = open_tag_at(text, i) {
                    out.push(Token::new(TokenKind::TagOpen(name), line));
                    i = next;
                    continue;
                }
                if let Some((name, next)) = close_tag_at(text, i) {
                    out.push(Token::new(TokenKind::TagClose(name), line));
                    i = next;
                    continue;
                }
            } else if let Some(bracket) = Bracket::from_open(b as char) {
                out.push(Token::new(TokenKind::BracketOpen(bracket), line));
            } else if let Some(bracket) = Bracket::from_close(b as char) {
                out.push(Token::new(TokenKind::BracketClose(bracket), line));
            }
            i += 1;
        }
        out
    }
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b':' | b'-')
}

fn name_end(bytes: &[u8], from: usize) -> usize {
    bytes[from.min(bytes.len())..]
        .iter()
        .position(|&b| !is_name_byte(b))
        .map_or(bytes.len(), |p| from + p)
}

/// `<name ...>` starting at `lt`. Rejected when the first `>` after the name
/// is preceded by `/` (self-closing) or when no `>` follows at all.
fn open_tag_at(text: &str, lt: usize) -> Option<(&str, usize)> {
    let bytes = text.as_bytes();
    let start = lt + 1;
    let end = name_end(bytes, start);
    if end == start {
        return None;
    }
    let gt = end + bytes[end..].iter().position(|&b| b == b'>')?;
    if bytes[gt - 1] == b'/' {
        return None;
    }
    Some((&text[start..end], gt + 1))
}

/// `</name>` starting at `lt`; the name must be followed directly by `>`.
fn close_tag_at(text: &str, lt: usize) -> Option<(&str, usize)> {
    let bytes = text.as_bytes();
    if bytes.get(lt + 1) != Some(&b'/') {
        return None;
    }
    let start = lt + 2;
    let end = name_end(bytes, start);
    if end == start || bytes.get(end) != Some(&b'>') {
        return None;
    }
    Some((&text[start..end], end + 1))
}
