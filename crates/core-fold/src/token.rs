//! Structural token vocabulary shared by the scanner and the matcher.

use std::fmt;

/// Bracket family. Each family has exactly one opener and one closer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bracket {
    Curly,
    Square,
    Paren,
}

impl Bracket {
    pub fn from_open(c: char) -> Option<Self> {
        match c {
            '{' => Some(Bracket::Curly),
            '[' => Some(Bracket::Square),
            '(' => Some(Bracket::Paren),
            _ => None,
        }
    }

    pub fn from_close(c: char) -> Option<Self> {
        match c {
            '}' => Some(Bracket::Curly),
            ']' => Some(Bracket::Square),
            ')' => Some(Bracket::Paren),
            _ => None,
        }
    }

    pub const fn open_char(self) -> char {
        match self {
            Bracket::Curly => '{',
            Bracket::Square => '[',
            Bracket::Paren => '(',
        }
    }

    pub const fn close_char(self) -> char {
        match self {
            Bracket::Curly => '}',
            Bracket::Square => ']',
            Bracket::Paren => ')',
        }
    }
}

/// Token kinds. Tag variants borrow the tag name from the scanned line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind<'a> {
    BracketOpen(Bracket),
    BracketClose(Bracket),
    TagOpen(&'a str),
    TagClose(&'a str),
}

impl TokenKind<'_> {
    pub fn is_open(&self) -> bool {
        matches!(self, TokenKind::BracketOpen(_) | TokenKind::TagOpen(_))
    }
}

/// A structural token found on a 1-based `line`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub line: usize,
}

impl<'a> Token<'a> {
    pub const fn new(kind: TokenKind<'a>, line: usize) -> Self {
        Self { kind, line }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::BracketOpen(b) => write!(f, "{}@{}", b.open_char(), self.line),
            TokenKind::BracketClose(b) => write!(f, "{}@{}", b.close_char(), self.line),
            TokenKind::TagOpen(name) => write!(f, "<{name}>@{}", self.line),
            TokenKind::TagClose(name) => write!(f, "</{name}>@{}", self.line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracket_char_mapping_is_symmetric() {
        for b in [Bracket::Curly, Bracket::Square, Bracket::Paren] {
            assert_eq!(Bracket::from_open(b.open_char()), Some(b));
            assert_eq!(Bracket::from_close(b.close_char()), Some(b));
            assert_eq!(Bracket::from_open(b.close_char()), None);
        }
        assert_eq!(Bracket::from_open('<'), None);
    }

    #[test]
    fn display_is_compact() {
        let t = Token::new(TokenKind::TagClose("div"), 4);
        assert_eq!(t.to_string(), "</div>@4");
        let b = Token::new(TokenKind::BracketOpen(Bracket::Square), 1);
        assert_eq!(b.to_string(), "[@1");
        assert!(b.kind.is_open());
    }
}
