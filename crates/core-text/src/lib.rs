//! Rope-backed read-only text buffer.
//!
//! The viewer never edits content; it only needs stable line access for the
//! fold pipeline and the line renderer. Lines are split on `\n` only (ropey is
//! built without `unicode_lines`/`cr_lines`), so a trailing newline yields a
//! final empty line and a `\r` stays part of the line content.
//!
//! Line numbers exposed here are 1-based to match the fold ranges handed to
//! the renderer. Zero-based access stays internal.

use ropey::Rope;
use std::borrow::Cow;

/// A text buffer backed by a `ropey::Rope`.
#[derive(Clone)]
pub struct Buffer {
    rope: Rope,
    pub name: String,
}

impl Buffer {
    /// Construct a buffer from an in-memory string slice.
    pub fn from_str(name: impl Into<String>, content: &str) -> Self {
        Self {
            rope: Rope::from_str(content),
            name: name.into(),
        }
    }

    /// Total number of lines. Always at least 1 (an empty buffer has one empty line).
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Total byte length of the content.
    pub fn len_bytes(&self) -> usize {
        self.rope.len_bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_bytes() == 0
    }

    /// Content of the 1-based line `number`, excluding its `\n` terminator.
    ///
    /// Borrows when the line lives in a single rope chunk, allocates otherwise.
    pub fn line(&self, number: usize) -> Option<Cow<'_, str>> {
        if number == 0 || number > self.rope.len_lines() {
            return None;
        }
        let slice = self.rope.line(number - 1);
        let text: Cow<'_, str> = match slice.as_str() {
            Some(s) => Cow::Borrowed(s),
            None => Cow::Owned(slice.to_string()),
        };
        Some(match text {
            Cow::Borrowed(s) => Cow::Borrowed(s.strip_suffix('\n').unwrap_or(s)),
            Cow::Owned(mut s) => {
                if s.ends_with('\n') {
                    s.pop();
                }
                Cow::Owned(s)
            }
        })
    }

    /// Iterate `(line_number, content)` pairs in order, 1-based.
    pub fn lines(&self) -> Lines<'_> {
        Lines {
            buffer: self,
            next: 1,
        }
    }

    /// Copy the full content back out.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("name", &self.name)
            .field("lines", &self.line_count())
            .field("bytes", &self.len_bytes())
            .finish()
    }
}

/// Iterator returned by [`Buffer::lines`].
pub struct Lines<'a> {
    buffer: &'a Buffer,
    next: usize,
}

impl<'a> Iterator for Lines<'a> {
    type Item = (usize, Cow<'a, str>);

    fn next(&mut self) -> Option<Self::Item> {
        let number = self.next;
        let line = self.buffer.line(number)?;
        self.next += 1;
        Some((number, line))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.buffer.line_count() + 1).saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Lines<'_> {}
