//! Plain-text line renderer.
//!
//! Consumes a [`ViewFrame`]: one [`LineDirective`] per line plus the font
//! scale. Hidden lines are skipped entirely. Visible lines get a gutter with
//! the 1-based line number and a fold marker:
//!
//! * `▾` foldable, expanded
//! * `▸` foldable, folded
//! * ` ` plain
//!
//! The text itself is written untouched. Rendering never mutates the buffer;
//! a hidden line comes back as soon as its fold is toggled open.

use core_fold::LineDirective;
use core_model::{ContentKind, ViewFrame};
use std::fmt::{self, Write};

pub mod status;

pub const MARKER_EXPANDED: char = '▾';
pub const MARKER_FOLDED: char = '▸';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub line_numbers: bool,
    pub status_line: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            line_numbers: true,
            status_line: true,
        }
    }
}

fn marker(d: &LineDirective) -> char {
    match d.foldable_marker_class {
        Some(_) if d.is_folded() => MARKER_FOLDED,
        Some(_) => MARKER_EXPANDED,
        None => ' ',
    }
}

/// Write the visible lines of `frame` into `out`.
pub fn render_frame<W: Write>(
    frame: &ViewFrame<'_>,
    opts: RenderOptions,
    out: &mut W,
) -> fmt::Result {
    let Some(buffer) = frame.buffer else {
        if opts.status_line {
            writeln!(out, "{}", frame_status(frame))?;
        }
        return Ok(());
    };

    if frame.kind == ContentKind::Image {
        writeln!(out, "[image: {}]", buffer.name)?;
    } else {
        let width = buffer.line_count().to_string().len();
        let mut written = 0usize;
        for d in frame.directives.iter().filter(|d| !d.hidden) {
            let Some(text) = buffer.line(d.line) else {
                continue;
            };
            if opts.line_numbers {
                write!(out, "{:>width$} {} ", d.line, marker(d))?;
            }
            writeln!(out, "{text}")?;
            written += 1;
        }
        tracing::trace!(
            target: "render",
            written,
            total = frame.directives.len(),
            font_scale = frame.font_scale,
            "frame_rendered"
        );
    }

    if opts.status_line {
        writeln!(out, "{}", frame_status(frame))?;
    }
    Ok(())
}

pub fn render_to_string(frame: &ViewFrame<'_>, opts: RenderOptions) -> String {
    let mut s = String::new();
    // Writing into a String cannot fail.
    let _ = render_frame(frame, opts, &mut s);
    s
}

fn frame_status(frame: &ViewFrame<'_>) -> String {
    let ctx = status::StatusContext {
        name: frame.buffer.map(|b| b.name.as_str()),
        kind: frame.kind,
        total_lines: frame.directives.len(),
        visible_lines: frame.directives.iter().filter(|d| !d.hidden).count(),
        folded: frame.folded,
        font_scale: frame.font_scale,
    };
    status::build_status(&ctx)
}
