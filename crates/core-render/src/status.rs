//! Status line composition.
//!
//! Two stages: `compose_status` produces ordered [`StatusSegment`]s and
//! `format_status` joins them. Format:
//! `<name> [<kind>] <visible>/<total> lines, <folded> folded, scale <s>`.

use core_model::ContentKind;

pub struct StatusContext<'a> {
    pub name: Option<&'a str>,
    pub kind: ContentKind,
    pub total_lines: usize,
    pub visible_lines: usize,
    pub folded: usize,
    pub font_scale: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatusSegment<'a> {
    Name(&'a str),
    Kind(&'static str),
    Lines { visible: usize, total: usize },
    Folded(usize),
    Scale(f64),
}

pub fn compose_status<'a>(ctx: &StatusContext<'a>) -> Vec<StatusSegment<'a>> {
    let mut segs = vec![StatusSegment::Name(ctx.name.unwrap_or("[No Content]"))];
    segs.push(StatusSegment::Kind(match ctx.kind {
        ContentKind::Code => "code",
        ContentKind::Markdown => "markdown",
        ContentKind::Image => "image",
    }));
    segs.push(StatusSegment::Lines {
        visible: ctx.visible_lines,
        total: ctx.total_lines,
    });
    if ctx.folded > 0 {
        segs.push(StatusSegment::Folded(ctx.folded));
    }
    segs.push(StatusSegment::Scale(ctx.font_scale));
    segs
}

pub fn format_status(segs: &[StatusSegment<'_>]) -> String {
    let mut out = String::new();
    for seg in segs {
        match seg {
            StatusSegment::Name(name) => out.push_str(name),
            StatusSegment::Kind(kind) => {
                out.push_str(" [");
                out.push_str(kind);
                out.push(']');
            }
            StatusSegment::Lines { visible, total } => {
                out.push_str(&format!(" {visible}/{total} lines"));
            }
            StatusSegment::Folded(n) => out.push_str(&format!(", {n} folded")),
            StatusSegment::Scale(s) => out.push_str(&format!(", scale {s:.2}")),
        }
    }
    out
}

pub fn build_status(ctx: &StatusContext<'_>) -> String {
    format_status(&compose_status(ctx))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(folded: usize) -> StatusContext<'static> {
        StatusContext {
            name: Some("main.rs"),
            kind: ContentKind::Code,
            total_lines: 10,
            visible_lines: 7,
            folded,
            font_scale: 14.0,
        }
    }

    #[test]
    fn folded_segment_only_when_folded() {
        assert_eq!(build_status(&ctx(0)), "main.rs [code] 7/10 lines, scale 14.00");
        assert_eq!(
            build_status(&ctx(2)),
            "main.rs [code] 7/10 lines, 2 folded, scale 14.00"
        );
    }

    #[test]
    fn missing_name_placeholder() {
        let mut c = ctx(0);
        c.name = None;
        c.kind = ContentKind::Markdown;
        let segs = compose_status(&c);
        assert_eq!(segs[0], StatusSegment::Name("[No Content]"));
        assert_eq!(segs[1], StatusSegment::Kind("markdown"));
    }
}
