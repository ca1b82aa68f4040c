use core_model::Viewer;
use core_render::{RenderOptions, render_to_string};
use pretty_assertions::assert_eq;

const BARE: RenderOptions = RenderOptions {
    line_numbers: true,
    status_line: false,
};

fn viewer(name: &str, text: &str) -> Viewer {
    let mut v = Viewer::default();
    v.load(name, Some(text));
    v
}

#[test]
fn expanded_frame_marks_fold_starts() {
    let v = viewer("f.js", "function f() {\n  return 1;\n}");
    assert_eq!(
        render_to_string(&v.frame(), BARE),
        "1 ▾ function f() {\n2     return 1;\n3   }\n"
    );
}

#[test]
fn folded_frame_skips_interior_and_keeps_boundaries() {
    let mut v = viewer("f.js", "function f() {\n  return 1;\n}");
    v.toggle(1);
    assert_eq!(
        render_to_string(&v.frame(), BARE),
        "1 ▸ function f() {\n3   }\n"
    );
    v.toggle(1);
    assert!(render_to_string(&v.frame(), BARE).contains("return 1;"));
}

#[test]
fn gutter_width_follows_line_count() {
    let text = (1..=10).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
    let v = viewer("n.txt", &text);
    let out = render_to_string(&v.frame(), BARE);
    assert!(out.starts_with(" 1   1\n"));
    assert!(out.ends_with("10   10\n"));
}

#[test]
fn status_line_reports_counts_and_scale() {
    let mut v = viewer("page.html", "<div>\n  <span>x</span>\n</div>");
    v.toggle(1);
    let out = render_to_string(&v.frame(), RenderOptions::default());
    let last = out.lines().last().unwrap_or_default();
    assert_eq!(last, "page.html [code] 2/3 lines, 1 folded, scale 14.00");
}

#[test]
fn status_counts_folds_hidden_inside_an_outer_fold() {
    let mut v = viewer("nest.js", "a {\n  b {\n    c;\n  }\n}");
    v.toggle(2);
    v.toggle(1);
    let out = render_to_string(&v.frame(), RenderOptions::default());
    assert_eq!(out, "1 ▸ a {\n5   }\nnest.js [code] 2/5 lines, 2 folded, scale 14.00\n");
}

#[test]
fn images_render_a_placeholder() {
    let v = viewer("logo.png", "binary");
    let out = render_to_string(&v.frame(), BARE);
    assert_eq!(out, "[image: logo.png]\n");
}

#[test]
fn empty_viewer_renders_status_only() {
    let v = Viewer::default();
    let out = render_to_string(&v.frame(), RenderOptions::default());
    assert_eq!(out, "[No Content] [code] 0/0 lines, scale 14.00\n");
}
