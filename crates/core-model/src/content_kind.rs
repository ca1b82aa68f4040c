//! How loaded content is presented, derived from the file name.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContentKind {
    /// Line-oriented source; the only kind that gets fold ranges.
    #[default]
    Code,
    Markdown,
    Image,
}

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "svg"];

impl ContentKind {
    /// Classify by the text after the last `.`, case-insensitively. A name
    /// without a dot is its own extension (`Makefile` → `makefile`).
    pub fn from_filename(name: &str) -> Self {
        let ext = name.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
        if ext == "md" {
            ContentKind::Markdown
        } else if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            ContentKind::Image
        } else {
            ContentKind::Code
        }
    }

    pub fn is_foldable(self) -> bool {
        matches!(self, ContentKind::Code)
    }
}
