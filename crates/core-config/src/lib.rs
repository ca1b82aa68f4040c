//! Configuration loading and parsing.
//!
//! Parses `oxview.toml` (or an override path provided by the binary):
//!
//! ```toml
//! [zoom]
//! initial = 14
//!
//! [fold]
//! comment_markers = ["//", "/*", "*", "#"]
//! ```
//!
//! Every field is optional. A missing file yields defaults; a file that fails
//! to parse also yields defaults, with a `warn` event so the user can find out
//! why their settings were ignored. Unknown fields are ignored.
//!
//! The raw `zoom.initial` value is retained; the clamp into the zoom bounds is
//! applied by [`Config::effective_initial_scale`].

use anyhow::Result;
use core_zoom::{DEFAULT_SCALE, FontScale, MAX_SCALE, MIN_SCALE};
use serde::Deserialize;
use std::{fs, io, path::PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "oxview.toml";

#[derive(Debug, Deserialize, Clone)]
pub struct ZoomConfig {
    #[serde(default = "ZoomConfig::default_initial")]
    pub initial: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            initial: Self::default_initial(),
        }
    }
}

impl ZoomConfig {
    const fn default_initial() -> f64 {
        DEFAULT_SCALE
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct FoldConfig {
    #[serde(default = "FoldConfig::default_comment_markers")]
    pub comment_markers: Vec<String>,
}

impl Default for FoldConfig {
    fn default() -> Self {
        Self {
            comment_markers: Self::default_comment_markers(),
        }
    }
}

impl FoldConfig {
    fn default_comment_markers() -> Vec<String> {
        ["//", "/*", "*", "#"].map(String::from).to_vec()
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub zoom: ZoomConfig,
    #[serde(default)]
    pub fold: FoldConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
    pub source: Option<PathBuf>,
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("oxview").join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!(target: "config", path = %path.display(), "config_not_found_using_defaults");
            return Ok(Config::default());
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_unreadable_using_defaults");
            return Ok(Config::default());
        }
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => Ok(Config {
            raw: Some(content),
            file,
            source: Some(path),
        }),
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_error_using_defaults");
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Starting zoom scale clamped into `[MIN_SCALE, MAX_SCALE]`.
    pub fn effective_initial_scale(&self) -> f64 {
        let raw = self.file.zoom.initial;
        let scale = FontScale::new(raw);
        if scale.is_clamped_from(raw) {
            info!(
                target: "config",
                raw,
                clamped = scale.get(),
                min = MIN_SCALE,
                max = MAX_SCALE,
                "zoom_initial_clamped"
            );
        }
        scale.get()
    }

    pub fn comment_markers(&self) -> &[String] {
        &self.file.fold.comment_markers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tracing::Level;
    use tracing::subscriber::with_default;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone)]
    struct BufferWriter {
        inner: Arc<Mutex<Vec<u8>>>,
    }

    impl BufferWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buf = Arc::new(Mutex::new(Vec::new()));
            (Self { inner: buf.clone() }, buf)
        }
    }

    struct LockedWriter<'a> {
        guard: MutexGuard<'a, Vec<u8>>,
    }

    impl Write for LockedWriter<'_> {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.guard.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for BufferWriter {
        type Writer = LockedWriter<'a>;

        fn make_writer(&'a self) -> Self::Writer {
            LockedWriter {
                guard: self.inner.lock().expect("log buffer poisoned"),
            }
        }
    }

    fn capture<F: FnOnce()>(f: F) -> String {
        let (writer, buffer) = BufferWriter::new();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .with_writer(writer)
            .finish();
        with_default(subscriber, f);
        String::from_utf8(buffer.lock().unwrap().clone()).unwrap()
    }

    #[test]
    fn default_config_when_missing_file() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_hopefully__.toml"))).unwrap();
        assert_eq!(cfg.file.zoom.initial, 14.0);
        assert_eq!(cfg.comment_markers(), &["//", "/*", "*", "#"]);
        assert!(cfg.source.is_none());
    }

    #[test]
    fn parses_zoom_and_fold_sections() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            tmp.path(),
            "[zoom]\ninitial = 18\n[fold]\ncomment_markers = [\"--\", \";\"]\n",
        )
        .unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.file.zoom.initial, 18.0);
        assert_eq!(cfg.effective_initial_scale(), 18.0);
        assert_eq!(cfg.comment_markers(), &["--", ";"]);
        assert_eq!(cfg.source.as_deref(), Some(tmp.path()));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "[zoom]\n").unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.file.zoom.initial, 14.0);
        assert_eq!(cfg.comment_markers().len(), 4);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "[zoom]\ninitial = 12\nstep = 3\n[theme]\nname = \"x\"\n")
            .unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.file.zoom.initial, 12.0);
    }

    #[test]
    fn parse_error_falls_back_and_warns() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "[zoom\ninitial = ").unwrap();
        let mut cfg = None;
        let out = capture(|| {
            cfg = Some(load_from(Some(tmp.path().to_path_buf())).unwrap());
        });
        let cfg = cfg.unwrap();
        assert!(cfg.raw.is_none());
        assert_eq!(cfg.file.zoom.initial, 14.0);
        assert!(out.contains("WARN config:"), "{out}");
        assert!(out.contains("config_parse_error_using_defaults"));
    }

    #[test]
    fn clamp_logging_uses_config_target() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "[zoom]\ninitial = 64\n").unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        let mut eff = 0.0;
        let out = capture(|| eff = cfg.effective_initial_scale());
        assert_eq!(eff, 32.0);
        assert!(out.contains("INFO config:"));
        assert!(out.contains("zoom_initial_clamped"));
    }

    #[test]
    fn in_range_initial_does_not_log() {
        let cfg = Config::default();
        let out = capture(|| {
            cfg.effective_initial_scale();
        });
        assert!(!out.contains("zoom_initial_clamped"));
    }
}
