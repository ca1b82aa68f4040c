//! oxview entrypoint: load a file, apply folds, print the visible lines.
use anyhow::{Context, Result, bail};
use clap::Parser;
use core_config::{Config, load_from};
use core_model::{Viewer, ViewerOptions};
use core_render::{RenderOptions, render_to_string};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE_NAME: &str = "oxview.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "oxview", version, about = "Source viewer with bracket/tag folding")]
struct Args {
    /// File to view (UTF-8 text).
    pub path: PathBuf,
    /// Fold the range starting at LINE (1-based). Repeatable.
    #[arg(long = "fold", value_name = "LINE")]
    pub fold: Vec<usize>,
    /// Fold every range.
    #[arg(long = "fold-all")]
    pub fold_all: bool,
    /// Print the fold ranges as `start-end` instead of the content.
    #[arg(long = "ranges")]
    pub ranges: bool,
    /// Font scale override (clamped to the zoom bounds).
    #[arg(long = "scale")]
    pub scale: Option<f64>,
    /// Configuration file path (overrides discovery of `oxview.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join(LOG_FILE_NAME);
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .try_init()
        .ok()
        // Subscriber already installed: dropping the guard shuts the writer down.
        .map(|_| guard)
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn viewer_options(args: &Args, config: &Config) -> ViewerOptions {
    let mut options = ViewerOptions::from_config(config);
    // Clamped by the zoom controller on construction.
    if let Some(scale) = args.scale {
        options.initial_scale = scale;
    }
    options
}

/// Build the viewer for `text` and produce the output `args` asks for.
fn execute(args: &Args, config: &Config, text: &str) -> Result<String> {
    let name = args
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.path.display().to_string());

    let mut viewer = Viewer::new(viewer_options(args, config));
    viewer.mount();
    viewer.load(&name, Some(text));

    if args.ranges {
        let mut out = String::new();
        for range in viewer.folds().ranges() {
            out.push_str(&range.to_string());
            out.push('\n');
        }
        return Ok(out);
    }

    if args.fold_all {
        viewer.folds_mut().fold_all();
    }
    for &line in &args.fold {
        let Some(folded) = viewer.toggle(line) else {
            bail!("line {line} does not start a fold range");
        };
        // A repeated `--fold` on the same line must not unfold it again.
        if !folded {
            viewer.toggle(line);
        }
    }
    info!(
        target: "runtime",
        file = %name,
        ranges = viewer.folds().ranges().len(),
        folded = viewer.folds().state().len(),
        "view_prepared"
    );
    Ok(render_to_string(&viewer.frame(), RenderOptions::default()))
}

fn main() -> Result<()> {
    let _log_guard = configure_logging();
    install_panic_hook();
    let args = Args::parse();
    info!(target: "runtime", path = %args.path.display(), "startup");

    let config = load_from(args.config.clone())?;
    let text = std::fs::read_to_string(&args.path)
        .with_context(|| format!("reading {}", args.path.display()))?;
    info!(target: "io", bytes = text.len(), "file_loaded");

    let out = execute(&args, &config, &text)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(out.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
