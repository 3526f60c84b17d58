//! Tracing initialization.
//! Builds a subscriber with EnvFilter, supports compact or JSON formats, and optional file logging.
//!
//! The program LogLevel alone picks the filter (RUST_LOG is not consulted). The file
//! layer goes through tracing_appender's non-blocking writer and uses the same format
//! as stdout, minus colours, plus thread ids. A log file inside the tree being
//! rewritten is refused since the walk would edit it mid-run.

use anyhow::Result;
use chrono::Local;
use find_replace::LogLevel;
use find_replace::fs_ops::io_error_with_help;
use find_replace::output as out;
use std::fmt as stdfmt;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt as tsfmt;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::registry;
use tracing_subscriber::Registry;
use tracing_subscriber::util::SubscriberInitExt;

/// Human-friendly timestamp formatter (DD/MM/YY HH:MM:SS)
struct LocalHumanTime;
impl FormatTime for LocalHumanTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> stdfmt::Result {
        let now = Local::now();
        write!(w, "{}", now.format("%d/%m/%y %H:%M:%S"))
    }
}

#[inline]
fn to_level_filter(lvl: &LogLevel) -> LevelFilter {
    match lvl {
        LogLevel::Quiet => LevelFilter::ERROR,
        LogLevel::Normal => LevelFilter::INFO,
        LogLevel::Info => LevelFilter::DEBUG,
        LogLevel::Debug => LevelFilter::TRACE,
    }
}

#[inline]
fn env_filter_from_level(level_filter: LevelFilter) -> EnvFilter {
    let level_str = match level_filter {
        LevelFilter::ERROR => "error",
        LevelFilter::WARN => "warn",
        LevelFilter::INFO => "info",
        LevelFilter::DEBUG => "debug",
        LevelFilter::TRACE => "trace",
        _ => "info",
    };
    EnvFilter::new(level_str)
}

fn open_log_file_append(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(io_error_with_help("create log directory", parent))?;
        }
    }
    let f = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_error_with_help("open log file", path))?;
    Ok(f)
}

/// Canonical form of `path`, or of its nearest ancestor that exists.
fn canonical_ancestor(path: &Path) -> Option<PathBuf> {
    path.ancestors()
        .map(|a| if a.as_os_str().is_empty() { Path::new(".") } else { a })
        .find_map(|a| fs::canonicalize(a).ok())
}

/// True if `log_file` would be visited by a walk rooted at `root`. Nothing is created.
fn inside_root(log_file: &Path, root: &Path) -> bool {
    let Ok(root) = fs::canonicalize(root) else {
        return false;
    };
    let parent = log_file.parent().unwrap_or_else(|| Path::new("."));
    canonical_ancestor(parent).is_some_and(|p| p.starts_with(&root))
}

/// Open a non-blocking file writer for logging; prints a short reason and returns None on failure.
fn maybe_open_non_blocking_writer(path: &Path, root: &Path) -> Option<(NonBlocking, WorkerGuard)> {
    if inside_root(path, root) {
        out::print_warn(&format!(
            "Refusing to log to '{}': it is inside the directory being rewritten. Logs will continue to stdout.",
            path.display()
        ));
        return None;
    }

    match open_log_file_append(path) {
        Ok(file) => Some(tracing_appender::non_blocking(file)),
        Err(e) => {
            out::print_warn(&format!("{e}; logs will continue to stdout."));
            None
        }
    }
}

/// Initialize tracing for one run. Returns the file writer's guard when a log file is
/// in use; it must be held until exit so buffered lines get flushed.
pub fn init_tracing(
    lvl: &LogLevel,
    log_file: Option<&Path>,
    root: &Path,
    json: bool,
) -> Result<Option<WorkerGuard>> {
    let mut layers = vec![stdout_layer(json)];
    let mut guard = None;
    if let Some((writer, g)) = log_file.and_then(|p| maybe_open_non_blocking_writer(p, root)) {
        layers.push(file_layer(writer, json));
        guard = Some(g);
    }

    registry()
        .with(layers)
        .with(env_filter_from_level(to_level_filter(lvl)))
        .try_init()?;
    Ok(guard)
}
