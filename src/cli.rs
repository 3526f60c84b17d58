//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - FIND and REPLACE are the only required inputs; any other positional count is a
//!   clap usage error (stderr, exit 2).
//! - Values starting with '-' are accepted for FIND/REPLACE.
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, ValueHint};
use std::ffi::OsString;
use std::path::PathBuf;

use find_replace::{CollisionPolicy, Config, LogLevel};

/// Recursively replace FIND with REPLACE in file contents and in file/directory names,
/// starting from the current directory.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "find-replace",
    author,
    version,
    about = "Recursive in-place find & replace over file contents and names"
)]
pub struct Args {
    /// Literal string to search for (not a pattern).
    #[arg(value_name = "FIND", allow_hyphen_values = true)]
    pub find: String,

    /// Literal replacement string.
    #[arg(value_name = "REPLACE", allow_hyphen_values = true)]
    pub replace: String,

    /// Optional XML config file (log level, log file, jobs, collision policy, ignored names).
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Also write logs to this file.
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Dry-run: log actions but do not modify the filesystem.
    #[arg(
        long,
        help = "Show what would be rewritten/renamed, but do not modify anything"
    )]
    pub dry_run: bool,

    /// Process sibling subtrees on N worker threads (0 = one per core, 1 = sequential).
    #[arg(short = 'j', long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Skip a rename whose destination exists instead of aborting the run.
    #[arg(long)]
    pub skip_collisions: bool,

    /// Additional entry name to skip entirely, like `.git` (repeatable).
    #[arg(long, value_name = "NAME")]
    pub ignore: Vec<OsString>,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(f) = &self.log_file {
            cfg.log_file = Some(f.clone());
        }
        if self.json {
            cfg.json = true;
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
        if self.jobs.is_some() {
            cfg.jobs = self.jobs;
        }
        if self.skip_collisions {
            cfg.on_collision = CollisionPolicy::Skip;
        }
        for name in &self.ignore {
            cfg.ignore(name.clone());
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
