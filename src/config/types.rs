//! Core configuration types.
//! - Config holds the substitution pair plus runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.
//! - CollisionPolicy selects what happens when a rename destination already exists.

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::{IGNORED_DIR_DEFAULT, ROOT_DEFAULT};
use crate::fs_ops::Substitution;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// One line per rewrite/rename (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// What to do when the computed rename destination already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// Stop the whole run with a fatal error (source left under its old name).
    #[default]
    Abort,
    /// Leave the source under its old name, warn, and keep going.
    Skip,
}

impl CollisionPolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" | "fail" => Some(CollisionPolicy::Abort),
            "skip" | "continue" => Some(CollisionPolicy::Skip),
            _ => None,
        }
    }
}

impl fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CollisionPolicy::Abort => "abort",
            CollisionPolicy::Skip => "skip",
        })
    }
}

impl FromStr for CollisionPolicy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid collision policy: '{s}'"))
    }
}

/// Runtime configuration for one find & replace run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory whose descendants are processed (never renamed itself)
    pub root: PathBuf,
    /// The (find, replace) pair
    pub substitution: Substitution,
    /// Exact base names skipped entirely
    pub ignored_names: Vec<OsString>,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// Emit JSON log lines
    pub json: bool,
    /// If true, report actions but do not modify the filesystem
    pub dry_run: bool,
    /// Worker threads for subtree fan-out; None or 1 = sequential, 0 = all cores
    pub jobs: Option<usize>,
    pub on_collision: CollisionPolicy,
}

impl Config {
    /// Construct a Config for `find` -> `replace`; other fields use defaults.
    pub fn new(find: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            root: PathBuf::from(ROOT_DEFAULT),
            substitution: Substitution::new(find, replace),
            ignored_names: vec![OsString::from(IGNORED_DIR_DEFAULT)],
            log_level: LogLevel::Normal,
            log_file: None,
            json: false,
            dry_run: false,
            jobs: None,
            on_collision: CollisionPolicy::Abort,
        }
    }

    /// Same as `new`, rooted at `root` instead of the working directory.
    pub fn with_root(root: impl Into<PathBuf>, find: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            ..Self::new(find, replace)
        }
    }

    /// True when fan-out over sibling subtrees is requested.
    pub fn is_parallel(&self) -> bool {
        !matches!(self.jobs, None | Some(1))
    }

    pub fn is_ignored(&self, name: &std::ffi::OsStr) -> bool {
        self.ignored_names.iter().any(|n| n == name)
    }

    /// Add an ignored name unless it is already present.
    pub fn ignore(&mut self, name: impl Into<OsString>) {
        let name = name.into();
        if !self.ignored_names.contains(&name) {
            self.ignored_names.push(name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn defaults_ignore_git_only() {
        let cfg = Config::new("a", "b");
        assert!(cfg.is_ignored(OsStr::new(".git")));
        assert!(!cfg.is_ignored(OsStr::new(".github")));
        assert!(!cfg.is_ignored(OsStr::new("git")));
        assert_eq!(cfg.root, PathBuf::from("."));
        assert_eq!(cfg.on_collision, CollisionPolicy::Abort);
        assert!(!cfg.is_parallel());
    }

    #[test]
    fn jobs_select_parallelism() {
        let mut cfg = Config::new("a", "b");
        cfg.jobs = Some(1);
        assert!(!cfg.is_parallel());
        cfg.jobs = Some(0);
        assert!(cfg.is_parallel());
        cfg.jobs = Some(4);
        assert!(cfg.is_parallel());
    }

    #[test]
    fn ignore_deduplicates() {
        let mut cfg = Config::new("a", "b");
        cfg.ignore(".git");
        cfg.ignore(".hg");
        assert_eq!(cfg.ignored_names.len(), 2);
    }

    #[test]
    fn policy_and_level_parse() {
        assert_eq!("skip".parse::<CollisionPolicy>().unwrap(), CollisionPolicy::Skip);
        assert_eq!(CollisionPolicy::parse(" Abort "), Some(CollisionPolicy::Abort));
        assert!("maybe".parse::<CollisionPolicy>().is_err());
        assert_eq!(LogLevel::parse("TRACE"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::Quiet.to_string(), "quiet");
    }
}
