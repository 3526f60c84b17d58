//! Core library for `find_replace`.
//!
//! Recursively replaces a literal string in file contents and in file and directory
//! names below a root directory, in place. Directories are descended before they are
//! renamed, file contents are replaced atomically through a temp sibling, and a rename
//! never overwrites an existing entry.

pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod shutdown;

pub use config::{CollisionPolicy, Config, LogLevel};
pub use errors::FindReplaceError;
pub use fs_ops::{Substitution, WalkReport, run};
pub use shutdown::ShutdownToken;
