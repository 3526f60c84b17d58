//! Typed error definitions for find_replace.
//! Provides a small set of well-known failure modes for better logs, exit codes and tests.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::fs_ops::describe_io_error;

#[derive(Debug, Error)]
pub enum FindReplaceError {
    #[error("usage: find-replace FIND REPLACE: {0}")]
    Usage(String),

    #[error("Unable to read directory {}", describe_io_error(.path, .source))]
    DirectoryRead { path: PathBuf, source: io::Error },

    #[error("Unable to open {}", describe_io_error(.path, .source))]
    FileOpen { path: PathBuf, source: io::Error },

    #[error("Failed to read {}", describe_io_error(.path, .source))]
    FileRead { path: PathBuf, source: io::Error },

    #[error("Error writing temp file {}", describe_io_error(.path, .source))]
    FileWrite { path: PathBuf, source: io::Error },

    #[error("Temp file failure at {}", describe_io_error(.path, .source))]
    TempFile { path: PathBuf, source: io::Error },

    #[error("Unable to rename {} to {}: {source}", .from.display(), .to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },

    #[error("Refusing to rename {} to {}: destination already exists", .from.display(), .to.display())]
    RenameCollision { from: PathBuf, to: PathBuf },

    #[error("Operation interrupted by user")]
    Interrupted,
}

impl FindReplaceError {
    /// Stable numeric code; the binary uses it as the process exit status.
    pub fn code(&self) -> u8 {
        match self {
            FindReplaceError::Usage(_) => 2,
            FindReplaceError::DirectoryRead { .. } => 3,
            FindReplaceError::FileOpen { .. } => 4,
            FindReplaceError::FileRead { .. } => 5,
            FindReplaceError::FileWrite { .. } => 6,
            FindReplaceError::TempFile { .. } => 7,
            FindReplaceError::Rename { .. } => 8,
            FindReplaceError::RenameCollision { .. } => 9,
            FindReplaceError::Interrupted => 130,
        }
    }

    /// Short slug used as the `kind` field in structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            FindReplaceError::Usage(_) => "usage",
            FindReplaceError::DirectoryRead { .. } => "directory_read",
            FindReplaceError::FileOpen { .. } => "file_open",
            FindReplaceError::FileRead { .. } => "file_read",
            FindReplaceError::FileWrite { .. } => "file_write",
            FindReplaceError::TempFile { .. } => "temp_file",
            FindReplaceError::Rename { .. } => "rename",
            FindReplaceError::RenameCollision { .. } => "rename_collision",
            FindReplaceError::Interrupted => "interrupted",
        }
    }
}
