//! One directory entry under processing.
//!
//! A node is built from a directory listing and dropped once the walker has handled it.
//! Its path is only valid until the node (or an ancestor) is renamed; the walker never
//! keeps a node around past its own rename.

use std::ffi::OsStr;
use std::fs::{self, DirEntry};
use std::path::{Path, PathBuf};

use anyhow::Result;

use super::helpers::io_error_with_help;

/// Kind of a directory entry, as reported by the listing (symlinks are not followed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Directory,
    File,
    /// Symlinks, sockets, FIFOs, devices.
    Other,
}

impl NodeKind {
    pub fn from_file_type(ft: fs::FileType) -> Self {
        if ft.is_dir() {
            NodeKind::Directory
        } else if ft.is_file() {
            NodeKind::File
        } else {
            NodeKind::Other
        }
    }
}

#[derive(Debug, Clone)]
pub struct FsNode {
    path: PathBuf,
    kind: NodeKind,
}

impl FsNode {
    pub fn new(path: impl Into<PathBuf>, kind: NodeKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// Build a node from a listing entry of `dir`.
    pub fn from_entry(dir: &Path, entry: &DirEntry) -> Result<Self> {
        let path = dir.join(entry.file_name());
        let ft = entry
            .file_type()
            .map_err(io_error_with_help("stat", &path))?;
        Ok(Self::new(path, NodeKind::from_file_type(ft)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn base_name(&self) -> &OsStr {
        self.path.file_name().unwrap_or_else(|| self.path.as_os_str())
    }

    pub fn parent(&self) -> &Path {
        super::util::parent_or_dot(&self.path)
    }

    /// Sibling path with a different base name.
    pub fn sibling(&self, name: &OsStr) -> PathBuf {
        self.parent().join(name)
    }

    /// Fresh metadata (permission bits etc.) for the node's current path.
    pub fn metadata(&self) -> Result<fs::Metadata> {
        fs::symlink_metadata(&self.path).map_err(io_error_with_help("stat", &self.path))
    }
}
