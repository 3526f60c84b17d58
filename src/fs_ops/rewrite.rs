//! Content rewriting.
//! - Sniffs the first bytes; binary files are left alone without being read in full.
//! - Text files containing the search string are rewritten through a temp sibling:
//!   create in the same directory, copy permission bits, write, fsync, rename over
//!   the original, fsync the directory.
//! - The temp file is removed on every failure path (NamedTempFile drop).

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use anyhow::Result;
use tempfile::Builder;
use tracing::{debug, info, trace};

use crate::errors::FindReplaceError;
use crate::shutdown::ShutdownToken;

use super::meta::apply_permissions;
use super::node::FsNode;
use super::substitute::Substitution;
use super::text::{SNIFF_LEN, looks_like_text};
use super::util::{TEMP_PREFIX, TEMP_SUFFIX, fsync_dir, parent_or_dot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// Content changed (or would change, in dry-run); size of the new content.
    Rewritten { bytes: usize },
    /// Text file without a match.
    Unchanged,
    /// Failed the text predicate; never modified.
    Binary,
}

/// Rewrite the contents of the regular file at `node` in place.
pub fn rewrite_contents(
    node: &FsNode,
    sub: &Substitution,
    dry_run: bool,
    shutdown: &ShutdownToken,
) -> Result<RewriteOutcome> {
    let path = node.path();
    let mut file = File::open(path).map_err(|source| FindReplaceError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let read_err = |source| FindReplaceError::FileRead {
        path: path.to_path_buf(),
        source,
    };

    let mut content = Vec::with_capacity(SNIFF_LEN);
    (&mut file)
        .take(SNIFF_LEN as u64)
        .read_to_end(&mut content)
        .map_err(read_err)?;
    if !looks_like_text(&content) {
        trace!(path = %path.display(), "binary content; skipping");
        return Ok(RewriteOutcome::Binary);
    }
    file.read_to_end(&mut content).map_err(read_err)?;

    let Some(new_content) = sub.apply_bytes(&content) else {
        return Ok(RewriteOutcome::Unchanged);
    };
    let meta = file.metadata().map_err(read_err)?;
    drop(file);

    if dry_run {
        info!(path = %path.display(), bytes = new_content.len(), "dry-run: would rewrite");
        return Ok(RewriteOutcome::Rewritten {
            bytes: new_content.len(),
        });
    }

    write_atomic(path, &new_content, &meta, shutdown)?;
    info!(path = %path.display(), bytes = new_content.len(), "Rewrote");
    Ok(RewriteOutcome::Rewritten {
        bytes: new_content.len(),
    })
}

/// Replace the file at `path` with `contents`, carrying over the permission bits of `perms_from`.
pub fn write_atomic(
    path: &Path,
    contents: &[u8],
    perms_from: &fs::Metadata,
    shutdown: &ShutdownToken,
) -> Result<()> {
    let dir = parent_or_dot(path);
    let mut tmp = Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(TEMP_SUFFIX)
        .tempfile_in(dir)
        .map_err(|source| FindReplaceError::TempFile {
            path: dir.to_path_buf(),
            source,
        })?;
    debug!(tmp = %tmp.path().display(), target = %path.display(), "created temp file");

    let tmp_path = tmp.path().to_path_buf();
    let write_err = |source| FindReplaceError::FileWrite {
        path: tmp_path.clone(),
        source,
    };
    apply_permissions(tmp.as_file(), perms_from).map_err(write_err)?;
    tmp.write_all(contents).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;

    if shutdown.is_requested() {
        return Err(FindReplaceError::Interrupted.into());
    }

    tmp.persist(path).map_err(|e| FindReplaceError::TempFile {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    if let Err(e) = fsync_dir(dir) {
        trace!(dir = %dir.display(), error = %e, "fsync of parent directory failed");
    }
    Ok(())
}
