//! Atomic rename helper.
//! - Performs a same-directory rename with a typed, path-carrying error.
//! - On Unix, best-effort fsync of the parent directory after rename.
//!
//! The caller is responsible for the "destination must not exist" check; rename(2)
//! itself would silently replace a file, so it is never called without a plan.

use anyhow::Result;
use std::fs;
use std::path::Path;
use tracing::trace;

use crate::errors::FindReplaceError;

use super::util::{fsync_dir, parent_or_dot};

pub fn try_atomic_rename(src: &Path, dst: &Path) -> Result<()> {
    fs::rename(src, dst).map_err(|source| FindReplaceError::Rename {
        from: src.to_path_buf(),
        to: dst.to_path_buf(),
        source,
    })?;

    // Ignore fsync errors to avoid turning a successful rename into a failure.
    let parent = parent_or_dot(dst);
    if let Err(e) = fsync_dir(parent) {
        trace!(dir = %parent.display(), error = %e, "fsync of parent directory failed");
    }
    Ok(())
}
