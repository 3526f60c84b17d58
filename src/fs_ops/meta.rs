//! Metadata helpers: permission preservation for rewritten files and same-file detection.

use std::fs::{self, File};
use std::io;
use tracing::trace;

/// Apply the permission bits of `src_meta` to an open file handle.
/// Unix: full mode bits (incl. setuid/sticky) masked to 0o7777. Windows: readonly attribute.
pub fn apply_permissions(file: &File, src_meta: &fs::Metadata) -> io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = src_meta.permissions().mode() & 0o7777;
        file.set_permissions(fs::Permissions::from_mode(mode))?;
        trace!(mode = format!("{:o}", mode), "applied permissions to temp file");
    }
    #[cfg(not(unix))]
    {
        let mut perms = file.metadata()?.permissions();
        perms.set_readonly(src_meta.permissions().readonly());
        file.set_permissions(perms)?;
        trace!(readonly = src_meta.permissions().readonly(), "applied readonly attribute to temp file");
    }
    Ok(())
}

/// True when both metadata refer to the same inode (Unix). Elsewhere always false.
pub fn same_file(a: &fs::Metadata, b: &fs::Metadata) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        a.dev() == b.dev() && a.ino() == b.ino()
    }
    #[cfg(not(unix))]
    {
        let _ = (a, b);
        false
    }
}
