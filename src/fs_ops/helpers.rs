//! I/O helper utilities.
//!
//! Enriches io::Error with the offending path and an actionable hint, both for the
//! typed errors in `errors.rs` and for plain anyhow::Result code paths.
//!
//! Usage:
//!   // in functions returning anyhow::Result<_>
//!   fs::metadata(p).map_err(io_error_with_help("stat", p))?;

use anyhow::anyhow;
use std::io;
use std::path::Path;

/// Platform-aware hint for a raw OS error code, if we know one.
fn os_hint(code: i32) -> Option<&'static str> {
    #[cfg(unix)]
    {
        match code {
            libc::EACCES | libc::EPERM => {
                Some("permission denied; check ownership and write permissions.")
            }
            libc::EXDEV => Some("cross-filesystem; atomic rename not possible."),
            libc::EBUSY => Some("resource busy; ensure no other process is writing."),
            libc::ENOENT => Some("path not found; was it removed during the run?"),
            libc::EEXIST => Some("already exists."),
            libc::ENOTEMPTY => Some("destination directory exists and is not empty."),
            libc::ENOSPC => Some("insufficient space on device."),
            libc::EROFS => Some("read-only filesystem; cannot write here."),
            libc::ENOTDIR => Some("a path component is not a directory."),
            libc::ENAMETOOLONG => Some("filename or path too long; the replacement may be too long."),
            libc::EMFILE => Some("process file descriptor limit reached; close files or raise limits."),
            _ => None,
        }
    }
    #[cfg(windows)]
    {
        match code {
            5 => Some("access denied; check permissions."),
            17 => Some("not same device; cross-filesystem rename."),
            32 => Some("sharing violation; file is in use."),
            2 | 3 => Some("path not found; was it removed during the run?"),
            80 | 183 => Some("already exists."),
            112 => Some("insufficient disk space."),
            206 => Some("filename or path too long (MAX_PATH exceeded)."),
            _ => None,
        }
    }
    #[cfg(not(any(unix, windows)))]
    {
        let _ = code;
        None
    }
}

fn kind_hint(kind: io::ErrorKind) -> Option<&'static str> {
    match kind {
        io::ErrorKind::PermissionDenied => {
            Some("permission denied; check ownership and write permissions.")
        }
        io::ErrorKind::NotFound => Some("path not found; was it removed during the run?"),
        io::ErrorKind::AlreadyExists => Some("already exists."),
        _ => None,
    }
}

/// Format `'<path>': <error> - <hint> [os code: N]`.
pub fn describe_io_error(path: &Path, e: &io::Error) -> String {
    let mut msg = format!("'{}': {}", path.display(), e);
    match e.raw_os_error() {
        Some(code) => {
            if let Some(hint) = os_hint(code) {
                msg.push_str(" - ");
                msg.push_str(hint);
            }
            msg.push_str(&format!(" [os code: {code}]"));
        }
        None => {
            if let Some(hint) = kind_hint(e.kind()) {
                msg.push_str(" - ");
                msg.push_str(hint);
            }
        }
    }
    msg
}

/// Adapter for anyhow::Result code.
/// Returns a closure suitable for `.map_err(...)` that converts io::Error -> anyhow::Error.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!("{} {}", op, describe_io_error(path, &e))
}
