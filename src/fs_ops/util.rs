use std::io;
use std::path::Path;

/// Prefix of the hidden sibling temp files used for atomic content rewrites.
pub const TEMP_PREFIX: &str = ".find_replace.";
pub const TEMP_SUFFIX: &str = ".tmp";

/// Parent directory of `path`, falling back to "." for bare names.
pub(crate) fn parent_or_dot(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

#[cfg(unix)]
pub(crate) fn fsync_dir(dir: &Path) -> io::Result<()> {
    let f = std::fs::File::open(dir)?;
    f.sync_all()
}

#[cfg(not(unix))]
pub(crate) fn fsync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}
