//! Literal substitution and rename planning.
//!
//! `Substitution` is the immutable (find, replace) pair shared read-only by the whole
//! walk. Matching is case-sensitive, byte-exact, left-to-right and non-overlapping;
//! the replacement is never rescanned.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::Result;
use tracing::warn;

use super::helpers::io_error_with_help;
use super::node::FsNode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    find: String,
    replace: String,
}

/// Outcome of `plan_rename`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenamePlan {
    NoOp,
    Rename(PathBuf),
    Conflict(PathBuf),
}

impl Substitution {
    pub fn new(find: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            find: find.into(),
            replace: replace.into(),
        }
    }

    pub fn find(&self) -> &str {
        &self.find
    }

    pub fn replace(&self) -> &str {
        &self.replace
    }

    /// True when `haystack` contains the search string. Empty find never matches.
    pub fn matches(&self, haystack: &[u8]) -> bool {
        !self.find.is_empty() && find_bytes(haystack, self.find.as_bytes(), 0).is_some()
    }

    /// Replace every occurrence in `haystack`; `None` when nothing matched.
    pub fn apply_bytes(&self, haystack: &[u8]) -> Option<Vec<u8>> {
        replace_bytes(haystack, self.find.as_bytes(), self.replace.as_bytes())
    }

    /// New base name for `old`. Returns `old` unchanged when there is no match.
    pub fn compute_new_name(&self, old: &OsStr) -> OsString {
        self.new_name(old).unwrap_or_else(|| old.to_os_string())
    }

    /// Like `compute_new_name`, but `None` when the name would not change.
    pub fn new_name(&self, old: &OsStr) -> Option<OsString> {
        #[cfg(unix)]
        {
            use std::os::unix::ffi::{OsStrExt, OsStringExt};
            self.apply_bytes(old.as_bytes()).map(OsString::from_vec)
        }
        #[cfg(not(unix))]
        {
            match old.to_str() {
                Some(s) if self.matches(s.as_bytes()) => Some(s.replace(&self.find, &self.replace).into()),
                Some(_) => None,
                None => {
                    warn!(name = ?old, "non UTF-8 name left unchanged");
                    None
                }
            }
        }
    }

    /// Decide whether and where `node` should be renamed.
    ///
    /// The existence check and the later rename are not atomic together; the run
    /// assumes it owns the tree.
    pub fn plan_rename(&self, node: &FsNode) -> Result<RenamePlan> {
        let Some(new_name) = self.new_name(node.base_name()) else {
            return Ok(RenamePlan::NoOp);
        };
        if new_name.is_empty() {
            warn!(path = %node.path().display(), "substitution would produce an empty name; leaving as is");
            return Ok(RenamePlan::NoOp);
        }
        let new_path = node.sibling(&new_name);

        match fs::symlink_metadata(&new_path) {
            Ok(dest_meta) => {
                let src_meta = node.metadata()?;
                if differs_only_in_case(node.base_name(), &new_name)
                    && super::meta::same_file(&src_meta, &dest_meta)
                    && !lists_name(node.parent(), &new_name)?
                {
                    // case-insensitive filesystem: the "destination" is the node itself
                    Ok(RenamePlan::Rename(new_path))
                } else {
                    Ok(RenamePlan::Conflict(new_path))
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(RenamePlan::Rename(new_path)),
            Err(e) => Err(io_error_with_help("stat rename destination", &new_path)(e)),
        }
    }
}

fn differs_only_in_case(a: &OsStr, b: &OsStr) -> bool {
    a.to_string_lossy().to_lowercase() == b.to_string_lossy().to_lowercase()
}

/// True if `dir` has an entry spelled exactly `name`. Two hard links differing only in
/// case both show up here; a case-folded lookup of one name does not.
fn lists_name(dir: &std::path::Path, name: &OsStr) -> Result<bool> {
    for entry in fs::read_dir(dir).map_err(io_error_with_help("list", dir))? {
        let entry = entry.map_err(io_error_with_help("list", dir))?;
        if entry.file_name() == name {
            return Ok(true);
        }
    }
    Ok(false)
}

fn find_bytes(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() || from > haystack.len() - needle.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|i| i + from)
}

/// Single-pass, non-overlapping, left-to-right replacement.
fn replace_bytes(haystack: &[u8], find: &[u8], replace: &[u8]) -> Option<Vec<u8>> {
    let mut at = find_bytes(haystack, find, 0)?;
    let mut out = Vec::with_capacity(haystack.len());
    let mut last = 0;
    loop {
        out.extend_from_slice(&haystack[last..at]);
        out.extend_from_slice(replace);
        last = at + find.len();
        match find_bytes(haystack, find, last) {
            Some(next) => at = next,
            None => break,
        }
    }
    out.extend_from_slice(&haystack[last..]);
    Some(out)
}
