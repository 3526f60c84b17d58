//! Config validation logic.
//! Runs before the walk touches anything: rejects an empty search string, checks the
//! root directory and the ignored names, and warns about non-idempotent substitutions.

use anyhow::Result;
use std::fs;
use std::path::{Component, Path};
use tracing::{debug, warn};

use super::types::Config;
use crate::errors::FindReplaceError;

impl Config {
    pub fn validate(&self) -> Result<()> {
        let sub = &self.substitution;
        if sub.find().is_empty() {
            return Err(FindReplaceError::Usage("FIND must not be empty".into()).into());
        }
        if sub.replace().contains(sub.find()) {
            warn!(
                find = sub.find(),
                replace = sub.replace(),
                "REPLACE contains FIND; running again would substitute again"
            );
        }

        for name in &self.ignored_names {
            if !is_single_component(Path::new(name)) {
                return Err(FindReplaceError::Usage(format!(
                    "ignored name must be a plain file name: {}",
                    Path::new(name).display()
                ))
                .into());
            }
        }

        ensure_dir(&self.root)?;
        debug!(
            root = %self.root.display(),
            dry_run = self.dry_run,
            jobs = ?self.jobs,
            on_collision = %self.on_collision,
            "config validated"
        );
        Ok(())
    }
}

fn is_single_component(p: &Path) -> bool {
    let mut comps = p.components();
    matches!((comps.next(), comps.next()), (Some(Component::Normal(_)), None))
}

/// Root must exist and be a directory (symlinks to directories are accepted for the root).
fn ensure_dir(path: &Path) -> Result<()> {
    let meta = fs::metadata(path).map_err(|source| FindReplaceError::DirectoryRead {
        path: path.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(FindReplaceError::DirectoryRead {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a directory"),
        }
        .into());
    }
    Ok(())
}
