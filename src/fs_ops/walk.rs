//! Depth-first, rename-last tree walk.
//!
//! For one directory listing:
//!   1. every child directory is walked, through its current (old) path;
//!   2. every regular file gets its contents rewritten;
//!   3. only then are the children renamed, one at a time.
//! A parent's listing is taken before any of its children are touched and its own rename
//! happens after every child returned, so no path is used after it was renamed.
//!
//! With fan-out enabled, steps 1 and 2 run on rayon tasks; `try_for_each` returns only
//! once all of them finished. Renames never run concurrently: two siblings mapping to
//! the same name must see each other's result to detect the collision.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use rayon::prelude::*;
use tracing::{debug, info, trace, warn};

use crate::config::{CollisionPolicy, Config};
use crate::errors::FindReplaceError;
use crate::shutdown::ShutdownToken;

use super::atomic::try_atomic_rename;
use super::node::{FsNode, NodeKind};
use super::rewrite::{RewriteOutcome, rewrite_contents};
use super::substitute::RenamePlan;

/// Totals for one run. In dry-run mode the counts describe what would have happened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkReport {
    pub dirs_walked: usize,
    pub files_scanned: usize,
    pub files_rewritten: usize,
    pub binary_skipped: usize,
    pub renamed: usize,
    pub collisions_skipped: usize,
}

#[derive(Debug, Default)]
struct Counters {
    dirs_walked: AtomicUsize,
    files_scanned: AtomicUsize,
    files_rewritten: AtomicUsize,
    binary_skipped: AtomicUsize,
    renamed: AtomicUsize,
    collisions_skipped: AtomicUsize,
}

fn bump(c: &AtomicUsize) {
    c.fetch_add(1, Ordering::Relaxed);
}

pub struct TreeWalker<'a> {
    config: &'a Config,
    shutdown: &'a ShutdownToken,
    counters: Counters,
}

impl<'a> TreeWalker<'a> {
    pub fn new(config: &'a Config, shutdown: &'a ShutdownToken) -> Self {
        Self {
            config,
            shutdown,
            counters: Counters::default(),
        }
    }

    /// Process everything below `config.root`. The root itself is never renamed.
    pub fn walk(&self) -> Result<WalkReport> {
        self.walk_dir(&self.config.root)?;
        Ok(self.report())
    }

    pub fn report(&self) -> WalkReport {
        let c = &self.counters;
        WalkReport {
            dirs_walked: c.dirs_walked.load(Ordering::Relaxed),
            files_scanned: c.files_scanned.load(Ordering::Relaxed),
            files_rewritten: c.files_rewritten.load(Ordering::Relaxed),
            binary_skipped: c.binary_skipped.load(Ordering::Relaxed),
            renamed: c.renamed.load(Ordering::Relaxed),
            collisions_skipped: c.collisions_skipped.load(Ordering::Relaxed),
        }
    }

    fn check_shutdown(&self) -> Result<()> {
        if self.shutdown.is_requested() {
            return Err(FindReplaceError::Interrupted.into());
        }
        Ok(())
    }

    fn walk_dir(&self, dir: &Path) -> Result<()> {
        self.check_shutdown()?;
        let children = self.list_children(dir)?;
        bump(&self.counters.dirs_walked);
        trace!(dir = %dir.display(), entries = children.len(), "listed directory");

        if self.config.is_parallel() {
            children
                .par_iter()
                .try_for_each(|child| self.process_node(child))?;
        } else {
            children
                .iter()
                .try_for_each(|child| self.process_node(child))?;
        }

        // Renames within one listing run one at a time, after every sibling subtree is done.
        let mut planned = HashSet::new();
        for child in children {
            self.rename(child, &mut planned)?;
        }
        Ok(())
    }

    /// Immediate children of `dir`, minus ignored names, sorted for stable output.
    fn list_children(&self, dir: &Path) -> Result<Vec<FsNode>> {
        let read_err = |source| FindReplaceError::DirectoryRead {
            path: dir.to_path_buf(),
            source,
        };
        let mut nodes = Vec::new();
        for entry in fs::read_dir(dir).map_err(read_err)? {
            let entry = entry.map_err(read_err)?;
            if self.config.is_ignored(&entry.file_name()) {
                debug!(path = %dir.join(entry.file_name()).display(), "ignored");
                continue;
            }
            nodes.push(FsNode::from_entry(dir, &entry)?);
        }
        nodes.sort_by(|a, b| a.path().cmp(b.path()));
        Ok(nodes)
    }

    fn process_node(&self, node: &FsNode) -> Result<()> {
        match node.kind() {
            NodeKind::Directory => self.walk_dir(node.path()),
            NodeKind::File => {
                self.check_shutdown()?;
                self.rewrite(node)
            }
            NodeKind::Other => {
                debug!(path = %node.path().display(), "not a regular file or directory; contents left alone");
                Ok(())
            }
        }
    }

    fn rewrite(&self, node: &FsNode) -> Result<()> {
        bump(&self.counters.files_scanned);
        match rewrite_contents(
            node,
            &self.config.substitution,
            self.config.dry_run,
            self.shutdown,
        )? {
            RewriteOutcome::Rewritten { .. } => bump(&self.counters.files_rewritten),
            RewriteOutcome::Binary => bump(&self.counters.binary_skipped),
            RewriteOutcome::Unchanged => {}
        }
        Ok(())
    }

    /// Consumes the node: its old path must not be used after this.
    /// `planned` holds the destinations already taken in this listing; a dry run
    /// renames nothing on disk, so it is the only record of them.
    fn rename(&self, node: FsNode, planned: &mut HashSet<PathBuf>) -> Result<()> {
        let plan = match self.config.substitution.plan_rename(&node)? {
            RenamePlan::Rename(to) if self.config.dry_run && planned.contains(&to) => {
                RenamePlan::Conflict(to)
            }
            plan => plan,
        };
        match plan {
            RenamePlan::NoOp => Ok(()),
            RenamePlan::Rename(to) => {
                if self.config.dry_run {
                    info!(from = %node.path().display(), to = %to.display(), "dry-run: would rename");
                } else {
                    try_atomic_rename(node.path(), &to)?;
                    info!(from = %node.path().display(), to = %to.display(), "Renamed");
                }
                bump(&self.counters.renamed);
                planned.insert(to);
                Ok(())
            }
            RenamePlan::Conflict(to) => match self.config.on_collision {
                CollisionPolicy::Abort => Err(FindReplaceError::RenameCollision {
                    from: node.path().to_path_buf(),
                    to,
                }
                .into()),
                CollisionPolicy::Skip => {
                    warn!(
                        from = %node.path().display(),
                        to = %to.display(),
                        "Refusing to rename: destination already exists; skipped"
                    );
                    bump(&self.counters.collisions_skipped);
                    Ok(())
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn nested_tree_transformed_in_one_pass() {
        let dir = assert_fs::TempDir::new().unwrap();
        dir.child("who/what/when").write_str("where").unwrap();
        let cfg = Config::with_root(dir.path(), "wh", "f");

        let report = TreeWalker::new(&cfg, &ShutdownToken::new()).walk().unwrap();

        let leaf = dir.path().join("fo/fat/fen");
        assert_eq!(fs::read_to_string(&leaf).unwrap(), "fere");
        assert!(!dir.path().join("who").exists());
        assert_eq!(report.renamed, 3);
        assert_eq!(report.files_rewritten, 1);
        assert_eq!(report.dirs_walked, 3);
    }

    #[test]
    fn ignored_directory_is_not_entered() {
        let dir = assert_fs::TempDir::new().unwrap();
        dir.child(".git/where").write_str("where").unwrap();
        let cfg = Config::with_root(dir.path(), "wh", "f");

        let report = TreeWalker::new(&cfg, &ShutdownToken::new()).walk().unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join(".git/where")).unwrap(),
            "where"
        );
        assert_eq!(report, WalkReport { dirs_walked: 1, ..Default::default() });
    }

    #[test]
    fn shutdown_before_start_changes_nothing() {
        let dir = assert_fs::TempDir::new().unwrap();
        dir.child("who").write_str("where").unwrap();
        let cfg = Config::with_root(dir.path(), "wh", "f");
        let token = ShutdownToken::new();
        token.request();

        let err = TreeWalker::new(&cfg, &token).walk().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FindReplaceError>(),
            Some(FindReplaceError::Interrupted)
        ));
        assert_eq!(fs::read_to_string(dir.path().join("who")).unwrap(), "where");
    }

    #[test]
    fn unreadable_root_is_directory_read_error() {
        let dir = assert_fs::TempDir::new().unwrap();
        let cfg = Config::with_root(dir.path().join("missing"), "wh", "f");
        let err = TreeWalker::new(&cfg, &ShutdownToken::new()).walk().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FindReplaceError>(),
            Some(FindReplaceError::DirectoryRead { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn symlink_is_renamed_but_not_followed() {
        let dir = assert_fs::TempDir::new().unwrap();
        let target = dir.child("target.txt");
        target.write_str("where").unwrap();
        std::os::unix::fs::symlink("target.txt", dir.path().join("whlink")).unwrap();
        let mut cfg = Config::with_root(dir.path(), "wh", "f");
        cfg.ignore("target.txt");

        TreeWalker::new(&cfg, &ShutdownToken::new()).walk().unwrap();
        let link = dir.path().join("flink");
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(target.path()).unwrap(), "where");
    }

    #[test]
    fn dry_run_flags_siblings_mapping_to_one_name() {
        let dir = assert_fs::TempDir::new().unwrap();
        dir.child("fwh").write_str("1").unwrap();
        dir.child("whf").write_str("2").unwrap();
        let mut cfg = Config::with_root(dir.path(), "wh", "f");
        cfg.dry_run = true;

        let err = TreeWalker::new(&cfg, &ShutdownToken::new()).walk().unwrap_err();
        match err.downcast_ref::<FindReplaceError>() {
            Some(FindReplaceError::RenameCollision { from, to }) => {
                assert!(from.ends_with("whf"));
                assert!(to.ends_with("ff"));
            }
            other => panic!("expected RenameCollision, got {other:?}"),
        }

        cfg.on_collision = CollisionPolicy::Skip;
        let report = TreeWalker::new(&cfg, &ShutdownToken::new()).walk().unwrap();
        assert_eq!(report.renamed, 1);
        assert_eq!(report.collisions_skipped, 1);
        assert!(dir.path().join("fwh").exists() && dir.path().join("whf").exists());
    }
}
