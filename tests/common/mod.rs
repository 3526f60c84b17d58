#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Relative path -> file bytes (None for directories), for whole-tree comparisons.
pub fn snapshot(root: &Path) -> BTreeMap<PathBuf, Option<Vec<u8>>> {
    WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .map(|e| e.expect("walk scratch tree"))
        .map(|e| {
            let rel = e.path().strip_prefix(root).unwrap().to_path_buf();
            let content = if e.file_type().is_file() {
                Some(fs::read(e.path()).unwrap())
            } else {
                None
            };
            (rel, content)
        })
        .collect()
}

/// Create `rel` under `root` (parents included) with `content`.
pub fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
    let p = root.join(rel);
    fs::create_dir_all(p.parent().unwrap()).unwrap();
    fs::write(&p, content).unwrap();
    p
}

/// Names of leftover temp files anywhere under `root`.
pub fn temp_leftovers(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| {
            e.file_name()
                .to_string_lossy()
                .starts_with(find_replace::fs_ops::TEMP_PREFIX)
        })
        .map(|e| e.into_path())
        .collect()
}
