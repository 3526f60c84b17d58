use std::fs;
use tempfile::tempdir;

use find_replace::{Config, ShutdownToken, run};

mod common;

#[test]
fn binary_file_renamed_but_contents_untouched() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let root = td.path();
    let mut blob = b"old\x00\x01\x02old".to_vec();
    blob.extend(std::iter::repeat_n(0u8, 64));
    fs::write(root.join("old.bin"), &blob)?;

    let report = run(&Config::with_root(root, "old", "new"), &ShutdownToken::new())?;

    assert!(!root.join("old.bin").exists());
    assert_eq!(fs::read(root.join("new.bin"))?, blob);
    assert_eq!(report.binary_skipped, 1);
    assert_eq!(report.files_rewritten, 0);
    assert_eq!(report.renamed, 1);
    Ok(())
}

#[test]
fn nul_past_sniff_window_is_treated_as_text() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let root = td.path();
    let mut data = "old ".repeat(400).into_bytes();
    data.push(0);
    data.extend_from_slice(b"old");
    assert!(data.len() > find_replace::fs_ops::SNIFF_LEN + 1);
    fs::write(root.join("mixed"), &data)?;

    run(&Config::with_root(root, "old", "new"), &ShutdownToken::new())?;

    let got = fs::read(root.join("mixed"))?;
    assert!(got.starts_with(b"new new "));
    assert!(got.ends_with(b"\x00new"));
    Ok(())
}

#[test]
fn dry_run_reports_without_touching_anything() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let root = td.path();
    common::write(root, "old/old.txt", "old");
    common::write(root, "keep.txt", "keep");
    let before = common::snapshot(root);

    let mut cfg = Config::with_root(root, "old", "new");
    cfg.dry_run = true;
    let report = run(&cfg, &ShutdownToken::new())?;

    assert_eq!(common::snapshot(root), before);
    assert_eq!(report.files_rewritten, 1);
    assert_eq!(report.renamed, 2);
    assert!(common::temp_leftovers(root).is_empty());
    Ok(())
}
