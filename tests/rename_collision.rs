use std::fs;
use tempfile::tempdir;

use find_replace::{CollisionPolicy, Config, FindReplaceError, ShutdownToken, run};

mod common;

#[test]
fn collision_aborts_and_keeps_source_intact() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let root = td.path();
    common::write(root, "who.txt", "who is there");
    common::write(root, "fo.txt", "existing destination");

    let err = run(&Config::with_root(root, "wh", "f"), &ShutdownToken::new()).unwrap_err();
    match err.downcast_ref::<FindReplaceError>() {
        Some(FindReplaceError::RenameCollision { from, to }) => {
            assert!(from.ends_with("who.txt"));
            assert!(to.ends_with("fo.txt"));
        }
        other => panic!("expected RenameCollision, got {other:?}"),
    }

    // content was rewritten before the rename decision; the destination is untouched
    assert_eq!(fs::read_to_string(root.join("who.txt"))?, "fo is there");
    assert_eq!(fs::read_to_string(root.join("fo.txt"))?, "existing destination");
    Ok(())
}

#[test]
fn directory_collision_leaves_both_subtrees_readable() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let root = td.path();
    common::write(root, "old/a.txt", "a");
    common::write(root, "new/b.txt", "b");

    let err = run(&Config::with_root(root, "old", "new"), &ShutdownToken::new()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<FindReplaceError>(),
        Some(FindReplaceError::RenameCollision { .. })
    ));
    assert_eq!(fs::read_to_string(root.join("old/a.txt"))?, "a");
    assert_eq!(fs::read_to_string(root.join("new/b.txt"))?, "b");
    Ok(())
}

#[test]
fn skip_policy_continues_past_collision() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let root = td.path();
    common::write(root, "a/who.txt", "1");
    common::write(root, "a/fo.txt", "2");
    common::write(root, "b/what.txt", "3");

    let mut cfg = Config::with_root(root, "wh", "f");
    cfg.on_collision = CollisionPolicy::Skip;
    let report = run(&cfg, &ShutdownToken::new())?;

    assert_eq!(report.collisions_skipped, 1);
    assert_eq!(fs::read_to_string(root.join("a/who.txt"))?, "1");
    assert_eq!(fs::read_to_string(root.join("a/fo.txt"))?, "2");
    assert_eq!(fs::read_to_string(root.join("b/fat.txt"))?, "3");
    Ok(())
}
