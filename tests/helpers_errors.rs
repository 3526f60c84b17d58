use std::io;
use std::path::Path;

use find_replace::FindReplaceError;
use find_replace::fs_ops::{describe_io_error, io_error_with_help};

#[test]
fn notfound_fallback_hint_includes_path() {
    let p = Path::new("/nonexistent/path/for/test");
    let err = io_error_with_help("open", p)(io::Error::from(io::ErrorKind::NotFound));
    let msg = format!("{}", err);
    assert!(msg.contains("open"));
    assert!(msg.contains(p.to_string_lossy().as_ref()));
    assert!(msg.contains("path not found"));
}

#[cfg(unix)]
#[test]
fn enospc_hint_present() {
    let msg = describe_io_error(Path::new("/tmp"), &io::Error::from_raw_os_error(libc::ENOSPC));
    assert!(msg.contains("insufficient space"), "msg was: {}", msg);
    assert!(msg.contains("os code"), "should include os code in message");
}

#[cfg(unix)]
#[test]
fn erofs_and_name_too_long_hints() {
    let p = Path::new("/tmp");
    let m1 = describe_io_error(p, &io::Error::from_raw_os_error(libc::EROFS));
    let m2 = describe_io_error(p, &io::Error::from_raw_os_error(libc::ENAMETOOLONG));
    assert!(m1.contains("read-only filesystem"), "msg was: {}", m1);
    assert!(m2.contains("too long"), "msg was: {}", m2);
}

#[cfg(unix)]
#[test]
fn typed_errors_carry_path_and_hint() {
    let e = FindReplaceError::FileOpen {
        path: "/srv/data/a.txt".into(),
        source: io::Error::from_raw_os_error(libc::EACCES),
    };
    let msg = e.to_string();
    assert!(msg.contains("/srv/data/a.txt"), "msg was: {}", msg);
    assert!(msg.contains("permission denied"), "msg was: {}", msg);
    assert_eq!(e.code(), 4);
}

#[test]
fn collision_message_names_both_paths() {
    let e = FindReplaceError::RenameCollision {
        from: "tree/who".into(),
        to: "tree/fo".into(),
    };
    let msg = e.to_string();
    assert!(msg.contains("tree/who") && msg.contains("tree/fo"), "msg was: {}", msg);
    assert!(msg.contains("already exists"));
}
