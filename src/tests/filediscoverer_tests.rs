// src/tests/filediscoverer_tests.rs

//! tests for `filediscoverer.rs`

use crate::common::FPath;
use crate::debug::helpers::{create_files_and_tmpdir, set_mtime, tmpdir_fpath};
use crate::readers::filediscoverer::discover;
use crate::readers::helpers::basename;
use crate::tests::common::new_group;

use std::time::{Duration, UNIX_EPOCH};

fn basenames(paths: &[FPath]) -> Vec<FPath> {
    paths.iter().map(basename).collect()
}

#[test]
fn test_discover_full_match_recursive() {
    let (tmpdir, _paths) = create_files_and_tmpdir(&[
        ("svc.log", ""),
        ("svc.log.1", ""),
        ("old/svc.log.2", ""),
        ("svc.log.bak", ""),
        ("other-svc.log", ""),
        ("deep/er/svc.log.3", ""),
    ]);
    let group = new_group("svc", &tmpdir_fpath(&tmpdir), r"svc\.log(\.\d+)?");
    let found: Vec<FPath> = discover(&group)
        .into_iter()
        .map(|df| df.path)
        .collect();
    let mut names = basenames(&found);
    names.sort();
    // "svc.log.bak" and "other-svc.log" only match as substrings
    assert_eq!(names, vec!["svc.log", "svc.log.1", "svc.log.2", "svc.log.3"]);
    let mut sorted = found.clone();
    sorted.sort();
    assert_eq!(found, sorted, "not ordered by path");
}

#[test]
fn test_discover_modified_time() {
    let (tmpdir, paths) = create_files_and_tmpdir(&[("a.log", "x")]);
    set_mtime(&paths[0], 1_000_000);
    let group = new_group("a", &tmpdir_fpath(&tmpdir), r"a\.log");
    let found = discover(&group);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].modified, UNIX_EPOCH + Duration::from_secs(1_000_000));
}

#[test]
fn test_discover_missing_directory() {
    let group = new_group("a", &FPath::from("/this/directory/does/not/exist"), r".*");
    assert!(discover(&group).is_empty());
}

#[test]
fn test_discover_no_match() {
    let (tmpdir, _paths) = create_files_and_tmpdir(&[("a.txt", "")]);
    let group = new_group("a", &tmpdir_fpath(&tmpdir), r"a\.log");
    assert!(discover(&group).is_empty());
}

#[cfg(unix)]
#[test]
fn test_discover_symlink_loop() {
    let (tmpdir, _paths) = create_files_and_tmpdir(&[("sub/a.log", "")]);
    let sub = tmpdir.path().join("sub");
    std::os::unix::fs::symlink(tmpdir.path(), sub.join("loop")).unwrap();
    let group = new_group("a", &tmpdir_fpath(&tmpdir), r"a\.log");
    let found = discover(&group);
    assert_eq!(found.len(), 1);
}
