// src/tests/logfilechain_tests.rs

//! tests for `logfilechain.rs`

use crate::common::FPath;
use crate::data::datetime::{datetime_max, datetime_min, systemtime_to_datetime, DateTimeL};
use crate::debug::helpers::{create_files_and_tmpdir, create_temp_file, ntf_fpath, tmpdir_fpath};
use crate::readers::helpers::basename;
use crate::readers::logfilechain::{
    build_chain,
    build_chain_with,
    first_seen,
    first_seen_file,
    locate_interval,
    FIRST_SEEN_PREFIX_SZ,
};
use crate::tests::common::{hms, log_lines, new_group, new_matcher, offset_of, FO_0};

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use ::test_case::test_case;

#[test]
fn test_first_seen() {
    let matcher = new_matcher();
    let data = format!("# header\n{}", log_lines(&[(10, 0, 7, "a"), (9, 0, 0, "b")]));
    assert_eq!(first_seen(&matcher, data.as_bytes()), Some(hms(10, 0, 7)));
    assert_eq!(first_seen(&matcher, b"nothing"), None);
}

// timestamps start at offset 9 and are 19 bytes long
#[test_case(1; "prefix one byte")]
#[test_case(16; "prefix before first timestamp ends")]
#[test_case(28; "prefix ends with first timestamp")]
#[test_case(29; "prefix just past first timestamp")]
#[test_case(64; "prefix within file")]
#[test_case(FIRST_SEEN_PREFIX_SZ; "prefix past file end")]
fn test_first_seen_file(prefix_sz: usize) {
    let matcher = new_matcher();
    let data = format!("# header\n{}", log_lines(&[(10, 0, 7, "a"), (9, 0, 0, "b")]));
    let ntf = create_temp_file(data.as_str());
    assert_eq!(first_seen_file(&matcher, &ntf_fpath(&ntf), prefix_sz).unwrap(), Some(hms(10, 0, 7)));
}

#[test]
fn test_first_seen_file_timestamp_after_prefix() {
    let matcher = new_matcher();
    let mut data = "x".repeat(200);
    data.push('\n');
    data.push_str(log_lines(&[(11, 30, 0, "late")]).as_str());
    let ntf = create_temp_file(data.as_str());
    assert_eq!(first_seen_file(&matcher, &ntf_fpath(&ntf), 64).unwrap(), Some(hms(11, 30, 0)));
    let ntf = create_temp_file("no timestamps here\n");
    assert_eq!(first_seen_file(&matcher, &ntf_fpath(&ntf), 4).unwrap(), None);
    assert!(first_seen_file(&matcher, &FPath::from("/this/file/does/not/exist.log"), 64).is_err());
}

#[test]
fn test_locate_interval_single_file() {
    let matcher = new_matcher();
    let data = log_lines(&[(10, 0, 0, "a"), (10, 1, 0, "b"), (10, 2, 0, "c"), (10, 3, 0, "d")]);
    let interval = locate_interval(&matcher, data.as_bytes(), &hms(10, 0, 0), None, &hms(10, 0, 30), &hms(10, 2, 30));
    assert_eq!(interval.from(), offset_of(&data, "2020-01-01 10:01:00"));
    assert_eq!(interval.to(), offset_of(&data, "2020-01-01 10:03:00"));
}

#[test]
fn test_locate_interval_file_starts_after_from() {
    let matcher = new_matcher();
    let data = format!("header\n{}", log_lines(&[(10, 5, 0, "a"), (10, 6, 0, "b")]));
    let interval = locate_interval(&matcher, data.as_bytes(), &hms(10, 5, 0), None, &hms(10, 0, 0), &hms(11, 0, 0));
    // the whole file, including bytes before the first timestamp
    assert_eq!(interval.from(), 0);
    assert_eq!(interval.to(), data.len());
}

#[test]
fn test_locate_interval_continues_in_next_file() {
    let matcher = new_matcher();
    let data = log_lines(&[(10, 0, 0, "a"), (10, 1, 0, "b")]);
    let next: DateTimeL = hms(10, 2, 0);
    let interval =
        locate_interval(&matcher, data.as_bytes(), &hms(10, 0, 0), Some(&next), &hms(10, 0, 30), &hms(10, 5, 0));
    assert_eq!(interval.from(), offset_of(&data, "2020-01-01 10:01:00"));
    assert_eq!(interval.to(), data.len());
}

#[test]
fn test_locate_interval_reversed_is_empty() {
    let matcher = new_matcher();
    let data = log_lines(&[(10, 0, 0, "a"), (10, 1, 0, "b"), (10, 2, 0, "c")]);
    let interval = locate_interval(&matcher, data.as_bytes(), &hms(10, 0, 0), None, &hms(10, 1, 30), &hms(10, 0, 30));
    assert!(interval.is_empty());
}

/// Three rotated files; names are not in time order.
fn rotated_files() -> (crate::debug::helpers::TempDir, Vec<FPath>) {
    create_files_and_tmpdir(&[
        ("svc.log.2", log_lines(&[(10, 0, 0, "one a"), (10, 1, 0, "one b")]).as_str()),
        ("svc.log.1", log_lines(&[(10, 2, 0, "two a"), (10, 3, 0, "two b")]).as_str()),
        ("svc.log", log_lines(&[(10, 4, 0, "three a"), (10, 5, 0, "three b")]).as_str()),
    ])
}

#[test]
fn test_build_chain_order_and_overlaps() {
    let (tmpdir, _paths) = rotated_files();
    let group = new_group("svc", &tmpdir_fpath(&tmpdir), r"svc\.log(\.\d+)?");
    let chain = build_chain(&group, &hms(10, 0, 30), &hms(10, 2, 30), &SystemTime::now());
    assert_eq!(chain.group(), "svc");
    let names: Vec<FPath> = chain
        .files()
        .iter()
        .map(|lf| basename(lf.path()))
        .collect();
    assert_eq!(names, vec!["svc.log.2", "svc.log.1", "svc.log"]);
    let overlaps: Vec<bool> = chain
        .files()
        .iter()
        .map(|lf| lf.overlaps())
        .collect();
    assert_eq!(overlaps, vec![true, true, false]);
    assert!(!chain.is_empty());
    assert!(chain.errors().is_empty());

    let files = chain.files();
    // file 1 from its second record to its end; the window continues in file 2
    assert_eq!(files[0].interval().from(), offset_of(&log_lines(&[(10, 0, 0, "one a")]), "\n") + 1);
    assert_eq!(files[0].interval().to(), std::fs::metadata(files[0].path()).unwrap().len() as usize);
    // file 2 from its start to its second record
    assert_eq!(files[1].interval().from(), 0);
    assert_eq!(files[1].interval().to(), offset_of(&log_lines(&[(10, 2, 0, "two a")]), "\n") + 1);
}

#[test]
fn test_build_chain_window_before_all_files() {
    let (tmpdir, _paths) = rotated_files();
    let group = new_group("svc", &tmpdir_fpath(&tmpdir), r"svc\.log(\.\d+)?");
    let chain = build_chain(&group, &hms(9, 0, 0), &hms(9, 30, 0), &SystemTime::now());
    assert_eq!(chain.files().len(), 3, "non-overlapping files stay in the chain");
    assert!(chain.is_empty());
    assert_eq!(chain.overlapping().count(), 0);
}

#[test]
fn test_build_chain_no_files() {
    let (tmpdir, _paths) = create_files_and_tmpdir(&[("other.txt", "")]);
    let group = new_group("svc", &tmpdir_fpath(&tmpdir), r"svc\.log");
    let chain = build_chain(&group, &datetime_min(), &datetime_max(), &SystemTime::now());
    assert!(chain.files().is_empty());
    assert!(chain.is_empty());
}

#[test]
fn test_build_chain_fallback_discovery_time() {
    let (tmpdir, _paths) = create_files_and_tmpdir(&[
        ("svc.log.1", log_lines(&[(10, 0, 0, "a")]).as_str()),
        ("svc.log", "no timestamps yet\n"),
    ]);
    let group = new_group("svc", &tmpdir_fpath(&tmpdir), r"svc\.log(\.\d+)?");
    let discovery_time: SystemTime = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
    let chain = build_chain(&group, &datetime_min(), &datetime_max(), &discovery_time);
    let files = chain.files();
    assert_eq!(files.len(), 2);
    assert_eq!(basename(files[1].path()), "svc.log");
    assert!(files[1].first_seen_is_fallback());
    assert_eq!(files[1].first_seen(), &systemtime_to_datetime(&FO_0, &discovery_time));
    assert!(!files[0].first_seen_is_fallback());
}

#[test]
fn test_build_chain_with_visits_overlapping() {
    let (tmpdir, _paths) = rotated_files();
    let group = new_group("svc", &tmpdir_fpath(&tmpdir), r"svc\.log(\.\d+)?");
    let mut visited: Vec<(FPath, usize)> = Vec::new();
    let _chain = build_chain_with(&group, &hms(10, 0, 0), &hms(10, 2, 30), &SystemTime::now(), |lf, content| {
        visited.push((basename(lf.path()), content.len()));
    });
    let names: Vec<&str> = visited
        .iter()
        .map(|(name, _)| name.as_str())
        .collect();
    assert_eq!(names, vec!["svc.log.2", "svc.log.1"]);
    assert!(visited.iter().all(|(_, len)| *len > 0));
}
