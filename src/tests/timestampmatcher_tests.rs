// src/tests/timestampmatcher_tests.rs

//! tests for `timestampmatcher.rs`

use crate::readers::timestampmatcher::{TimestampMatcher, TimestampMatcherError};
use crate::tests::common::{hms, new_matcher, offset_of, FO_0, FO_M8, FO_P1, TS_FORMAT, TS_PATTERN};

use ::test_case::test_case;

const DATA1: &str = "\
2020-01-01 10:00:00 start
 continued line
2020-01-01 10:00:05 second
2020-01-01 10:01:00 third
";

#[test]
fn test_find_next_at_start() {
    let matcher = new_matcher();
    let tsm = matcher
        .find_next(DATA1.as_bytes(), 0)
        .unwrap();
    assert_eq!(tsm.begin, 0);
    assert_eq!(tsm.end, 19);
    assert_eq!(tsm.dt, hms(10, 0, 0));
}

#[test_case(1, "2020-01-01 10:00:05", 10, 0, 5; "inside first line")]
#[test_case(30, "2020-01-01 10:00:05", 10, 0, 5; "inside continuation")]
fn test_find_next_from_offset(
    start: usize,
    expect_text: &str,
    h: u32,
    m: u32,
    s: u32,
) {
    let matcher = new_matcher();
    let tsm = matcher
        .find_next(DATA1.as_bytes(), start)
        .unwrap();
    assert_eq!(tsm.begin, offset_of(DATA1, expect_text));
    assert_eq!(tsm.dt, hms(h, m, s));
}

#[test]
fn test_find_next_none_after_last() {
    let matcher = new_matcher();
    let last: usize = offset_of(DATA1, "2020-01-01 10:01:00");
    assert!(matcher
        .find_next(DATA1.as_bytes(), last + 1)
        .is_none());
    assert!(matcher
        .find_next(DATA1.as_bytes(), DATA1.len())
        .is_none());
}

#[test]
fn test_find_next_no_timestamps() {
    let matcher = new_matcher();
    assert!(matcher
        .find_next(b"no dates here\nnone at all\n", 0)
        .is_none());
    assert!(matcher.find_next(b"", 0).is_none());
}

#[test]
fn test_find_next_skips_malformed() {
    let data = "2020-13-45 99:99:99 bad\n2020-01-01 10:00:00 ok\n";
    let matcher = new_matcher();
    let tsm = matcher
        .find_next(data.as_bytes(), 0)
        .unwrap();
    assert_eq!(tsm.begin, offset_of(data, "2020-01-01"));
    assert_eq!(tsm.dt, hms(10, 0, 0));
}

#[test]
fn test_find_next_before_excludes_match_crossing_end() {
    let matcher = new_matcher();
    let second: usize = offset_of(DATA1, "2020-01-01 10:00:05");
    assert!(matcher
        .find_next_before(DATA1.as_bytes(), 1, second + 5)
        .is_none());
    let tsm = matcher
        .find_next_before(DATA1.as_bytes(), 1, second + 19)
        .unwrap();
    assert_eq!(tsm.begin, second);
}

#[test]
fn test_find_next_before_start_past_end() {
    let matcher = new_matcher();
    assert!(matcher
        .find_next_before(DATA1.as_bytes(), 40, 20)
        .is_none());
}

#[test]
fn test_find_all_whole_buffer() {
    let matcher = new_matcher();
    let matches = matcher.find_all_between(DATA1.as_bytes(), 0, DATA1.len());
    assert_eq!(matches.len(), 3);
    assert_eq!(matches[0].dt, hms(10, 0, 0));
    assert_eq!(matches[1].dt, hms(10, 0, 5));
    assert_eq!(matches[2].dt, hms(10, 1, 0));
    assert!(matches
        .windows(2)
        .all(|w| w[0].end <= w[1].begin));
}

#[test]
fn test_find_all_between() {
    let matcher = new_matcher();
    let second: usize = offset_of(DATA1, "2020-01-01 10:00:05");
    let matches = matcher.find_all_between(DATA1.as_bytes(), 1, DATA1.len());
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].begin, second);
}

#[test]
fn test_tz_offset_applied_without_tz_in_format() {
    let matcher = TimestampMatcher::new(TS_PATTERN, TS_FORMAT, None, *FO_P1).unwrap();
    let tsm = matcher
        .find_next(b"2020-01-01 10:00:00 x\n", 0)
        .unwrap();
    // 10:00 at +01:00 is 09:00 at +00:00
    assert_eq!(tsm.dt, hms(9, 0, 0));
    assert_eq!(tsm.dt.offset(), &*FO_P1);
}

#[test]
fn test_tz_in_format_honored() {
    let matcher = TimestampMatcher::new(
        r"\d{4}-\d\d-\d\dT\d\d:\d\d:\d\d[+-]\d\d:\d\d",
        "%Y-%m-%dT%H:%M:%S%:z",
        None,
        *FO_M8,
    )
    .unwrap();
    let tsm = matcher
        .find_next(b"x 2020-01-01T10:00:00+02:00 y", 0)
        .unwrap();
    assert_eq!(tsm.begin, 2);
    assert_eq!(tsm.dt, hms(8, 0, 0));
}

#[test]
fn test_template_expansion() {
    let matcher = TimestampMatcher::new(
        r"(\d{2})/(\d{2})/(\d{4}) (\d\d:\d\d:\d\d)",
        TS_FORMAT,
        Some("$3-$1-$2 $4"),
        *FO_0,
    )
    .unwrap();
    let tsm = matcher
        .find_next(b"[01/31/2020 10:00:00] x", 0)
        .unwrap();
    assert_eq!(tsm.begin, 1);
    assert_eq!(tsm.dt, crate::tests::common::ymdhms(2020, 1, 31, 10, 0, 0));
}

#[test]
fn test_new_bad_regex() {
    match TimestampMatcher::new("(", TS_FORMAT, None, *FO_0) {
        Err(TimestampMatcherError::Regex(_)) => {}
        other => panic!("expected Regex error, got {:?}", other),
    }
}

#[test_case("%Y-%m-%d %Q"; "unknown specifier")]
#[test_case(""; "empty")]
fn test_new_bad_format(format: &str) {
    match TimestampMatcher::new(TS_PATTERN, format, None, *FO_0) {
        Err(TimestampMatcherError::Format(f)) => assert_eq!(f, format),
        other => panic!("expected Format error, got {:?}", other),
    }
}

#[test]
fn test_strip() {
    let matcher = new_matcher();
    let stripped = matcher.strip(DATA1.as_bytes());
    assert_eq!(stripped, b" start\n continued line\n second\n third\n".to_vec());
}
