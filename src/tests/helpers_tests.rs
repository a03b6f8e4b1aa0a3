// src/tests/helpers_tests.rs

//! tests for `helpers.rs` functions

use crate::common::FPath;
use crate::debug::helpers::{create_temp_file, ntf_fpath};
use crate::readers::helpers::{basename, parent, read_file, read_span};

use ::test_case::test_case;

#[test_case("/path/to/file.log", "file.log")]
#[test_case("file.log", "file.log"; "no directory")]
#[test_case("/path/to/", "to"; "trailing slash")]
#[test_case("", ""; "empty path")]
fn test_basename(
    path: &str,
    expect: &str,
) {
    assert_eq!(basename(&FPath::from(path)), expect);
}

#[test_case("/path/to/file.log", "/path/to")]
#[test_case("file.log", ""; "no directory")]
#[test_case("/", ""; "root")]
fn test_parent(
    path: &str,
    expect: &str,
) {
    assert_eq!(parent(&FPath::from(path)), expect);
}

#[test]
fn test_read_file() {
    let ntf = create_temp_file("abc\ndef\n");
    let path = ntf_fpath(&ntf);
    assert_eq!(read_file(&path).unwrap(), b"abc\ndef\n".to_vec());
}

#[test_case(0, 8, "abc\ndef\n"; "whole")]
#[test_case(4, 7, "def"; "middle")]
#[test_case(3, 3, ""; "empty")]
#[test_case(5, 2, ""; "reversed")]
#[test_case(6, 100, "f\n"; "past end")]
#[test_case(50, 100, ""; "beyond end")]
fn test_read_span(
    begin: usize,
    end: usize,
    expect: &str,
) {
    let ntf = create_temp_file("abc\ndef\n");
    assert_eq!(read_span(&ntf_fpath(&ntf), begin, end).unwrap(), expect.as_bytes().to_vec());
}

#[test]
fn test_read_missing_file() {
    let path = FPath::from("/this/file/does/not/exist.log");
    assert!(read_file(&path).is_err());
    assert!(read_span(&path, 0, 10).is_err());
}
