// src/tests/common.rs

//! Common fixtures for tests.

#![allow(non_upper_case_globals)]

use crate::common::FPath;
use crate::data::datetime::{DateTimeL, FixedOffset, TimeZone};
use crate::data::logfile::{LogFileId, LogFileIdP};
use crate::data::loggroup::LogGroup;
use crate::readers::timestampmatcher::TimestampMatcher;

use std::sync::Arc;

extern crate lazy_static;
use lazy_static::lazy_static;

/// timestamp at the start of a line, e.g. `2020-01-01 10:00:00`
pub const TS_PATTERN: &str = r"(?m)^\d{4}-\d\d-\d\d \d\d:\d\d:\d\d";
pub const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

lazy_static! {
    pub static ref FO_0: FixedOffset = FixedOffset::east_opt(0).unwrap();
    pub static ref FO_P1: FixedOffset = FixedOffset::east_opt(3600).unwrap();
    pub static ref FO_M8: FixedOffset = FixedOffset::west_opt(8 * 3600).unwrap();
}

/// `DateTimeL` at offset zero.
pub fn ymdhms(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    min: u32,
    sec: u32,
) -> DateTimeL {
    FO_0.with_ymd_and_hms(year, month, day, hour, min, sec)
        .unwrap()
}

/// `DateTimeL` at offset zero on 2020-01-01.
pub fn hms(
    hour: u32,
    min: u32,
    sec: u32,
) -> DateTimeL {
    ymdhms(2020, 1, 1, hour, min, sec)
}

/// `TimestampMatcher` for `TS_PATTERN` and `TS_FORMAT` at offset zero.
pub fn new_matcher() -> TimestampMatcher {
    TimestampMatcher::new(TS_PATTERN, TS_FORMAT, None, *FO_0).unwrap()
}

/// `LogGroup` for `TS_PATTERN` and `TS_FORMAT` at offset zero.
pub fn new_group(
    name: &str,
    directory: &FPath,
    filename_pattern: &str,
) -> LogGroup {
    LogGroup::new(name, directory, filename_pattern, TS_PATTERN, TS_FORMAT, None, *FO_0).unwrap()
}

pub fn new_file_id(path: &str) -> LogFileIdP {
    Arc::new(LogFileId {
        group: String::from("test"),
        path: FPath::from(path),
    })
}

/// One line per `(hour, min, sec, message)`.
pub fn log_lines(lines: &[(u32, u32, u32, &str)]) -> String {
    lines
        .iter()
        .map(|(h, m, s, msg)| format!("2020-01-01 {:02}:{:02}:{:02} {}\n", h, m, s, msg))
        .collect()
}

/// Offset of the first occurrence of `needle` in `haystack`.
pub fn offset_of(
    haystack: &str,
    needle: &str,
) -> usize {
    haystack.find(needle).unwrap()
}
