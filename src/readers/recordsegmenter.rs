// src/readers/recordsegmenter.rs

//! Split file content into [`Record`s] delimited by consecutive timestamps.
//!
//! [`Record`s]: crate::data::record::Record

use crate::common::FileOffset;
use crate::data::datetime::Duration;
use crate::data::logfile::LogFileIdP;
use crate::data::record::{Record, Records};
use crate::readers::timestampmatcher::{TimestampMatcher, TimestampMatches};

use std::sync::Arc;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Segment `content[begin..end]` into records.
///
/// Record `i` spans from the start of timestamp `i` to the start of timestamp
/// `i + 1`, the last record spans to `end`. Bytes before the first timestamp
/// belong to no record. Offsets are absolute within `content`.
///
/// The first record's duration is zero; record `i > 0` has duration
/// `dt[i] - dt[i - 1]`, which is negative if the timestamps decrease.
pub fn segment_span(
    matcher: &TimestampMatcher,
    file: &LogFileIdP,
    content: &[u8],
    begin: FileOffset,
    end: FileOffset,
) -> Records {
    defn!("({:?}, begin {}, end {})", file.path, begin, end);
    let end: FileOffset = end.min(content.len());
    let matches: TimestampMatches = matcher.find_all_between(content, begin, end);
    let mut records = Records::with_capacity(matches.len());
    for (i, tsm) in matches.iter().enumerate() {
        let record_end: FileOffset = match matches.get(i + 1) {
            Some(next) => next.begin,
            None => end,
        };
        let duration: Duration = match i {
            0 => Duration::zero(),
            _ => tsm.dt - matches[i - 1].dt,
        };
        records.push(Record::new(Arc::clone(file), tsm.dt, tsm.begin, record_end, duration));
    }
    defx!("{} records", records.len());

    records
}

/// Segment all of `content` into records.
pub fn segment(
    matcher: &TimestampMatcher,
    file: &LogFileIdP,
    content: &[u8],
) -> Records {
    segment_span(matcher, file, content, 0, content.len())
}
