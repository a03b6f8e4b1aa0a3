// src/data/datetime.rs

//! Functions to transform datetime substrings into chrono [`DateTime`]
//! instances, and to compare those instances.
//!
//! Parsing a log timestamp requires:
//! 1. a regular expression match found by a [`TimestampMatcher`]
//! 2. optionally, expanding the match's capture groups into a template
//! 3. parsing the resulting text with a chrono [`strftime`] format
//!
//! A format with a timezone specifier (`%z`, `%:z`, etc.) is parsed into a
//! `DateTime` honoring that offset. A format without one is parsed as a
//! [`NaiveDateTime`] and then given the single fixed offset configured for
//! the run, so that the same text always yields the same instant.
//!
//! [`DateTime`]: https://docs.rs/chrono/0.4.40/chrono/struct.DateTime.html
//! [`NaiveDateTime`]: https://docs.rs/chrono/0.4.40/chrono/naive/struct.NaiveDateTime.html
//! [`strftime`]: https://docs.rs/chrono/0.4.40/chrono/format/strftime/index.html
//! [`TimestampMatcher`]: crate::readers::timestampmatcher::TimestampMatcher

#![allow(non_camel_case_types)]

use std::time::SystemTime;

extern crate chrono;
#[doc(hidden)]
pub use chrono::{
    DateTime,
    Duration,
    FixedOffset,
    Local,
    NaiveDate,
    NaiveDateTime,
    Offset,
    TimeZone,
    Utc,
};
use chrono::format::{Item, StrftimeItems};

extern crate si_trace_print;
#[allow(unused_imports)]
use si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// DateTime typing, strftime parsing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Crate `chrono` [`strftime`] formatting pattern, passed to
/// chrono [`DateTime::parse_from_str`].
///
/// [`strftime`]: https://docs.rs/chrono/0.4.40/chrono/format/strftime/index.html
/// [`DateTime::parse_from_str`]: https://docs.rs/chrono/0.4.40/chrono/struct.DateTime.html#method.parse_from_str
pub type DateTimePattern_str = str;

/// Regular expression pattern for finding timestamp substrings, passed to
/// [`regex::bytes::Regex`].
///
/// [`regex::bytes::Regex`]: https://docs.rs/regex/1.11.1/regex/bytes/struct.Regex.html
pub type DateTimeRegex_str = str;

/// The chrono [`DateTime`] type used in _acacialib_.
///
/// [`DateTime`]: https://docs.rs/chrono/0.4.40/chrono/struct.DateTime.html
pub type DateTimeL = DateTime<FixedOffset>;
pub type DateTimeLOpt = Option<DateTimeL>;

/// strftime specifiers that carry a timezone offset chrono can parse.
const PATTERN_TZ_SPECIFIERS: [&str; 5] = ["%z", "%:z", "%::z", "%#z", "%+"];

/// Does the strftime `pattern` carry a parseable timezone offset?
pub fn pattern_has_tz(pattern: &DateTimePattern_str) -> bool {
    PATTERN_TZ_SPECIFIERS
        .iter()
        .any(|tz| pattern.contains(tz))
}

/// Is the strftime `pattern` well-formed and non-empty?
pub fn pattern_is_valid(pattern: &DateTimePattern_str) -> bool {
    if pattern.is_empty() {
        return false;
    }

    !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

/// Convert a [`&str`] to a chrono [`Option<DateTime<FixedOffset>>`]
/// instance.
///
/// Compensate for a missing timezone.
///
/// - `data` to parse that has a datetime string
/// - strftime `pattern` to use for parsing
/// - `has_tz`, the `pattern` has a timezone (`%z`, `%:z`, etc.)?
/// - `tz_offset` fallback timezone offset when `!has_tz`
///
/// [`&str`]: str
/// [`Option<DateTime<FixedOffset>>`]: https://docs.rs/chrono/0.4.40/chrono/struct.DateTime.html
pub fn datetime_parse_from_str(
    data: &str,
    pattern: &DateTimePattern_str,
    has_tz: bool,
    tz_offset: &FixedOffset,
) -> DateTimeLOpt {
    defn!("(pattern {:?}, has_tz {}, tz_offset {:?}, data {:?})", pattern, has_tz, tz_offset, data);

    if has_tz {
        match DateTime::parse_from_str(data, pattern) {
            Ok(val) => {
                defx!("return Some({:?})", val);

                Some(val)
            }
            Err(_err) => {
                defx!("DateTime::parse_from_str({:?}, {:?}) failed ParseError: {}", data, pattern, _err);

                None
            }
        }
    } else {
        // no timezone in `pattern` so first convert to a `NaiveDateTime` instance
        let dt_naive = match NaiveDateTime::parse_from_str(data, pattern) {
            Ok(val) => val,
            Err(_err) => {
                defx!("NaiveDateTime::parse_from_str({:?}, {:?}) failed ParseError: {}", data, pattern, _err);
                return None;
            }
        };
        // second convert the `NaiveDateTime` instance to `DateTime<FixedOffset>` instance
        match tz_offset
            .from_local_datetime(&dt_naive)
            .earliest()
        {
            Some(val) => {
                defx!("return Some({:?})", val);

                Some(val)
            }
            None => {
                defx!("tz_offset.from_local_datetime({:?}) returned None, return None", dt_naive);

                None
            }
        }
    }
}

/// Call [`datetime_parse_from_str`] with a `pattern` containing a timezone.
pub fn datetime_parse_from_str_w_tz(
    data: &str,
    pattern: &DateTimePattern_str,
) -> DateTimeLOpt {
    datetime_parse_from_str(data, pattern, true, &Utc.fix())
}

/// Convert passed [`SystemTime`] to [`DateTimeL`] with passed [`FixedOffset`].
///
/// [`FixedOffset`]: https://docs.rs/chrono/0.4.40/chrono/offset/struct.FixedOffset.html
/// [`SystemTime`]: std::time::SystemTime
pub fn systemtime_to_datetime(
    fixedoffset: &FixedOffset,
    systemtime: &SystemTime,
) -> DateTimeL {
    // https://users.rust-lang.org/t/convert-std-time-systemtime-to-chrono-datetime-datetime/7684/6
    let dtu: DateTime<Utc> = (*systemtime).into();

    dtu.with_timezone(fixedoffset)
}

/// The local system timezone offset, sampled once by the caller and then
/// reused for every parse.
pub fn local_offset() -> FixedOffset {
    *Local::now().offset()
}

/// Earliest representable `DateTimeL`; an unbounded interval start.
pub fn datetime_min() -> DateTimeL {
    DateTime::<Utc>::MIN_UTC.fixed_offset()
}

/// Latest representable `DateTimeL`; an unbounded interval end.
pub fn datetime_max() -> DateTimeL {
    DateTime::<Utc>::MAX_UTC.fixed_offset()
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// user-passed datetimes and timezone offsets
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// strftime patterns tried in order for user-passed datetimes, with whether
/// the pattern has a timezone offset.
const USER_DT_PATTERNS: [(&DateTimePattern_str, bool); 8] = [
    ("%Y-%m-%dT%H:%M:%S%.f%:z", true),
    ("%Y-%m-%dT%H:%M:%S%.f%z", true),
    ("%Y-%m-%d %H:%M:%S%.f %:z", true),
    ("%Y-%m-%d %H:%M:%S%.f %z", true),
    ("%Y-%m-%dT%H:%M:%S%.f", false),
    ("%Y-%m-%d %H:%M:%S%.f", false),
    ("%Y%m%dT%H%M%S%.f%z", true),
    ("%Y%m%dT%H%M%S%.f", false),
];

/// Transform a user-passed datetime string into a [`DateTimeL`].
///
/// Accepts RFC 3339 (e.g. `"2015-02-20T09:09:25.000Z"`), the patterns in
/// `USER_DT_PATTERNS`, or a bare date `"2015-02-20"` meaning midnight.
/// Datetimes without an offset are given `tz_offset`.
pub fn datetime_parse_user_str(
    data: &str,
    tz_offset: &FixedOffset,
) -> DateTimeLOpt {
    defn!("({:?}, {:?})", data, tz_offset);
    let data = data.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(data) {
        defx!("rfc3339 return {:?}", dt);
        return Some(dt);
    }
    for (pattern, has_tz) in USER_DT_PATTERNS.iter() {
        if let Some(dt) = datetime_parse_from_str(data, pattern, *has_tz, tz_offset) {
            defx!("pattern {:?} return {:?}", pattern, dt);
            return Some(dt);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(data, "%Y-%m-%d") {
        let dt_naive: NaiveDateTime = date.and_hms_opt(0, 0, 0)?;
        let dt = tz_offset
            .from_local_datetime(&dt_naive)
            .earliest();
        defx!("date-only return {:?}", dt);
        return dt;
    }
    defx!("return None");

    None
}

/// Transform a timezone offset string, e.g. `"+01:00"`, `"-0800"`, `"+02"`,
/// `"Z"`, into a `FixedOffset`.
pub fn tz_offset_parse(tzo: &str) -> Option<FixedOffset> {
    defn!("({:?})", tzo);
    let tzo = tzo.trim();
    if tzo == "Z" || tzo == "z" || tzo.eq_ignore_ascii_case("UTC") {
        defx!("return UTC");
        return Some(Utc.fix());
    }
    // transform the timezone string to a `FixedOffset` instance
    // using a dummy `DateTimeL`
    let mut data: String = String::from("2000-01-02 03:04:05 ");
    data.push_str(tzo);
    for pattern in [
        "%Y-%m-%d %H:%M:%S %:z",
        "%Y-%m-%d %H:%M:%S %z",
        "%Y-%m-%d %H:%M:%S %#z",
    ] {
        if let Some(dt) = datetime_parse_from_str_w_tz(data.as_str(), pattern) {
            defx!("return {:?}", dt.offset());
            return Some(*dt.offset());
        }
    }
    defx!("return None");

    None
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// DateTime comparisons
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Describe the result of comparing one [`DateTimeL`] to one DateTime Filter.
#[derive(Debug, Eq, PartialEq)]
pub enum Result_Filter_DateTime1 {
    OccursAtOrAfter,
    OccursBefore,
}

impl Result_Filter_DateTime1 {
    /// Returns `true` if the result is `OccursAtOrAfter`.
    #[inline(always)]
    pub const fn is_after(&self) -> bool {
        matches!(*self, Result_Filter_DateTime1::OccursAtOrAfter)
    }

    /// Returns `true` if the result is `OccursBefore`.
    #[inline(always)]
    pub const fn is_before(&self) -> bool {
        matches!(*self, Result_Filter_DateTime1::OccursBefore)
    }
}

/// Compare passed [`DateTimeL`] `dt` to the passed filter `dt_filter`.
///
/// If `dt` is at or after `dt_filter` then return [`OccursAtOrAfter`]<br/>
/// If `dt` is before `dt_filter` then return [`OccursBefore`]
///
/// [`OccursAtOrAfter`]: crate::data::datetime::Result_Filter_DateTime1
/// [`OccursBefore`]: crate::data::datetime::Result_Filter_DateTime1
pub fn dt_after_or_before(
    dt: &DateTimeL,
    dt_filter: &DateTimeL,
) -> Result_Filter_DateTime1 {
    if dt < dt_filter {
        defñ!("return OccursBefore; (dt {:?} is before dt_filter {:?})", dt, dt_filter);
        return Result_Filter_DateTime1::OccursBefore;
    }
    defñ!("return OccursAtOrAfter; (dt {:?} is at or after dt_filter {:?})", dt, dt_filter);

    Result_Filter_DateTime1::OccursAtOrAfter
}
