// src/readers/timestampmatcher.rs

//! Implements a [`TimestampMatcher`], the primitive shared by the interval
//! locator, the file chain, the record segmenter, and the date stripper.
//!
//! [`TimestampMatcher`]: self::TimestampMatcher

use crate::common::{Bytes, FileOffset};
use crate::data::datetime::{
    datetime_parse_from_str,
    pattern_has_tz,
    pattern_is_valid,
    DateTimeL,
    DateTimeLOpt,
    DateTimePattern_str,
    DateTimeRegex_str,
    FixedOffset,
};
use crate::debug::printers::buffer_to_String_noraw;

use std::fmt;

use ::more_asserts::debug_assert_le;
use ::regex::bytes::{Captures, Regex};
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// TimestampMatch
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One timestamp occurrence within a buffer; the matched byte span
/// `[begin, end)` and the parsed instant.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TimestampMatch {
    pub begin: FileOffset,
    pub end: FileOffset,
    pub dt: DateTimeL,
}

pub type TimestampMatches = Vec<TimestampMatch>;

/// Why a `TimestampMatcher` could not be created.
#[derive(Debug)]
pub enum TimestampMatcherError {
    Regex(regex::Error),
    Format(String),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// TimestampMatcher
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Finds timestamp substrings in raw file bytes with a regular expression
/// and parses them into [`DateTimeL`] instances.
///
/// A regex match whose text fails to parse is not a timestamp; searching
/// continues after that match.
///
/// Searches start at an offset within the whole buffer (not a sub-slice) so
/// anchors like `(?m)^` and `\b` see the true preceding bytes.
///
/// [`DateTimeL`]: crate::data::datetime::DateTimeL
#[derive(Clone)]
pub struct TimestampMatcher {
    regex: Regex,
    /// chrono strftime format used to parse matched (or expanded) text
    format: String,
    /// optional capture group expansion template, e.g. `"$1-$2-$3T$4"`
    template: Option<String>,
    /// `format` has a timezone specifier
    has_tz: bool,
    /// offset applied when `format` has no timezone specifier
    tz_offset: FixedOffset,
}

impl fmt::Debug for TimestampMatcher {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("TimestampMatcher")
            .field("regex", &self.regex.as_str())
            .field("format", &self.format)
            .field("template", &self.template)
            .field("has_tz", &self.has_tz)
            .field("tz_offset", &self.tz_offset)
            .finish()
    }
}

impl TimestampMatcher {
    pub fn new(
        pattern: &DateTimeRegex_str,
        format: &DateTimePattern_str,
        template: Option<&str>,
        tz_offset: FixedOffset,
    ) -> Result<TimestampMatcher, TimestampMatcherError> {
        defn!("({:?}, {:?}, {:?}, {:?})", pattern, format, template, tz_offset);
        let regex = match Regex::new(pattern) {
            Ok(val) => val,
            Err(err) => {
                defx!("Regex::new failed {}", err);
                return Err(TimestampMatcherError::Regex(err));
            }
        };
        if !pattern_is_valid(format) {
            defx!("invalid format {:?}", format);
            return Err(TimestampMatcherError::Format(String::from(format)));
        }
        defx!();

        Ok(TimestampMatcher {
            regex,
            format: String::from(format),
            template: template.map(String::from),
            has_tz: pattern_has_tz(format),
            tz_offset,
        })
    }

    pub const fn tz_offset(&self) -> FixedOffset {
        self.tz_offset
    }

    /// Parse one regex match into a `DateTimeL`.
    ///
    /// With a template, the captures are expanded first, otherwise the whole
    /// match is parsed.
    fn parse_captures(
        &self,
        captures: &Captures,
    ) -> DateTimeLOpt {
        let mut expanded: Bytes;
        let data: &[u8] = match &self.template {
            Some(template) => {
                expanded = Bytes::with_capacity(template.len() + 16);
                captures.expand(template.as_bytes(), &mut expanded);
                expanded.as_slice()
            }
            None => captures.get(0)?.as_bytes(),
        };
        let data_s: &str = match std::str::from_utf8(data) {
            Ok(val) => val,
            Err(_err) => {
                defñ!("invalid UTF8 {:?}", buffer_to_String_noraw(data));
                return None;
            }
        };

        datetime_parse_from_str(data_s, &self.format, self.has_tz, &self.tz_offset)
    }

    /// Find the next timestamp that begins at or after `search_start`.
    ///
    /// Returns `None` when the remainder of `buffer` has no parseable
    /// timestamp. That is "no more timestamps", not an error.
    pub fn find_next(
        &self,
        buffer: &[u8],
        search_start: FileOffset,
    ) -> Option<TimestampMatch> {
        self.find_next_before(buffer, search_start, buffer.len())
    }

    /// Find the next timestamp that begins at or after `search_start` and
    /// lies entirely before `search_end`.
    pub fn find_next_before(
        &self,
        buffer: &[u8],
        search_start: FileOffset,
        search_end: FileOffset,
    ) -> Option<TimestampMatch> {
        defn!("(search_start {}, search_end {})", search_start, search_end);
        let haystack: &[u8] = &buffer[..search_end.min(buffer.len())];
        let mut at: FileOffset = search_start;
        while at <= haystack.len() {
            let captures: Captures = match self.regex.captures_at(haystack, at) {
                Some(val) => val,
                None => {
                    defx!("no match at or after {}, return None", at);
                    return None;
                }
            };
            // group 0 is always present
            let m = captures.get(0)?;
            let (begin, end) = (m.start(), m.end());
            debug_assert_le!(at, begin, "regex match begins before search offset");
            match self.parse_captures(&captures) {
                Some(dt) => {
                    defx!("return TimestampMatch [{}, {}) {:?}", begin, end, dt);
                    return Some(TimestampMatch { begin, end, dt });
                }
                None => {
                    defo!(
                        "match [{}, {}) {:?} did not parse; continue",
                        begin,
                        end,
                        buffer_to_String_noraw(m.as_bytes())
                    );
                    // skip empty matches
                    at = if end > begin { end } else { begin + 1 };
                }
            }
        }
        defx!("return None");

        None
    }

    /// Find every timestamp in `buffer` within `[begin, end)`, in order.
    ///
    /// Matches do not overlap. One pass over the bytes.
    pub fn find_all_between(
        &self,
        buffer: &[u8],
        begin: FileOffset,
        end: FileOffset,
    ) -> TimestampMatches {
        defn!("(begin {}, end {})", begin, end);
        let mut matches = TimestampMatches::new();
        let mut at: FileOffset = begin;
        while let Some(tsm) = self.find_next_before(buffer, at, end) {
            at = if tsm.end > tsm.begin { tsm.end } else { tsm.begin + 1 };
            matches.push(tsm);
        }
        defx!("found {} timestamps", matches.len());

        matches
    }

    /// Remove every substring matched by the timestamp regular expression.
    ///
    /// Matches are removed whether or not they parse.
    pub fn strip(
        &self,
        buffer: &[u8],
    ) -> Bytes {
        self.regex
            .replace_all(buffer, &b""[..])
            .into_owned()
    }
}
