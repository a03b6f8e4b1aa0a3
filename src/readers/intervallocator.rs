// src/readers/intervallocator.rs

//! Binary search over the raw bytes of a file for the byte offset where the
//! timestamps reach a target instant. There is no line index; each probe
//! scans forward from the probed offset to the next timestamp.

use crate::common::FileOffset;
use crate::data::datetime::{dt_after_or_before, DateTimeL};
use crate::readers::timestampmatcher::{TimestampMatch, TimestampMatcher};

use ::more_asserts::{debug_assert_ge, debug_assert_le};
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Find the offset of the first timestamp within `[search_start, search_end)`
/// of `content` whose instant is at or after `target`.
///
/// Returns `search_end` if there is no such timestamp.
///
/// The result is always the start of a timestamp match (or `search_end`), the
/// smallest record boundary whose timestamp is `>= target`, so a slice taken
/// from it never begins inside a record. Timestamps are assumed to be in
/// ascending order; on unsorted content the result is still the start of
/// some timestamp, or `search_end`.
///
/// Each probe at `mid` finds the next timestamp at or after `mid`. If that is
/// before `target` the lower bound moves past the start of that timestamp,
/// otherwise (or if there is none) the upper bound moves to `mid`. Moving the
/// lower bound past the found match rather than past `mid` skips the bytes of
/// a long record in one step.
pub fn locate(
    matcher: &TimestampMatcher,
    content: &[u8],
    target: &DateTimeL,
    search_start: FileOffset,
    search_end: FileOffset,
) -> FileOffset {
    defn!("(target {:?}, search_start {}, search_end {})", target, search_start, search_end);
    let search_end: FileOffset = search_end.min(content.len());
    if search_start >= search_end {
        defx!("empty search window, return {}", search_end);
        return search_end;
    }

    let mut lo: FileOffset = search_start;
    let mut hi: FileOffset = search_end;
    // invariant: every timestamp starting in `[search_start, lo)` is before
    // `target`; the first timestamp at or after `hi` (if any) is not
    while lo < hi {
        let mid: FileOffset = lo + (hi - lo) / 2;
        match matcher.find_next_before(content, mid, search_end) {
            Some(tsm) if dt_after_or_before(&tsm.dt, target).is_before() => {
                defo!("probe {} found {:?} at {}, before target; lo = {}", mid, tsm.dt, tsm.begin, tsm.begin + 1);
                debug_assert_ge!(tsm.begin, mid);
                lo = tsm.begin + 1;
            }
            Some(_tsm) => {
                defo!("probe {} found {:?} at {}, at or after target; hi = {}", mid, _tsm.dt, _tsm.begin, mid);
                hi = mid;
            }
            None => {
                defo!("probe {} found nothing; hi = {}", mid, mid);
                hi = mid;
            }
        }
    }
    // `lo` is now at or before the wanted boundary; step to it
    let offset: FileOffset = match matcher.find_next_before(content, lo, search_end) {
        Some(TimestampMatch { begin, .. }) => begin,
        None => search_end,
    };
    debug_assert_le!(offset, search_end);
    defx!("return {}", offset);

    offset
}
