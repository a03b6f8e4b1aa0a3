// src/readers/datestripper.rs

//! Remove timestamps from file content.

use crate::common::Bytes;
use crate::readers::timestampmatcher::TimestampMatcher;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Remove every substring of `content` matched by the matcher's timestamp
/// pattern. All other bytes are kept in their original order.
pub fn strip(
    matcher: &TimestampMatcher,
    content: &[u8],
) -> Bytes {
    defn!("({} bytes)", content.len());
    let stripped: Bytes = matcher.strip(content);
    defx!("return {} bytes", stripped.len());

    stripped
}
