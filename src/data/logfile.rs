// src/data/logfile.rs

//! Implements a [`LogFile`], one discovered file of a [`LogGroup`], and the
//! [`Interval`] located within it.
//!
//! [`LogFile`]: self::LogFile
//! [`Interval`]: self::Interval
//! [`LogGroup`]: crate::data::loggroup::LogGroup

use crate::common::{FPath, FileOffset};
use crate::data::datetime::DateTimeL;
use crate::data::record::Records;

use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Interval
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Byte span `[from, to)` within one `LogFile`.
///
/// `from <= to` always holds; a search that produced `from > to` is an empty
/// interval.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Interval {
    from: FileOffset,
    to: FileOffset,
}

impl Interval {
    pub fn new(
        from: FileOffset,
        to: FileOffset,
    ) -> Interval {
        if from > to {
            return Interval { from, to: from };
        }

        Interval { from, to }
    }

    pub const fn from(&self) -> FileOffset {
        self.from
    }

    pub const fn to(&self) -> FileOffset {
        self.to
    }

    pub const fn len(&self) -> usize {
        self.to - self.from
    }

    pub const fn is_empty(&self) -> bool {
        self.from == self.to
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// LogFile
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Identifies a `LogFile` for reporting; shared by the file's `Record`s.
#[derive(Debug, Eq, PartialEq)]
pub struct LogFileId {
    pub group: String,
    pub path: FPath,
}

pub type LogFileIdP = Arc<LogFileId>;

/// One file of a `LogGroup`.
///
/// Created during discovery, populated during interval location or
/// segmentation, and dropped at process end.
pub struct LogFile {
    id: LogFileIdP,
    /// modified time from discovery
    modified: SystemTime,
    /// instant of the earliest timestamp in the file, or the discovery time
    /// if the file has no timestamp
    first_seen: DateTimeL,
    /// `first_seen` is the discovery time, not a timestamp found in the file
    first_seen_is_fallback: bool,
    /// the file's first record could be at or before the requested interval
    /// end
    overlaps: bool,
    interval: Interval,
    /// populated only when record-level operations are requested
    records: Records,
}

impl fmt::Debug for LogFile {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("LogFile")
            .field("path", &self.id.path)
            .field("first_seen", &self.first_seen)
            .field("first_seen_is_fallback", &self.first_seen_is_fallback)
            .field("overlaps", &self.overlaps)
            .field("interval", &self.interval)
            .field("records", &self.records.len())
            .finish()
    }
}

impl LogFile {
    pub fn new(
        group: &str,
        path: FPath,
        modified: SystemTime,
        first_seen: DateTimeL,
        first_seen_is_fallback: bool,
    ) -> LogFile {
        LogFile {
            id: Arc::new(LogFileId {
                group: String::from(group),
                path,
            }),
            modified,
            first_seen,
            first_seen_is_fallback,
            overlaps: false,
            interval: Interval::default(),
            records: Records::new(),
        }
    }

    pub fn id(&self) -> &LogFileIdP {
        &self.id
    }

    pub fn path(&self) -> &FPath {
        &self.id.path
    }

    pub fn group(&self) -> &str {
        self.id.group.as_str()
    }

    pub const fn modified(&self) -> SystemTime {
        self.modified
    }

    pub const fn first_seen(&self) -> &DateTimeL {
        &self.first_seen
    }

    pub const fn first_seen_is_fallback(&self) -> bool {
        self.first_seen_is_fallback
    }

    pub const fn overlaps(&self) -> bool {
        self.overlaps
    }

    pub(crate) fn set_overlaps(
        &mut self,
        overlaps: bool,
    ) {
        self.overlaps = overlaps;
    }

    pub const fn interval(&self) -> Interval {
        self.interval
    }

    pub(crate) fn set_interval(
        &mut self,
        interval: Interval,
    ) {
        self.interval = interval;
    }

    pub fn records(&self) -> &Records {
        &self.records
    }

    pub(crate) fn set_records(
        &mut self,
        records: Records,
    ) {
        self.records = records;
    }

    /// Drop the records and return them.
    pub fn take_records(&mut self) -> Records {
        std::mem::take(&mut self.records)
    }
}

pub type LogFiles = Vec<LogFile>;
