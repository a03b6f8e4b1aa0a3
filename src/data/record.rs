// src/data/record.rs

//! Implements a [`Record`], the text between one timestamp occurrence and
//! the next (or the end of the file), and a [`RankedRecord`], a `Record`
//! with its content read back for output.
//!
//! [`Record`]: self::Record
//! [`RankedRecord`]: self::RankedRecord

use crate::common::{Bytes, FPath, FileOffset};
use crate::data::datetime::{DateTimeL, Duration};
use crate::data::logfile::LogFileIdP;

use std::fmt;

use ::more_asserts::debug_assert_le;

/// A time-stamped record within one log file.
///
/// `begin` is the offset of the record's timestamp and `end` the offset of the
/// next timestamp (or the end of the searched span), so the record covers
/// `[begin, end)`.
#[derive(Clone)]
pub struct Record {
    /// back-reference to the originating file, used only for reporting
    file: LogFileIdP,
    dt: DateTimeL,
    begin: FileOffset,
    end: FileOffset,
    /// elapsed time since the previous record of the same file, zero for the
    /// first record of a file
    duration: Duration,
}

impl fmt::Debug for Record {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("Record")
            .field("path", &self.file.path)
            .field("dt", &self.dt)
            .field("begin", &self.begin)
            .field("end", &self.end)
            .field("duration", &self.duration)
            .finish()
    }
}

impl Record {
    pub fn new(
        file: LogFileIdP,
        dt: DateTimeL,
        begin: FileOffset,
        end: FileOffset,
        duration: Duration,
    ) -> Record {
        debug_assert_le!(begin, end, "Record begin {} is after end {}", begin, end);

        Record {
            file,
            dt,
            begin,
            end,
            duration,
        }
    }

    pub const fn dt(&self) -> &DateTimeL {
        &self.dt
    }

    pub const fn begin(&self) -> FileOffset {
        self.begin
    }

    pub const fn end(&self) -> FileOffset {
        self.end
    }

    pub const fn len(&self) -> usize {
        self.end - self.begin
    }

    pub const fn is_empty(&self) -> bool {
        self.end == self.begin
    }

    pub const fn duration(&self) -> Duration {
        self.duration
    }

    pub fn path(&self) -> &FPath {
        &self.file.path
    }

    pub fn group(&self) -> &str {
        self.file.group.as_str()
    }

    pub fn file(&self) -> &LogFileIdP {
        &self.file
    }
}

pub type Records = Vec<Record>;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One result of ranking the longest records.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RankedRecord {
    pub duration: Duration,
    pub group: String,
    pub path: FPath,
    pub dt: DateTimeL,
    pub begin: FileOffset,
    pub end: FileOffset,
    /// the record's bytes, read back from the file
    pub content: Bytes,
}

pub type RankedRecords = Vec<RankedRecord>;
