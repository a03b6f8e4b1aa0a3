// src/readers/logfilechain.rs

//! Implements a [`LogFileChain`], the rotated files of one [`LogGroup`]
//! ordered oldest to newest and stitched into one timeline.
//!
//! Building a chain reads the start of every discovered file to find its
//! first timestamp, then reads each file that overlaps the requested window
//! whole to locate the window's byte [`Interval`] within it.
//!
//! [`LogFileChain`]: self::LogFileChain
//! [`LogGroup`]: crate::data::loggroup::LogGroup
//! [`Interval`]: crate::data::logfile::Interval

use crate::common::{Bytes, FPath, FileAccessError, FileAccessErrors, FileOffset};
use crate::data::datetime::{dt_after_or_before, systemtime_to_datetime, DateTimeL};
use crate::data::logfile::{Interval, LogFile, LogFiles};
use crate::data::loggroup::LogGroup;
use crate::e_wrn;
use crate::readers::filediscoverer::{discover, DiscoveredFile};
use crate::readers::helpers::{read_file, read_span};
use crate::readers::intervallocator::locate;
use crate::readers::timestampmatcher::TimestampMatcher;

use std::time::SystemTime;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Bytes read from the start of a file when looking for its first timestamp.
pub const FIRST_SEEN_PREFIX_SZ: usize = 0x10000;

/// The files of one group, ordered ascending by first-seen instant (then by
/// path), and any files that could not be read.
#[derive(Debug, Default)]
pub struct LogFileChain {
    group: String,
    files: LogFiles,
    errors: FileAccessErrors,
}

impl LogFileChain {
    /// An empty chain for `group`.
    pub fn new(group: &str) -> LogFileChain {
        LogFileChain {
            group: String::from(group),
            ..Default::default()
        }
    }

    pub fn group(&self) -> &str {
        self.group.as_str()
    }

    /// Every file that was read, overlapping the window or not.
    pub fn files(&self) -> &LogFiles {
        &self.files
    }

    pub fn files_mut(&mut self) -> &mut LogFiles {
        &mut self.files
    }

    /// Files that overlap the requested window, in chain order.
    pub fn overlapping(&self) -> impl Iterator<Item = &LogFile> {
        self.files
            .iter()
            .filter(|lf| lf.overlaps())
    }

    /// No file overlaps the requested window; a valid "no data in range".
    pub fn is_empty(&self) -> bool {
        self.overlapping()
            .next()
            .is_none()
    }

    pub fn errors(&self) -> &FileAccessErrors {
        &self.errors
    }

    pub fn into_parts(self) -> (LogFiles, FileAccessErrors) {
        (self.files, self.errors)
    }

    fn push_error(
        &mut self,
        error: FileAccessError,
    ) {
        e_wrn!("{}", error);
        self.errors.push(error);
    }
}

/// Find the first-seen instant of a file; the instant of its first
/// timestamp, or `None` if it has none.
pub fn first_seen(
    matcher: &TimestampMatcher,
    content: &[u8],
) -> Option<DateTimeL> {
    matcher
        .find_next(content, 0)
        .map(|tsm| tsm.dt)
}

/// Find the first-seen instant of the file at `path`, reading only its first
/// `prefix_sz` bytes if a timestamp is found there.
///
/// A match that reaches the end of the prefix may be cut short, so then the
/// whole file is read, as it is when the prefix has no timestamp.
pub fn first_seen_file(
    matcher: &TimestampMatcher,
    path: &FPath,
    prefix_sz: usize,
) -> std::io::Result<Option<DateTimeL>> {
    defn!("({:?}, {})", path, prefix_sz);
    let prefix: Bytes = read_span(path, 0, prefix_sz)?;
    if prefix.len() < prefix_sz {
        defx!("read whole file of {} bytes", prefix.len());
        return Ok(first_seen(matcher, &prefix));
    }
    if let Some(tsm) = matcher.find_next(&prefix, 0) {
        if tsm.end < prefix.len() {
            defx!("found in prefix at {}", tsm.begin);
            return Ok(Some(tsm.dt));
        }
    }
    let content: Bytes = read_file(path)?;
    let dt = first_seen(matcher, &content);
    defx!("read whole file; {:?}", dt);

    Ok(dt)
}

/// Locate the byte `Interval` of `[from, to)` within one file of a chain.
///
/// `next_first_seen` is the first-seen instant of the next file in the chain.
/// The file's `from` offset is 0 if the file starts at or after `from`. If
/// the window continues past where the next file starts then the `to` offset
/// is the end of this file, otherwise `to` is searched for in
/// `[from offset, len)`.
pub fn locate_interval(
    matcher: &TimestampMatcher,
    content: &[u8],
    file_first_seen: &DateTimeL,
    next_first_seen: Option<&DateTimeL>,
    from: &DateTimeL,
    to: &DateTimeL,
) -> Interval {
    defn!("(first_seen {:?}, next_first_seen {:?}, from {:?}, to {:?})", file_first_seen, next_first_seen, from, to);
    let len: FileOffset = content.len();
    let position_from: FileOffset = if dt_after_or_before(file_first_seen, from).is_after() {
        0
    } else {
        locate(matcher, content, from, 0, len)
    };
    let position_to: FileOffset = match next_first_seen {
        Some(next) if to > next => {
            defo!("window continues in the next file");
            len
        }
        _ => locate(matcher, content, to, position_from, len),
    };
    let interval = Interval::new(position_from, position_to);
    defx!("return {:?}", interval);

    interval
}

/// Build the chain for `group` and the window `[from, to)`.
///
/// `discovery_time` is the first-seen instant given to a file that has no
/// timestamp.
pub fn build_chain(
    group: &LogGroup,
    from: &DateTimeL,
    to: &DateTimeL,
    discovery_time: &SystemTime,
) -> LogFileChain {
    build_chain_with(group, from, to, discovery_time, |_logfile, _content| {})
}

/// Build the chain for `group` and the window `[from, to)`, then call
/// `visit` for each overlapping file with its located interval and its
/// content. The content is dropped after `visit` returns.
pub fn build_chain_with<F>(
    group: &LogGroup,
    from: &DateTimeL,
    to: &DateTimeL,
    discovery_time: &SystemTime,
    mut visit: F,
) -> LogFileChain
where
    F: FnMut(&mut LogFile, &[u8]),
{
    defn!("({:?}, from {:?}, to {:?})", group.name(), from, to);
    let matcher: &TimestampMatcher = group.matcher();
    let fallback: DateTimeL = systemtime_to_datetime(&matcher.tz_offset(), discovery_time);
    let mut chain = LogFileChain::new(group.name());

    for DiscoveredFile { path, modified } in discover(group).into_iter() {
        let first_seen_dt: Option<DateTimeL> = match first_seen_file(matcher, &path, FIRST_SEEN_PREFIX_SZ) {
            Ok(val) => val,
            Err(err) => {
                chain.push_error(FileAccessError::new(&path, &err));
                continue;
            }
        };
        let logfile = match first_seen_dt {
            Some(dt) => LogFile::new(group.name(), path, modified, dt, false),
            None => {
                defo!("no timestamp in {:?}; first_seen is discovery time", path);
                LogFile::new(group.name(), path, modified, fallback, true)
            }
        };
        chain.files.push(logfile);
    }
    chain.files.sort_by(|a, b| {
        a.first_seen()
            .cmp(b.first_seen())
            .then_with(|| a.path().cmp(b.path()))
    });
    for logfile in chain.files.iter_mut() {
        let overlaps: bool = logfile.first_seen() <= to;
        logfile.set_overlaps(overlaps);
    }

    let next_first_seens: Vec<Option<DateTimeL>> = (0..chain.files.len())
        .map(|i| chain.files.get(i + 1).map(|lf| *lf.first_seen()))
        .collect();
    let mut errors = FileAccessErrors::new();
    for (logfile, next_first_seen) in chain
        .files
        .iter_mut()
        .zip(next_first_seens.iter())
    {
        if !logfile.overlaps() {
            continue;
        }
        let content: Bytes = match read_file(logfile.path()) {
            Ok(val) => val,
            Err(err) => {
                errors.push(FileAccessError::new(logfile.path(), &err));
                logfile.set_overlaps(false);
                continue;
            }
        };
        let interval = locate_interval(matcher, &content, logfile.first_seen(), next_first_seen.as_ref(), from, to);
        defo!("{:?} interval {:?}", logfile.path(), interval);
        logfile.set_interval(interval);
        visit(logfile, &content);
    }
    for error in errors.into_iter() {
        chain.push_error(error);
    }
    defx!("{} files, {} errors", chain.files.len(), chain.errors.len());

    chain
}
