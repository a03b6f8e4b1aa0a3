// src/readers/groupprocessor.rs

//! The operations run over the selected [`LogGroup`s]: list the newest file
//! of each group, locate and extract an interval, rank the longest records,
//! and strip timestamps.
//!
//! Interval location and record ranking run one thread per group. Each
//! thread builds its group's [`LogFileChain`], segmenting each overlapping
//! file into records if needed, and sends the chain over a channel. The
//! calling thread is the only reader of the channel and the only writer of
//! the [`TopKSelector`]. Chains are offered in group order whatever order
//! the threads finish in.
//!
//! Per-file read failures never abort an operation. They are returned with
//! the results as [`FileAccessError`s].
//!
//! [`LogGroup`s]: crate::data::loggroup::LogGroup
//! [`LogFileChain`]: crate::readers::logfilechain::LogFileChain
//! [`TopKSelector`]: crate::readers::topk::TopKSelector
//! [`FileAccessError`s]: crate::common::FileAccessError

use crate::common::{Bytes, FPath, FileAccessError, FileAccessErrors};
use crate::config::ConfigError;
use crate::data::datetime::{datetime_max, datetime_min, DateTimeL, DateTimeLOpt};
use crate::data::logfile::Interval;
use crate::data::loggroup::LogGroup;
use crate::data::record::{RankedRecord, RankedRecords, Records};
use crate::readers::datestripper::strip;
use crate::readers::filediscoverer::{discover, DiscoveredFile};
use crate::readers::helpers::{read_file, read_span};
use crate::readers::logfilechain::{build_chain_with, LogFileChain};
use crate::readers::recordsegmenter::segment_span;
use crate::readers::topk::TopKSelector;
use crate::{de_err, e_err, e_wrn};

use std::thread;
use std::time::SystemTime;

use ::crossbeam_channel;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// result types
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The most recently modified file of a group, or `None` if the group has no
/// file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LastFile {
    pub group: String,
    pub filename_pattern: String,
    pub file: Option<DiscoveredFile>,
}

pub type LastFiles = Vec<LastFile>;

/// The text of one file's located interval.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IntervalText {
    pub group: String,
    pub path: FPath,
    pub interval: Interval,
    pub text: Bytes,
}

/// Results of [`extract_interval_text`].
#[derive(Debug, Default)]
pub struct IntervalTexts {
    pub blocks: Vec<IntervalText>,
    pub errors: FileAccessErrors,
}

/// Results of [`rank_longest_records`].
#[derive(Debug, Default)]
pub struct RankedResult {
    /// duration descending
    pub records: RankedRecords,
    pub errors: FileAccessErrors,
}

/// One file with its timestamps removed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StrippedFile {
    pub group: String,
    pub path: FPath,
    pub text: Bytes,
}

/// Results of [`strip_dates`].
#[derive(Debug, Default)]
pub struct StrippedFiles {
    pub files: Vec<StrippedFile>,
    pub errors: FileAccessErrors,
}

/// A window start after its end is a [`ConfigError`].
pub fn check_interval(
    from: &DateTimeL,
    to: &DateTimeL,
) -> Result<(), ConfigError> {
    if from > to {
        return Err(ConfigError::IntervalReversed(from.to_rfc3339(), to.to_rfc3339()));
    }

    Ok(())
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// list last files
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// For each group, find the most recently modified file. On equal modified
/// times the greater path is chosen.
pub fn list_last_files(groups: &[LogGroup]) -> LastFiles {
    defn!("({} groups)", groups.len());
    let lastfiles: LastFiles = groups
        .iter()
        .map(|group| LastFile {
            group: String::from(group.name()),
            filename_pattern: String::from(group.filename_pattern()),
            file: discover(group)
                .into_iter()
                .max_by(|a, b| {
                    a.modified
                        .cmp(&b.modified)
                        .then_with(|| a.path.cmp(&b.path))
                }),
        })
        .collect();
    defx!();

    lastfiles
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// group worker threads
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Data sent from a group worker thread to the calling thread; the group's
/// index and its finished chain.
type ChanDatum = (usize, LogFileChain);
type ChanSendDatum = crossbeam_channel::Sender<ChanDatum>;
type ChanRecvDatum = crossbeam_channel::Receiver<ChanDatum>;

/// capacity of the channel shared by the group worker threads
const CHANNEL_CAPACITY: usize = 32;

/// Thread entry point; build the chain for one group. If `segment_records`
/// then segment each overlapping file's interval into the file's records.
fn exec_group_worker(
    chan_send: ChanSendDatum,
    index: usize,
    group: &LogGroup,
    from: DateTimeL,
    to: DateTimeL,
    discovery_time: SystemTime,
    segment_records: bool,
) {
    defn!("({}, {:?})", index, group.name());
    let chain = build_chain_with(group, &from, &to, &discovery_time, |logfile, content| {
        if !segment_records {
            return;
        }
        let interval: Interval = logfile.interval();
        let records: Records = segment_span(group.matcher(), logfile.id(), content, interval.from(), interval.to());
        defo!("{:?} {} records", logfile.path(), records.len());
        logfile.set_records(records);
    });
    if let Err(_err) = chan_send.send((index, chain)) {
        de_err!("chan_send.send({}) failed {}", index, _err);
    }
    defx!("({}, {:?})", index, group.name());
}

/// Pass each buffered chain from `next` onward to `receive_chain`, in group
/// order, stopping at the first group whose chain has not arrived. Groups
/// marked not `expected` are skipped.
pub(crate) fn flush_chains<F>(
    chains: &mut [Option<LogFileChain>],
    expected: &[bool],
    next: &mut usize,
    receive_chain: &mut F,
) where
    F: FnMut(&mut LogFileChain),
{
    while *next < chains.len() {
        if !expected[*next] {
            *next += 1;
            continue;
        }
        match chains[*next].as_mut() {
            Some(chain) => {
                defo!("flush chain {} {:?}", *next, chain.group());
                receive_chain(chain);
                *next += 1;
            }
            None => break,
        }
    }
}

/// Run one worker thread per group and pass every chain to `receive_chain`
/// on the calling thread, in group order. A chain that arrives before the
/// chains of earlier groups is held until they arrive, so the order seen by
/// `receive_chain` does not depend on which thread finishes first.
///
/// Returns one chain per group, in group order. A group whose thread could
/// not be started has an empty chain.
fn run_group_workers<F>(
    groups: &[LogGroup],
    from: DateTimeL,
    to: DateTimeL,
    segment_records: bool,
    mut receive_chain: F,
) -> Vec<LogFileChain>
where
    F: FnMut(&mut LogFileChain),
{
    defn!("({} groups, segment_records {})", groups.len(), segment_records);
    let discovery_time: SystemTime = SystemTime::now();
    let (chan_send, chan_recv): (ChanSendDatum, ChanRecvDatum) = crossbeam_channel::bounded(CHANNEL_CAPACITY);
    let mut chains: Vec<Option<LogFileChain>> = groups
        .iter()
        .map(|_| None)
        .collect();
    let mut expected: Vec<bool> = vec![false; groups.len()];
    let mut next: usize = 0;

    thread::scope(|scope| {
        for (index, group) in groups.iter().enumerate() {
            let chan_send_thread: ChanSendDatum = chan_send.clone();
            match thread::Builder::new()
                .name(String::from(group.name()))
                .spawn_scoped(scope, move || {
                    exec_group_worker(chan_send_thread, index, group, from, to, discovery_time, segment_records)
                }) {
                Ok(_joinhandle) => {
                    defo!("spawned thread for group {:?}", group.name());
                    expected[index] = true;
                }
                Err(err) => {
                    e_err!("thread.name({:?}).spawn() failed {}", group.name(), err);
                }
            }
        }
        // the receive loop ends when every thread has dropped its sender
        drop(chan_send);
        while let Ok((index, chain)) = chan_recv.recv() {
            defo!("received chain {} {:?} with {} files", index, chain.group(), chain.files().len());
            chains[index] = Some(chain);
            flush_chains(&mut chains, &expected, &mut next, &mut receive_chain);
        }
    });
    // skip trailing groups whose thread was not started
    flush_chains(&mut chains, &expected, &mut next, &mut receive_chain);
    debug_assert_eq!(next, chains.len(), "chains not passed to receive_chain");

    let chains: Vec<LogFileChain> = chains
        .into_iter()
        .zip(groups.iter())
        .map(|(chain, group)| chain.unwrap_or_else(|| LogFileChain::new(group.name())))
        .collect();
    defx!();

    chains
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// interval
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// For each group, build its chain and locate `[from, to)` in each
/// overlapping file. One chain per group, in group order.
///
/// A group with no overlapping file has an empty chain.
pub fn locate_interval(
    groups: &[LogGroup],
    from: &DateTimeL,
    to: &DateTimeL,
) -> Result<Vec<LogFileChain>, ConfigError> {
    check_interval(from, to)?;

    Ok(run_group_workers(groups, *from, *to, false, |_chain| {}))
}

/// Read the located interval of every overlapping file. Files with an empty
/// interval are skipped.
pub fn extract_interval_text(chains: &[LogFileChain]) -> IntervalTexts {
    defn!("({} chains)", chains.len());
    let mut texts = IntervalTexts::default();
    for chain in chains.iter() {
        for logfile in chain.overlapping() {
            let interval: Interval = logfile.interval();
            if interval.is_empty() {
                continue;
            }
            match read_span(logfile.path(), interval.from(), interval.to()) {
                Ok(text) => {
                    texts.blocks.push(IntervalText {
                        group: String::from(chain.group()),
                        path: logfile.path().clone(),
                        interval,
                        text,
                    });
                }
                Err(err) => {
                    let error = FileAccessError::new(logfile.path(), &err);
                    e_wrn!("{}", error);
                    texts.errors.push(error);
                }
            }
        }
    }
    defx!("{} blocks", texts.blocks.len());

    texts
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// longest records
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Find the `top` longest-duration records across every file of every group.
///
/// With `from` or `to` only the records within each file's located interval
/// are considered. Each record's content is read back from its file; a record
/// whose file can no longer be read is dropped and the failure returned in
/// [`RankedResult::errors`].
pub fn rank_longest_records(
    groups: &[LogGroup],
    top: usize,
    from: &DateTimeLOpt,
    to: &DateTimeLOpt,
) -> Result<RankedResult, ConfigError> {
    defn!("({} groups, top {}, from {:?}, to {:?})", groups.len(), top, from, to);
    let mut topk = TopKSelector::new(top)?;
    let from: DateTimeL = from.unwrap_or_else(datetime_min);
    let to: DateTimeL = to.unwrap_or_else(datetime_max);
    check_interval(&from, &to)?;

    let chains: Vec<LogFileChain> = run_group_workers(groups, from, to, true, |chain| {
        for logfile in chain.files_mut().iter_mut() {
            topk.offer_all(logfile.take_records());
        }
    });
    let mut result = RankedResult::default();
    for chain in chains.into_iter() {
        let (_files, errors) = chain.into_parts();
        result.errors.extend(errors);
    }
    for record in topk.into_results().into_iter() {
        match read_span(record.path(), record.begin(), record.end()) {
            Ok(content) => {
                result.records.push(RankedRecord {
                    duration: record.duration(),
                    group: String::from(record.group()),
                    path: record.path().clone(),
                    dt: *record.dt(),
                    begin: record.begin(),
                    end: record.end(),
                    content,
                });
            }
            Err(err) => {
                let error = FileAccessError::new(record.path(), &err);
                e_wrn!("{}", error);
                result.errors.push(error);
            }
        }
    }
    defx!("{} records, {} errors", result.records.len(), result.errors.len());

    Ok(result)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// strip dates
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Remove the timestamps from every file of every group. Files are in group
/// order, then path order.
pub fn strip_dates(groups: &[LogGroup]) -> StrippedFiles {
    defn!("({} groups)", groups.len());
    let mut stripped = StrippedFiles::default();
    for group in groups.iter() {
        for DiscoveredFile { path, .. } in discover(group).into_iter() {
            match read_file(&path) {
                Ok(content) => {
                    let text: Bytes = strip(group.matcher(), &content);
                    stripped.files.push(StrippedFile {
                        group: String::from(group.name()),
                        path,
                        text,
                    });
                }
                Err(err) => {
                    let error = FileAccessError::new(&path, &err);
                    e_wrn!("{}", error);
                    stripped.errors.push(error);
                }
            }
        }
    }
    defx!("{} files", stripped.files.len());

    stripped
}
