// src/printer/printers.rs

//! Specialized printer struct [`PrinterResults`] and helper functions for
//! printing the results of the [`groupprocessor`] operations.
//!
//! Byte-oriented printing; interval text, record content, and stripped files
//! are written exactly as read.
//!
//! [`PrinterResults`]: self::PrinterResults
//! [`groupprocessor`]: crate::readers::groupprocessor

use crate::common::NLu8;
use crate::data::datetime::{systemtime_to_datetime, DateTimeL, Duration, FixedOffset};
use crate::data::record::RankedRecord;
use crate::debug::printers::de_err;
use crate::readers::groupprocessor::{IntervalText, LastFile, StrippedFile};
use crate::readers::helpers::{basename, parent};
use crate::readers::logfilechain::LogFileChain;

use std::io::{Result, Write};

#[doc(hidden)]
pub use ::termcolor::{Color, ColorChoice, ColorSpec, WriteColor};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// globals and constants
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// [`Color`] for printing "not found" markers.
///
/// [`Color`]: https://docs.rs/termcolor/1.4.1/termcolor/enum.Color.html
pub const COLOR_ERROR: Color = Color::Red;

/// [`Color`] for printing record durations.
pub const COLOR_DURATION: Color = Color::Yellow;

/// A preselection of [`Color`s] for printing group names, one per group.
/// Chosen for a dark background console.
///
/// [`Color`s]: https://docs.rs/termcolor/1.4.1/termcolor/enum.Color.html
pub const COLORS_GROUP: [Color; 8] = [
    Color::Cyan,
    Color::Green,
    Color::Magenta,
    Color::Yellow,
    Color::Rgb(153, 153, 255),
    Color::Rgb(255, 153, 51),
    Color::Rgb(102, 204, 0),
    Color::Rgb(255, 102, 178),
];

/// printed for a group without a matching file
pub const NO_LOG_FILE_FOUND: &str = "NO_LOG_FILE_FOUND";
/// printed for a group without a file overlapping the interval
pub const NO_FILES_IN_INTERVAL: &str = "NO_FILES_IN_INTERVAL";
/// printed when no record was ranked
pub const NO_LOG_RECORDS_FOUND: &str = "NO_LOG_RECORDS_FOUND";

/// Return the group name color for the group at `index`.
pub fn color_group(index: usize) -> Color {
    COLORS_GROUP[index % COLORS_GROUP.len()]
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// formatting
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Format a duration as `[-]HH:MM:SS.mmm`. Hours are not limited to two
/// digits.
pub fn duration_to_string(duration: &Duration) -> String {
    let sign: &str = if *duration < Duration::zero() { "-" } else { "" };
    let ms: i64 = duration.num_milliseconds().abs();
    let hours: i64 = ms / 3_600_000;
    let minutes: i64 = (ms / 60_000) % 60;
    let seconds: i64 = (ms / 1_000) % 60;
    let millis: i64 = ms % 1_000;

    format!("{}{:02}:{:02}:{:02}.{:03}", sign, hours, minutes, seconds, millis)
}

/// Format `dt` with `strftime` pattern `format`.
pub fn datetime_to_string(
    dt: &DateTimeL,
    format: &str,
) -> String {
    dt.format(format).to_string()
}

/// Format one line of the last-files listing, without the line ending;
/// `GROUP DATETIME FILENAME PARENT` or `GROUP NO_LOG_FILE_FOUND PATTERN`.
pub fn last_file_to_string(
    lastfile: &LastFile,
    tz_offset: &FixedOffset,
    date_format: &str,
) -> String {
    match &lastfile.file {
        Some(file) => {
            let dt: DateTimeL = systemtime_to_datetime(tz_offset, &file.modified);
            format!(
                "{} {} {} {}",
                lastfile.group,
                datetime_to_string(&dt, date_format),
                basename(&file.path),
                parent(&file.path),
            )
        }
        None => format!("{} {} {}", lastfile.group, NO_LOG_FILE_FOUND, lastfile.filename_pattern),
    }
}

/// Format the interval header of a chain, without the line ending;
/// `GROUP NO_FILES_IN_INTERVAL`, `GROUP FIRST`, or `GROUP FIRST ... LAST`
/// where `FIRST` and `LAST` are the file names of the first and last files
/// with a non-empty interval.
pub fn interval_header_to_string(chain: &LogFileChain) -> String {
    let mut names = chain
        .overlapping()
        .filter(|logfile| !logfile.interval().is_empty())
        .map(|logfile| basename(logfile.path()));
    let first = names.next();
    let last = names.last();
    match (first, last) {
        (None, _) => format!("{} {}", chain.group(), NO_FILES_IN_INTERVAL),
        (Some(first), None) => format!("{} {}", chain.group(), first),
        (Some(first), Some(last)) => format!("{} {} ... {}", chain.group(), first, last),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// PrinterResults
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Prints operation results to stdout, coloring group names, durations, and
/// markers when the `ColorChoice` allows.
pub struct PrinterResults {
    stdout_color: termcolor::StandardStream,
    tz_offset: FixedOffset,
    date_format: String,
}

impl PrinterResults {
    pub fn new(
        color_choice: ColorChoice,
        tz_offset: FixedOffset,
        date_format: String,
    ) -> PrinterResults {
        PrinterResults {
            stdout_color: termcolor::StandardStream::stdout(color_choice),
            tz_offset,
            date_format,
        }
    }

    /// Write `value` in `color`, then reset the color.
    fn write_colored(
        &mut self,
        color: Color,
        value: &[u8],
    ) -> Result<()> {
        if let Err(err) = self
            .stdout_color
            .set_color(ColorSpec::new().set_fg(Some(color)))
        {
            de_err!("set_color({:?}) returned error {}", color, err);
            return Err(err);
        }
        self.stdout_color.write_all(value)?;
        self.stdout_color.reset()
    }

    fn write_plain(
        &mut self,
        value: &[u8],
    ) -> Result<()> {
        self.stdout_color.write_all(value)
    }

    /// Print one line per group; the group's most recently modified file.
    pub fn print_last_files(
        &mut self,
        lastfiles: &[LastFile],
    ) -> Result<()> {
        for (index, lastfile) in lastfiles.iter().enumerate() {
            self.write_colored(color_group(index), lastfile.group.as_bytes())?;
            match &lastfile.file {
                Some(_file) => {
                    let line: String = last_file_to_string(lastfile, &self.tz_offset, self.date_format.as_str());
                    // the group name is the line's first word
                    self.write_plain(line[lastfile.group.len()..].as_bytes())?;
                }
                None => {
                    self.write_plain(b" ")?;
                    self.write_colored(COLOR_ERROR, NO_LOG_FILE_FOUND.as_bytes())?;
                    let line: String = format!(" {}", lastfile.filename_pattern);
                    self.write_plain(line.as_bytes())?;
                }
            }
            self.write_plain(&[NLu8])?;
        }
        self.stdout_color.flush()
    }

    /// Print each chain's header followed by its interval text blocks.
    pub fn print_intervals(
        &mut self,
        chains: &[LogFileChain],
        blocks: &[IntervalText],
    ) -> Result<()> {
        for (index, chain) in chains.iter().enumerate() {
            let header: String = interval_header_to_string(chain);
            // the group name is the header's first word
            let rest: &str = &header[chain.group().len()..];
            self.write_colored(color_group(index), chain.group().as_bytes())?;
            if chain.is_empty() {
                self.write_plain(b" ")?;
                self.write_colored(COLOR_ERROR, NO_FILES_IN_INTERVAL.as_bytes())?;
            } else {
                self.write_plain(rest.as_bytes())?;
            }
            self.write_plain(&[NLu8])?;
            for block in blocks
                .iter()
                .filter(|block| block.group == chain.group())
            {
                self.write_plain(&block.text)?;
            }
        }
        self.stdout_color.flush()
    }

    /// Print ranked records; `DURATION GROUP CONTENT` each.
    pub fn print_ranked(
        &mut self,
        records: &[RankedRecord],
        group_names: &[String],
    ) -> Result<()> {
        if records.is_empty() {
            self.write_colored(COLOR_ERROR, NO_LOG_RECORDS_FOUND.as_bytes())?;
            self.write_plain(&[NLu8])?;
            return self.stdout_color.flush();
        }
        for record in records.iter() {
            let index: usize = group_names
                .iter()
                .position(|name| name == &record.group)
                .unwrap_or_default();
            self.write_colored(COLOR_DURATION, duration_to_string(&record.duration).as_bytes())?;
            self.write_plain(b" ")?;
            self.write_colored(color_group(index), record.group.as_bytes())?;
            self.write_plain(b" ")?;
            self.write_plain(&record.content)?;
            if record.content.last() != Some(&NLu8) {
                self.write_plain(&[NLu8])?;
            }
        }
        self.stdout_color.flush()
    }

    /// Print the stripped text of every file.
    pub fn print_stripped(
        &mut self,
        files: &[StrippedFile],
    ) -> Result<()> {
        for file in files.iter() {
            self.write_plain(&file.text)?;
        }
        self.stdout_color.flush()
    }
}
