// src/data/loggroup.rs

//! Implements a [`LogGroup`], one configured category of log files.
//!
//! [`LogGroup`]: self::LogGroup

use crate::common::FPath;
use crate::config::ConfigError;
use crate::data::datetime::FixedOffset;
use crate::readers::timestampmatcher::{TimestampMatcher, TimestampMatcherError};

use ::regex::Regex;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// A named category of log files sharing a directory, a filename pattern,
/// and a timestamp format.
///
/// Immutable once created.
#[derive(Clone, Debug)]
pub struct LogGroup {
    name: String,
    directory: FPath,
    /// user-passed filename pattern, as configured
    filename_pattern: String,
    /// `filename_pattern` anchored for full-match semantics
    filename_regex: Regex,
    matcher: TimestampMatcher,
}

impl LogGroup {
    /// Create a new `LogGroup`, compiling all patterns.
    ///
    /// Any pattern or format that fails to compile is a [`ConfigError`].
    pub fn new(
        name: &str,
        directory: &FPath,
        filename_pattern: &str,
        timestamp_pattern: &str,
        timestamp_format: &str,
        timestamp_template: Option<&str>,
        tz_offset: FixedOffset,
    ) -> Result<LogGroup, ConfigError> {
        defn!("({:?}, {:?}, {:?}, {:?}, {:?})", name, directory, filename_pattern, timestamp_pattern, timestamp_format);
        let anchored: String = format!("^(?:{})$", filename_pattern);
        let filename_regex = match Regex::new(anchored.as_str()) {
            Ok(val) => val,
            Err(err) => {
                defx!("filename pattern error {}", err);
                return Err(ConfigError::FilenamePattern {
                    group: String::from(name),
                    source: err,
                });
            }
        };
        let matcher = match TimestampMatcher::new(timestamp_pattern, timestamp_format, timestamp_template, tz_offset) {
            Ok(val) => val,
            Err(TimestampMatcherError::Regex(err)) => {
                defx!("timestamp pattern error {}", err);
                return Err(ConfigError::TimestampPattern {
                    group: String::from(name),
                    source: err,
                });
            }
            Err(TimestampMatcherError::Format(format)) => {
                defx!("timestamp format error {:?}", format);
                return Err(ConfigError::TimestampFormat {
                    group: String::from(name),
                    format,
                });
            }
        };
        defx!();

        Ok(LogGroup {
            name: String::from(name),
            directory: directory.clone(),
            filename_pattern: String::from(filename_pattern),
            filename_regex,
            matcher,
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub const fn directory(&self) -> &FPath {
        &self.directory
    }

    pub fn filename_pattern(&self) -> &str {
        self.filename_pattern.as_str()
    }

    pub const fn matcher(&self) -> &TimestampMatcher {
        &self.matcher
    }

    /// Does the file base name fully match this group's filename pattern?
    pub fn filename_matches(
        &self,
        filename: &str,
    ) -> bool {
        self.filename_regex
            .is_match(filename)
    }
}
