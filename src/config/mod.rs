// src/config/mod.rs

//! The configuration object: the resolved, already-filtered list of
//! [`LogGroup`]s plus run-wide settings.
//!
//! A `Config` is constructed once, from a TOML file and command-line
//! overrides, and passed by reference to the readers.
//!
//! ```toml
//! top = 10
//! include = ["svc"]
//! tz_offset = "+01:00"
//! [groups.svc]
//! directory = "/var/log/svc"
//! filename_pattern = 'svc\.log(\.\d+)?'
//! timestamp_pattern = '(?m)^\d{4}-\d\d-\d\d \d\d:\d\d:\d\d'
//! timestamp_format = "%Y-%m-%d %H:%M:%S"
//! ```
//!
//! [`LogGroup`]: crate::data::loggroup::LogGroup

use crate::common::FPath;
use crate::data::datetime::{local_offset, tz_offset_parse, FixedOffset};
use crate::data::loggroup::LogGroup;

use std::collections::BTreeMap;
use std::io;

use ::serde::Deserialize;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};
use ::thiserror::Error;

/// default number of longest records reported
pub const TOP_DEFAULT: usize = 10;

/// default configuration file path
pub const CONFIG_PATH_DEFAULT: &str = "acacialog.toml";

/// default `strftime` format for printed datetimes
pub const OUTPUT_DATE_FORMAT_DEFAULT: &str = "%Y-%m-%d %H:%M:%S";

/// Fatal configuration errors. Any of these abort the run before a log file
/// is read.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read configuration file {path:?}: {source}")]
    ConfigFile {
        path: FPath,
        #[source]
        source: io::Error,
    },
    #[error("cannot parse configuration file {path:?}: {source}")]
    ConfigParse {
        path: FPath,
        #[source]
        source: toml::de::Error,
    },
    #[error("group {0:?} is not defined")]
    UnknownGroup(String),
    #[error("no log groups selected")]
    NoGroups,
    #[error("top must be at least 1, got {0}")]
    TopK(usize),
    #[error("group {group:?}: invalid filename_pattern: {source}")]
    FilenamePattern {
        group: String,
        #[source]
        source: regex::Error,
    },
    #[error("group {group:?}: invalid timestamp_pattern: {source}")]
    TimestampPattern {
        group: String,
        #[source]
        source: regex::Error,
    },
    #[error("group {group:?}: invalid timestamp_format {format:?}")]
    TimestampFormat { group: String, format: String },
    #[error("invalid timezone offset {0:?}")]
    TzOffset(String),
    #[error("interval start {0} is after interval end {1}")]
    IntervalReversed(String, String),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// configuration file
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One `[groups.NAME]` table.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GroupConfig {
    pub directory: FPath,
    pub filename_pattern: String,
    pub timestamp_pattern: String,
    pub timestamp_format: String,
    #[serde(default)]
    pub timestamp_template: Option<String>,
}

/// The configuration file as written, before validation.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub top: Option<usize>,
    #[serde(default)]
    pub include: Option<Vec<String>>,
    #[serde(default)]
    pub exclude: Option<Vec<String>>,
    #[serde(default)]
    pub tz_offset: Option<String>,
    #[serde(default)]
    pub output_date_format: Option<String>,
    /// ordered by group name
    #[serde(default)]
    pub groups: BTreeMap<String, GroupConfig>,
}

impl ConfigFile {
    /// Parse configuration text. `path` is used only in the error.
    pub fn parse(
        text: &str,
        path: &FPath,
    ) -> Result<ConfigFile, ConfigError> {
        toml::from_str::<ConfigFile>(text).map_err(|source| ConfigError::ConfigParse {
            path: path.clone(),
            source,
        })
    }

    /// Read and parse the configuration file at `path`.
    pub fn from_path(path: &FPath) -> Result<ConfigFile, ConfigError> {
        defn!("({:?})", path);
        let text: String = match std::fs::read_to_string(path) {
            Ok(val) => val,
            Err(source) => {
                defx!("read error {}", source);
                return Err(ConfigError::ConfigFile {
                    path: path.clone(),
                    source,
                });
            }
        };
        let cf = ConfigFile::parse(text.as_str(), path);
        defx!("{:?}", cf.as_ref().map(|cf| cf.groups.len()));

        cf
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Settings passed on the command-line; each one takes precedence over the
/// configuration file.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub include: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub top: Option<usize>,
    pub tz_offset: Option<FixedOffset>,
}

/// The resolved configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// selected groups, ordered by name
    pub groups: Vec<LogGroup>,
    /// number of longest records to report, at least 1
    pub top: usize,
    /// applied to timestamps whose format has no offset
    pub tz_offset: FixedOffset,
    pub output_date_format: String,
}

/// Validate the number of longest records to report.
pub fn validate_top(top: usize) -> Result<usize, ConfigError> {
    if top < 1 {
        return Err(ConfigError::TopK(top));
    }

    Ok(top)
}

/// Select group names.
///
/// `cli_include` overrides `file_include`; without either every group is
/// selected. `cli_exclude` is always applied; `file_exclude` only when there
/// is no `cli_include`. Every name in an include or exclude list must be
/// defined. Returned names keep the order of `all`.
pub fn select_groups(
    all: &[String],
    file_include: Option<&[String]>,
    file_exclude: Option<&[String]>,
    cli_include: Option<&[String]>,
    cli_exclude: Option<&[String]>,
) -> Result<Vec<String>, ConfigError> {
    defn!("(all {:?})", all);
    for name in [file_include, file_exclude, cli_include, cli_exclude]
        .into_iter()
        .flatten()
        .flatten()
    {
        if !all.contains(name) {
            defx!("unknown group {:?}", name);
            return Err(ConfigError::UnknownGroup(name.clone()));
        }
    }
    let include: Option<&[String]> = cli_include.or(file_include);
    let mut exclude: Vec<&String> = Vec::new();
    if let Some(names) = cli_exclude {
        exclude.extend(names.iter());
    }
    if cli_include.is_none() {
        if let Some(names) = file_exclude {
            exclude.extend(names.iter());
        }
    }
    let selected: Vec<String> = all
        .iter()
        .filter(|name| match include {
            Some(names) => names.contains(name),
            None => true,
        })
        .filter(|name| !exclude.contains(name))
        .cloned()
        .collect();
    defx!("selected {:?}", selected);

    Ok(selected)
}

impl Config {
    /// Resolve a parsed configuration file and command-line overrides into a
    /// `Config`, compiling every selected group.
    pub fn new(
        file: &ConfigFile,
        overrides: &ConfigOverrides,
    ) -> Result<Config, ConfigError> {
        defn!();
        let top: usize = validate_top(overrides.top.or(file.top).unwrap_or(TOP_DEFAULT))?;
        let tz_offset: FixedOffset = match (overrides.tz_offset, file.tz_offset.as_ref()) {
            (Some(tz), _) => tz,
            (None, Some(tz_s)) => match tz_offset_parse(tz_s) {
                Some(tz) => tz,
                None => {
                    defx!("bad tz_offset {:?}", tz_s);
                    return Err(ConfigError::TzOffset(tz_s.clone()));
                }
            },
            (None, None) => local_offset(),
        };
        let all: Vec<String> = file.groups.keys().cloned().collect();
        let names: Vec<String> = select_groups(
            &all,
            file.include.as_deref(),
            file.exclude.as_deref(),
            overrides.include.as_deref(),
            overrides.exclude.as_deref(),
        )?;
        if names.is_empty() {
            defx!("no groups");
            return Err(ConfigError::NoGroups);
        }
        let mut groups: Vec<LogGroup> = Vec::with_capacity(names.len());
        for name in names.iter() {
            // `names` is a subset of `file.groups` keys
            let gc: &GroupConfig = match file.groups.get(name) {
                Some(gc) => gc,
                None => return Err(ConfigError::UnknownGroup(name.clone())),
            };
            groups.push(LogGroup::new(
                name,
                &gc.directory,
                &gc.filename_pattern,
                &gc.timestamp_pattern,
                &gc.timestamp_format,
                gc.timestamp_template.as_deref(),
                tz_offset,
            )?);
        }
        let output_date_format: String = file
            .output_date_format
            .clone()
            .unwrap_or_else(|| String::from(OUTPUT_DATE_FORMAT_DEFAULT));
        defx!("{} groups, top {}, tz_offset {}", groups.len(), top, tz_offset);

        Ok(Config {
            groups,
            top,
            tz_offset,
            output_date_format,
        })
    }
}
