// src/data/mod.rs

//! The `data` module is data containers for [`LogGroup`]s, [`LogFile`]s,
//! and [`Record`]s.
//!
//! ## Definitions of data
//!
//! #### LogGroup
//!
//! A "log group" is a named category of log files sharing a directory, a
//! filename pattern, and a timestamp pattern and format.
//!
//! #### LogFile
//!
//! A "log file" is one file of a log group. Its "first seen" instant is the
//! instant of its first timestamp. The files of a group ordered by first
//! seen instant are its "chain", one timeline across rotations.
//!
//! #### Interval
//!
//! An "interval" is a byte span `[from, to)` of one log file holding the
//! records of a requested time window.
//!
//! #### Record
//!
//! A "record" is the text from one timestamp to the next timestamp (or the
//! end of the file) within one log file. Its "duration" is the time since the
//! previous record of the same file.
//!
//! [`LogGroup`]: crate::data::loggroup::LogGroup
//! [`LogFile`]: crate::data::logfile::LogFile
//! [`Record`]: crate::data::record::Record

pub mod datetime;
pub mod logfile;
pub mod loggroup;
pub mod record;
