// src/lib.rs

//! _acacialib_ extracts time intervals and the longest-duration records from
//! rotating, unindexed plain-text log files.
//!
//! Each configured [`LogGroup`] is a directory, a filename pattern, and a
//! timestamp pattern and format. The files of a group are ordered into a
//! [`LogFileChain`] by their first timestamp. Interval boundaries are found
//! by binary search over the raw file bytes with [`locate`]. Files are split
//! into [`Record`s] at each timestamp by [`segment`], and the longest are kept
//! by a [`TopKSelector`].
//!
//! The operations are in [`groupprocessor`]. The _acacia_ binary drives them.
//!
//! [`LogGroup`]: crate::data::loggroup::LogGroup
//! [`LogFileChain`]: crate::readers::logfilechain::LogFileChain
//! [`locate`]: crate::readers::intervallocator::locate
//! [`Record`s]: crate::data::record::Record
//! [`segment`]: crate::readers::recordsegmenter::segment
//! [`TopKSelector`]: crate::readers::topk::TopKSelector
//! [`groupprocessor`]: crate::readers::groupprocessor

pub mod common;
pub mod config;
pub mod data;
pub mod debug;
pub mod printer;
pub mod readers;
#[cfg(test)]
pub mod tests;
