// src/readers/mod.rs

//! "Readers" for _acacialib_.
//!
//! ## Overview of readers
//!
//! * A [`TimestampMatcher`] finds and parses timestamps in raw file bytes.
//! * [`discover`] finds the files of a group.
//! * [`build_chain`] orders a group's files and, with [`locate`], finds the
//!   byte interval of a time window in each file.
//! * [`segment`] splits file content into records at each timestamp.
//! * A [`TopKSelector`] keeps the longest-duration records.
//! * [`strip`] removes timestamps from file content.
//!
//! The functions in [`groupprocessor`] drive these per group.
//!
//! _These are not rust "Readers"; these do not implement the trait
//! [`Read`]. These are "readers" in an informal sense._
//!
//! [`Read`]: std::io::Read
//! [`TimestampMatcher`]: crate::readers::timestampmatcher::TimestampMatcher
//! [`discover`]: crate::readers::filediscoverer::discover
//! [`build_chain`]: crate::readers::logfilechain::build_chain
//! [`locate`]: crate::readers::intervallocator::locate
//! [`segment`]: crate::readers::recordsegmenter::segment
//! [`TopKSelector`]: crate::readers::topk::TopKSelector
//! [`strip`]: crate::readers::datestripper::strip
//! [`groupprocessor`]: crate::readers::groupprocessor

pub mod datestripper;
pub mod filediscoverer;
pub mod groupprocessor;
pub mod helpers;
pub mod intervallocator;
pub mod logfilechain;
pub mod recordsegmenter;
pub mod timestampmatcher;
pub mod topk;
