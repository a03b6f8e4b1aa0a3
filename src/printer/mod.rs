// src/printer/mod.rs

//! The `printer` module is for printing user-facing results (last files,
//! interval text, ranked records, stripped files) with color for group
//! names, durations, and "not found" markers.

pub mod printers;
