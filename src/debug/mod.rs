// src/debug/mod.rs

//! The `debug` module is diagnostic printing for all builds and helpers for
//! test builds.

#[cfg(test)]
pub mod helpers;

pub mod printers;
