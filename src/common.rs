// src/common.rs

//! Common imports, type aliases, and other globals for _acacialib_.

use std::fmt;
#[doc(hidden)]
pub use std::fs::File;
#[doc(hidden)]
pub use std::path::Path;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// file-handling
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

// TODO: use `std::path::PathBuf` for `FPath`
/// `F`ake `Path` or `F`ile `Path`
pub type FPath = String;
pub type FileOpenOptions = std::fs::OpenOptions;

/// Offset into the bytes of a file.
///
/// Files are read whole into memory so an offset is also an index into that
/// buffer.
pub type FileOffset = usize;

/// A general-purpose counting type, typically used for statistics and
/// arrival sequence numbers.
pub type Count = u64;

/// Sequence of Bytes
pub type Bytes = Vec<u8>;

/// Single-byte newLine char as u8
#[allow(non_upper_case_globals)]
pub const NLu8: u8 = 10;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// per-file errors
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A file could not be read between discovery and use (it was removed,
/// permissions changed, etc.).
///
/// Recoverable. The file is skipped and processing of its group continues.
/// Annoyingly, cannot [Clone `std::io::Error`] so the message is kept as a
/// `String`.
///
/// [Clone `std::io::Error`]: https://github.com/rust-lang/rust/issues/24135
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FileAccessError {
    pub path: FPath,
    pub kind: std::io::ErrorKind,
    pub message: String,
}

impl FileAccessError {
    pub fn new(
        path: &FPath,
        err: &std::io::Error,
    ) -> FileAccessError {
        FileAccessError {
            path: path.clone(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for FileAccessError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        write!(f, "{:?}: {}", self.path, self.message)
    }
}

pub type FileAccessErrors = Vec<FileAccessError>;
