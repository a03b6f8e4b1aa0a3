// src/readers/helpers.rs

//! Miscellaneous helper functions for _Readers_; path conversions and
//! whole-file or byte-span reads.
//!
//! Every read opens, reads, and closes its file handle within the one call.

use crate::common::{Bytes, FPath, FileOffset, FileOpenOptions};

use std::io::{Read, Result, Seek, SeekFrom};

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Return the basename of an `FPath`.
pub fn basename(path: &FPath) -> FPath {
    match fpath_to_path(path).file_name() {
        Some(name) => name.to_string_lossy().to_string(),
        None => path.clone(),
    }
}

/// Return the parent directory of an `FPath`, or an empty `FPath`.
pub fn parent(path: &FPath) -> FPath {
    match fpath_to_path(path).parent() {
        Some(parent) => path_to_fpath(parent),
        None => FPath::new(),
    }
}

/// Helper function for a slightly annoying set of calls.
pub fn path_to_fpath(path: &std::path::Path) -> FPath {
    // `PathBuf` to `String` https://stackoverflow.com/q/37388107/471376
    (*(path.to_string_lossy())).to_string()
}

/// Helper function for completeness.
pub fn fpath_to_path(path: &FPath) -> &std::path::Path {
    std::path::Path::new(path)
}

/// Read the entire file at `path` into memory.
pub fn read_file(path: &FPath) -> Result<Bytes> {
    defn!("({:?})", path);
    let mut file = FileOpenOptions::new()
        .read(true)
        .open(fpath_to_path(path))?;
    let mut buffer: Bytes = Bytes::new();
    file.read_to_end(&mut buffer)?;
    defx!("read {} bytes", buffer.len());

    Ok(buffer)
}

/// Read the bytes of the file at `path` within `[begin, end)` by seeking to
/// `begin` and reading at most `end - begin` bytes.
///
/// A file that shrank since it was located returns fewer bytes.
pub fn read_span(
    path: &FPath,
    begin: FileOffset,
    end: FileOffset,
) -> Result<Bytes> {
    defn!("({:?}, {}, {})", path, begin, end);
    if end <= begin {
        defx!("empty span");
        return Ok(Bytes::new());
    }
    let mut file = FileOpenOptions::new()
        .read(true)
        .open(fpath_to_path(path))?;
    file.seek(SeekFrom::Start(begin as u64))?;
    let len: usize = end - begin;
    let mut buffer: Bytes = Bytes::with_capacity(len);
    file.take(len as u64).read_to_end(&mut buffer)?;
    defx!("read {} bytes", buffer.len());

    Ok(buffer)
}
