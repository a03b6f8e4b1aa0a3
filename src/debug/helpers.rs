// src/debug/helpers.rs

//! Miscellaneous helper functions for testing, mostly creating log files
//! within temporary directories.

use crate::common::FPath;
use crate::readers::helpers::path_to_fpath;

use std::fs::{create_dir_all, File};
use std::io::Write; // for `File.write_all`
use std::path::PathBuf;

extern crate filetime;
use filetime::{set_file_mtime, FileTime};

extern crate si_trace_print;
use si_trace_print::{defo, defñ};

extern crate tempfile;

#[doc(hidden)]
pub use tempfile::NamedTempFile;
#[doc(hidden)]
pub use tempfile::TempDir;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// temporary file helper functions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// NamedTempFile and TempDir instances default to this name prefix.
pub const STR_TEMPFILE_PREFIX: &str = "tmp-acacia-test-";

/// Small helper function for copying `NamedTempFile` path to a `FPath`.
pub fn ntf_fpath(ntf: &NamedTempFile) -> FPath {
    path_to_fpath(ntf.path())
}

/// Testing helper function to write a `str` to a temporary file.
pub fn create_temp_file(data: &str) -> NamedTempFile {
    let mut ntf = match tempfile::Builder::new()
        .prefix(STR_TEMPFILE_PREFIX)
        .tempfile()
    {
        Ok(val) => val,
        Err(err) => {
            panic!("NamedTempFile::new() return Err {}", err);
        }
    };
    match ntf.write_all(data.as_bytes()) {
        Ok(_) => {}
        Err(err) => {
            panic!("NamedTempFile::write_all() return Err {}", err);
        }
    }

    ntf
}

/// Create a temporary directory
pub fn create_temp_dir() -> TempDir {
    defñ!();
    match tempfile::Builder::new()
        .prefix(STR_TEMPFILE_PREFIX)
        .tempdir()
    {
        Ok(val) => val,
        Err(err) => {
            panic!("tempfile::Builder::tempdir() return Err {}", err);
        }
    }
}

/// Testing helper function to write a `[u8]` to a file in a temporary directory.
/// Will create leading directories in paths, e.g. `name` value `foo/bar` creates
/// directory `foo` and file `bar`.
pub fn create_file_bytes_name_in_tmpdir(
    data: &[u8],
    name: &str,
    tempdir: &TempDir,
) -> FPath {
    let path_file: PathBuf = tempdir.path().join(name);
    if let Some(parent) = path_file.parent() {
        if let Err(err) = create_dir_all(parent) {
            panic!("create_dir_all({:?}) Error {:?}", parent, err);
        }
    }
    defo!("File::create({:?})", path_file);
    let mut file_ = match File::create(&path_file) {
        Ok(f) => f,
        Err(err) => panic!("File::create({:?}) Error {:?}", path_file, err),
    };
    if let Err(err) = file_.write_all(data) {
        panic!("write_all({:?}) Error {:?}", path_file, err);
    }

    path_to_fpath(path_file.as_path())
}

/// Testing helper to create a `TempDir` holding the passed `(name, data)`
/// files. Returned paths are in the same order as `files`.
pub fn create_files_and_tmpdir(files: &[(&str, &str)]) -> (TempDir, Vec<FPath>) {
    let tmpdir = create_temp_dir();
    let mut fpaths = Vec::<FPath>::with_capacity(files.len());
    for (name, data) in files.iter() {
        fpaths.push(create_file_bytes_name_in_tmpdir(data.as_bytes(), name, &tmpdir));
    }

    (tmpdir, fpaths)
}

/// Testing helper to set the modified time of `path` to `unix_seconds`.
pub fn set_mtime(
    path: &FPath,
    unix_seconds: i64,
) {
    if let Err(err) = set_file_mtime(path, FileTime::from_unix_time(unix_seconds, 0)) {
        panic!("set_file_mtime({:?}) Error {:?}", path, err);
    }
}

/// Return the `TempDir` path as a `FPath`.
pub fn tmpdir_fpath(tmpdir: &TempDir) -> FPath {
    path_to_fpath(tmpdir.path())
}
