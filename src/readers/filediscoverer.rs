// src/readers/filediscoverer.rs

//! Functions to find the files of a [`LogGroup`].
//!
//! [`LogGroup`]: crate::data::loggroup::LogGroup

use crate::common::FPath;
use crate::data::loggroup::LogGroup;
use crate::readers::helpers::path_to_fpath;

use std::path::Path;
use std::time::SystemTime;

use ::itertools::Itertools; // for `sorted_by`
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// One discovered file; path and modified time.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DiscoveredFile {
    pub path: FPath,
    pub modified: SystemTime,
}

pub type DiscoveredFiles = Vec<DiscoveredFile>;

/// Recursively walk `group.directory()` and return every file whose base name
/// fully matches the group's filename pattern, ordered by path.
///
/// A missing directory, or no matching file, returns an empty sequence.
///
/// Symbolic links are followed. `walkdir` detects a link that loops back to
/// an ancestor directory and returns it as an error entry, which is skipped.
pub fn discover(group: &LogGroup) -> DiscoveredFiles {
    defn!("({:?}, {:?})", group.name(), group.directory());
    let mut files = DiscoveredFiles::new();

    let std_path: &Path = Path::new(group.directory());
    if !std_path.exists() {
        defx!("directory does not exist, return empty");
        return files;
    }

    for entry in walkdir::WalkDir::new(group.directory().as_str())
        .follow_links(true)
        .sort_by_file_name()
    {
        let path_entry = match entry {
            Ok(val) => val,
            Err(_err) => {
                defo!("Err({:?})", _err);
                continue;
            }
        };
        if !path_entry
            .file_type()
            .is_file()
        {
            continue;
        }
        let filename = path_entry
            .file_name()
            .to_string_lossy();
        if !group.filename_matches(&filename) {
            defo!("no match {:?}", filename);
            continue;
        }
        // the file may be removed after it was listed
        let modified: SystemTime = match path_entry
            .metadata()
            .map(|m| m.modified())
        {
            Ok(Ok(val)) => val,
            Ok(Err(_err)) => {
                defo!("modified time error {:?} for {:?}", _err, path_entry.path());
                continue;
            }
            Err(_err) => {
                defo!("metadata error {:?} for {:?}", _err, path_entry.path());
                continue;
            }
        };
        let fpath: FPath = path_to_fpath(path_entry.path());
        defo!("found {:?}", fpath);
        files.push(DiscoveredFile {
            path: fpath,
            modified,
        });
    }
    let files: DiscoveredFiles = files
        .into_iter()
        .sorted_by(|a, b| a.path.cmp(&b.path))
        .collect();
    defx!("found {} files", files.len());

    files
}
