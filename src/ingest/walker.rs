//! Corpus tree discovery.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;

/// Every regular file below `root`, in file-name order.
///
/// Any error while enumerating, including a missing root, aborts the walk.
pub fn discover_files<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root.as_ref()).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
