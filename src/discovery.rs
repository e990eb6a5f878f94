use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// File extension of Jen sources.
pub const SOURCE_EXTENSION: &str = "jen";

/// Recursively scans `root` for `.jen` files.
///
/// The returned list is sorted so repeated runs report files in the same
/// order. A `root` that is itself a file is returned as-is, whatever its
/// extension.
pub fn discover_sources<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>, walkdir::Error> {
    let root = root.as_ref();
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if !is_jen_file(path) {
            continue;
        }

        files.push(path.to_path_buf());
    }
    files.sort();
    Ok(files)
}

pub fn is_jen_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|extension| extension == SOURCE_EXTENSION)
}
