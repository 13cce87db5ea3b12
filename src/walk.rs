use crate::error::Error;
use log::{debug, error};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Lists every non-directory entry below `root`, relative to `root`.
///
/// Entries come back sorted by path so repeated runs see the same order.
/// Any traversal error aborts the walk; no partial list is returned.
pub fn enumerate(root: &Path) -> Result<Vec<PathBuf>, Error> {
    let metadata = std::fs::metadata(root).map_err(|e| {
        error!("Failed to read template root: {:?}", root);
        Error::io(root, e)
    })?;
    if !metadata.is_dir() {
        error!("Template root is not a directory: {:?}", root);
        return Err(Error::io(
            root,
            std::io::Error::other("template root is not a directory"),
        ));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            error!("Failed to read directory entry: {:?}", path);
            Error::io(path, e.into())
        })?;
        if entry.file_type().is_dir() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(|_| {
                Error::io(
                    entry.path(),
                    std::io::Error::other("entry escapes template root"),
                )
            })?
            .to_path_buf();
        files.push(relative);
    }

    files.sort();
    debug!("Found {} template files under {:?}", files.len(), root);
    Ok(files)
}
