//! Depth-first discovery of regular files under a root directory.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{PngCrcError, Result};

/// Lazily yield every regular file below `root`, depth first.
///
/// Directories are skipped.  Symlinked directories are not descended into,
/// but a symlink that resolves to a regular file is yielded under its link
/// path.  Traversal errors come through as `Err` items; callers treat them
/// as fatal.
pub fn list_candidate_files(root: &Path) -> Result<impl Iterator<Item = Result<PathBuf>>> {
    if !root.is_dir() {
        return Err(PngCrcError::InvalidRoot(root.to_path_buf()));
    }
    let files = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) if e.file_type().is_file() => Some(Ok(e.into_path())),
            Ok(e) if e.path_is_symlink() && e.path().is_file() => Some(Ok(e.into_path())),
            Ok(_) => None,
            Err(err) => Some(Err(PngCrcError::from(err))),
        });
    Ok(files)
}
