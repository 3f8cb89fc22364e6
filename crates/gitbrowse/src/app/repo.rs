//! Repository location relative to a file on disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::errors::GitError;
use crate::infra::shell::GitRunner;

/// Root directory of the working copy containing `path`.
///
/// Fails when `path` is not inside any git repository; the runner's
/// `CommandFailed` carries git's own diagnostic.
pub fn top_level(runner: &GitRunner, path: &Path) -> Result<PathBuf, GitError> {
    let root = runner.run(path, &["rev-parse", "--show-toplevel"])?;
    Ok(PathBuf::from(root))
}

/// `path` expressed relative to its repository root.
///
/// Both sides are canonicalized before comparison so symlinked locations
/// (e.g. `/tmp` on macOS) line up with the root git reports.
pub fn relative_path(runner: &GitRunner, path: &Path) -> Result<PathBuf, GitError> {
    let root = fs::canonicalize(top_level(runner, path)?)?;
    let full = fs::canonicalize(path)?;
    match full.strip_prefix(&root) {
        Ok(rel) => Ok(rel.to_path_buf()),
        Err(_) => Ok(full),
    }
}
