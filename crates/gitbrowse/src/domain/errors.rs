//! Domain-specific errors.

use thiserror::Error;

/// Failures surfaced by the git runner and the URL translation rules.
///
/// "Not found" outcomes (no branch contains a commit, a branch has no
/// configured remote) are expected results and are modelled as `Option`,
/// never as variants here.
#[derive(Debug, Error)]
pub enum GitError {
    #[error("git command failed: `{command}` (exit code {exit_code}): {stderr}")]
    CommandFailed {
        command: String,
        exit_code: i32,
        stderr: String,
    },

    #[error("git command timed out: `{command}`")]
    CommandTimeout { command: String },

    #[error("unsupported remote URL: {url}")]
    UnsupportedRemote { url: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
