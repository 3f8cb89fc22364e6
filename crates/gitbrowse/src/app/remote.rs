//! Remote URL resolution for a branch.

use std::path::Path;

use crate::domain::errors::GitError;
use crate::infra::shell::GitRunner;

/// The remote URL to browse for `branch`, or `None` when the branch has no
/// configured remote.
///
/// With exactly one remote defined its URL is returned directly; per-branch
/// lookup only matters when several remotes could apply. `None` tells the
/// caller to fall back to the commit-branch search and retry.
pub fn remote_url_for_branch(
    runner: &GitRunner,
    path: &Path,
    branch: &str,
) -> Result<Option<String>, GitError> {
    let remotes = remote_names(runner, path)?;
    if let [only] = remotes.as_slice() {
        return remote_url(runner, path, only);
    }

    match branch_remote_name(runner, path, branch)? {
        Some(remote) => remote_url(runner, path, &remote),
        None => Ok(None),
    }
}

/// Names of all configured remotes.
pub fn remote_names(runner: &GitRunner, path: &Path) -> Result<Vec<String>, GitError> {
    let raw = runner.run(path, &["remote", "show"])?;
    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// The configured URL of `remote`, or `None` when unset.
pub fn remote_url(
    runner: &GitRunner,
    path: &Path,
    remote: &str,
) -> Result<Option<String>, GitError> {
    config_lookup(runner, path, &format!("remote.{remote}.url"))
}

/// The remote name a branch pushes to, or `None` when unconfigured.
///
/// Refs in the `remotes/<name>/...` namespace carry their remote in the
/// prefix; local branches are looked up in git config.
pub fn branch_remote_name(
    runner: &GitRunner,
    path: &Path,
    branch: &str,
) -> Result<Option<String>, GitError> {
    if let Some(rest) = branch.strip_prefix("remotes/") {
        return Ok(rest.split('/').next().map(str::to_string));
    }
    config_lookup(runner, path, &format!("branch.{branch}.remote"))
}

/// `git config <key>`, with a missing key reported as `None`.
///
/// Config lookups exit non-zero for absent keys; that is an expected miss
/// here, not a failure worth propagating. Timeouts still propagate.
fn config_lookup(runner: &GitRunner, path: &Path, key: &str) -> Result<Option<String>, GitError> {
    match runner.run(path, &["config", key]) {
        Ok(value) if value.is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(GitError::CommandFailed { .. }) => Ok(None),
        Err(other) => Err(other),
    }
}
