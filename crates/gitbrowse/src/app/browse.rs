//! The resolution pipeline: file path + selection to a web permalink.

use std::path::PathBuf;

use crate::app::{branch, remote, repo, url};
use crate::domain::errors::GitError;
use crate::domain::model::{HeadRef, LineRange};
use crate::infra::config::Config;
use crate::infra::shell::GitRunner;

/// One invocation's worth of input from the host.
#[derive(Debug, Clone)]
pub struct BrowseRequest {
    /// Absolute path of a file inside a git working copy.
    pub file: PathBuf,
    /// 1-based inclusive selection, absent when nothing was selected.
    pub lines: Option<LineRange>,
}

/// Resolve the permalink for a request.
///
/// `Ok(None)` is the soft "nothing to open" outcome: no branch contains the
/// commit, or no candidate branch has a browsable remote. Hard failures
/// (command errors, timeouts, unsupported remote hosts) propagate.
pub fn resolve_permalink(
    runner: &GitRunner,
    config: &Config,
    request: &BrowseRequest,
) -> Result<Option<String>, GitError> {
    let rel = repo::relative_path(runner, &request.file)?;
    let head = branch::head_ref(runner, &request.file)?;

    let mut branch_name = head.name().to_string();
    let mut remote_url = remote::remote_url_for_branch(runner, &request.file, &branch_name)?;

    // No remote for the current ref: search for a named branch containing
    // HEAD's commit and retry once with it.
    if remote_url.is_none() {
        let commit = match &head {
            HeadRef::Detached(commit) => commit.clone(),
            HeadRef::Branch(_) => branch::head_commit(runner, &request.file)?,
        };
        let Some(found) = branch::branch_containing(runner, &request.file, &commit)? else {
            tracing::info!(commit = %commit, "no branch contains this commit; aborting");
            return Ok(None);
        };
        remote_url = remote::remote_url_for_branch(runner, &request.file, &found)?;
        branch_name = found;
    }

    let Some(raw_remote) = remote_url else {
        tracing::info!(branch = %branch_name, "branch has no browsable remote; aborting");
        return Ok(None);
    };

    let base = url::canonicalize(&raw_remote, &config.remotes.replacements)?;
    let link = url::build_url(&base, &branch_name, &rel, request.lines);
    tracing::info!(relpath = %rel.display(), branch = %branch_name, base_url = %base, "resolved permalink");
    Ok(Some(link))
}
