//! Branch resolution, including recovery from a detached HEAD.
//!
//! Detached checkouts (CI, mid-rebase) have no named ref; the search in
//! [`branch_containing`] still finds a sensible branch to link to, preferring
//! widely-recognized default branches over arbitrary feature branches.

use std::collections::BTreeSet;
use std::path::Path;

use crate::app::remote;
use crate::domain::errors::GitError;
use crate::domain::model::HeadRef;
use crate::infra::shell::GitRunner;

/// Branches tried, in order, when several contain the same commit.
const PREFERRED_BRANCHES: [&str; 4] = [
    "master",
    "main",
    "remotes/origin/master",
    "remotes/origin/main",
];

/// Resolve what HEAD points at.
///
/// A usable branch name comes back as [`HeadRef::Branch`]. When `name-rev`
/// cannot name the ref (detached) or names a tag reference, we fall back to
/// the commit hash instead.
pub fn head_ref(runner: &GitRunner, path: &Path) -> Result<HeadRef, GitError> {
    let name = runner.run(path, &["name-rev", "--name-only", "HEAD"])?;
    // Older git prints "HEAD" for a ref it cannot name, newer git "undefined".
    if name != "HEAD" && name != "undefined" && !name.starts_with("tags/") {
        return Ok(HeadRef::Branch(name));
    }
    Ok(HeadRef::Detached(head_commit(runner, path)?))
}

/// Commit hash of HEAD.
pub fn head_commit(runner: &GitRunner, path: &Path) -> Result<String, GitError> {
    runner.run(path, &["rev-parse", "HEAD"])
}

/// Find a branch containing `commit`, or `None` when no candidate qualifies.
///
/// `None` is the expected "no branch found" outcome, not a failure; callers
/// abort the operation cleanly.
pub fn branch_containing(
    runner: &GitRunner,
    path: &Path,
    commit: &str,
) -> Result<Option<String>, GitError> {
    let raw = runner.run(path, &["branch", "--all", "--no-color", "--contains", commit])?;
    let listing = parse_listing(&raw);
    pick_branch(&listing, |name| {
        let Some(remote_name) = remote::branch_remote_name(runner, path, name)? else {
            return Ok(false);
        };
        Ok(remote::remote_url(runner, path, &remote_name)?.is_some())
    })
}

/// Parsed output of `git branch --all --contains`.
#[derive(Debug, Default, PartialEq, Eq)]
struct BranchListing {
    /// The checked-out branch (`* ` marker stripped), if the marker did not
    /// sit on the detached placeholder.
    current: Option<String>,
    /// Deduplicated branch names across both namespaces, lexicographic.
    names: Vec<String>,
}

fn parse_listing(raw: &str) -> BranchListing {
    let mut current = None;
    let mut names = BTreeSet::new();

    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (is_current, name) = match line.strip_prefix("* ") {
            Some(rest) => (true, rest.trim()),
            None => (false, line),
        };
        // "(HEAD detached at abc1234)" and "(no branch)" placeholders.
        if name.is_empty() || name.starts_with('(') {
            continue;
        }
        // Symbolic entries like "remotes/origin/HEAD -> origin/main".
        if name.contains(" -> ") {
            continue;
        }
        if is_current {
            current = Some(name.to_string());
        }
        names.insert(name.to_string());
    }

    BranchListing {
        current,
        names: names.into_iter().collect(),
    }
}

/// Apply the candidate preference order of the listing.
///
/// `is_browsable` reports whether a branch has both a configured remote and a
/// URL for that remote; it is only consulted for the final lexicographic
/// scan.
fn pick_branch(
    listing: &BranchListing,
    mut is_browsable: impl FnMut(&str) -> Result<bool, GitError>,
) -> Result<Option<String>, GitError> {
    if listing.names.is_empty() {
        return Ok(None);
    }

    if let Some(current) = &listing.current {
        return Ok(Some(current.clone()));
    }

    for preferred in PREFERRED_BRANCHES {
        if listing.names.iter().any(|name| name == preferred) {
            return Ok(Some(preferred.to_string()));
        }
    }

    for name in &listing.names {
        if is_browsable(name)? {
            return Ok(Some(name.clone()));
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_remotes(_: &str) -> Result<bool, GitError> {
        Ok(false)
    }

    #[test]
    fn parses_marker_and_dedupes_namespaces() {
        let raw = "* feature/x\n  main\n  remotes/origin/HEAD -> origin/main\n  remotes/origin/main\n";
        let listing = parse_listing(raw);
        assert_eq!(listing.current.as_deref(), Some("feature/x"));
        assert_eq!(
            listing.names,
            vec!["feature/x", "main", "remotes/origin/main"]
        );
    }

    #[test]
    fn detached_placeholder_is_not_a_candidate() {
        let raw = "* (HEAD detached at abc1234)\n  main\n";
        let listing = parse_listing(raw);
        assert_eq!(listing.current, None);
        assert_eq!(listing.names, vec!["main"]);
    }

    #[test]
    fn checked_out_branch_wins_over_preferred_list() {
        let raw = "* feature/x\n  master\n  main\n";
        let picked = pick_branch(&parse_listing(raw), no_remotes).unwrap();
        assert_eq!(picked.as_deref(), Some("feature/x"));
    }

    #[test]
    fn preferred_branches_scanned_in_order() {
        let raw = "  main\n  remotes/origin/master\n";
        let picked = pick_branch(&parse_listing(raw), no_remotes).unwrap();
        assert_eq!(picked.as_deref(), Some("main"));

        let raw = "  remotes/origin/main\n  remotes/origin/master\n";
        let picked = pick_branch(&parse_listing(raw), no_remotes).unwrap();
        assert_eq!(picked.as_deref(), Some("remotes/origin/master"));
    }

    #[test]
    fn lexicographic_scan_requires_a_browsable_remote() {
        let raw = "  zeta\n  alpha\n  beta\n";
        let picked = pick_branch(&parse_listing(raw), |name| Ok(name == "beta")).unwrap();
        assert_eq!(picked.as_deref(), Some("beta"));
    }

    #[test]
    fn no_qualifying_candidate_is_not_an_error() {
        let raw = "  zeta\n  alpha\n";
        let picked = pick_branch(&parse_listing(raw), no_remotes).unwrap();
        assert_eq!(picked, None);
    }

    #[test]
    fn empty_listing_yields_none() {
        let picked = pick_branch(&parse_listing(""), no_remotes).unwrap();
        assert_eq!(picked, None);
    }
}
