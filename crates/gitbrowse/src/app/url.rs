//! Remote URL canonicalization and permalink assembly.

use std::path::Path;

use crate::domain::errors::GitError;
use crate::domain::model::{LineRange, Replacement};

const GITHUB_HTTPS: &str = "https://github.com";
const GITHUB_SSH: &str = "git@github.com";
const GO_MIRROR: &str = "https://go.googlesource.com/";
const GO_MIRROR_TARGET: &str = "https://github.com/golang/";

/// Translate a raw remote URL into a canonical https web base.
///
/// Rules are tried in order: github https passthrough, github ssh rewrite,
/// the go.googlesource.com mirror map, then the caller's replacement table
/// (first matching prefix wins, replaced once). Anything else is an
/// unsupported host; we do not guess.
pub fn canonicalize(raw: &str, replacements: &[Replacement]) -> Result<String, GitError> {
    if raw.starts_with(GITHUB_HTTPS) {
        return Ok(raw.to_string());
    }

    if raw.starts_with(GITHUB_SSH) {
        let stripped = raw.strip_prefix("git@").unwrap_or(raw);
        let stripped = stripped.strip_suffix(".git").unwrap_or(stripped);
        return Ok(format!("https://{}", stripped.replacen(':', "/", 1)));
    }

    if let Some(name) = raw.strip_prefix(GO_MIRROR) {
        return Ok(format!("{GO_MIRROR_TARGET}{name}"));
    }

    for entry in replacements {
        if raw.starts_with(entry.prefix.as_str()) {
            return Ok(raw.replacen(&entry.prefix, &entry.replacement, 1));
        }
    }

    Err(GitError::UnsupportedRemote {
        url: raw.to_string(),
    })
}

/// Assemble the blob permalink.
///
/// The `tags/` prefix is stripped from the branch segment; tags are not
/// addressed through `blob/<branch>` the way branches are. A present line
/// range appends `?plain=1#L{begin}-L{end}` — `plain=1` forces source
/// rendering for formats the host would otherwise preview (markdown etc.).
pub fn build_url(base: &str, branch: &str, rel: &Path, lines: Option<LineRange>) -> String {
    let branch = branch.strip_prefix("tags/").unwrap_or(branch);
    let rel = slash_joined(rel);
    let mut url = format!("{base}/blob/{branch}/{rel}");
    if let Some(range) = lines {
        url.push_str(&format!("?plain=1#L{}-L{}", range.begin, range.end));
    }
    url
}

fn slash_joined(path: &Path) -> String {
    path.components()
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn github_https_passes_through() {
        let url = canonicalize("https://github.com/org/repo", &[]).unwrap();
        assert_eq!(url, "https://github.com/org/repo");
    }

    #[test]
    fn github_ssh_is_rewritten() {
        let url = canonicalize("git@github.com:org/repo.git", &[]).unwrap();
        assert_eq!(url, "https://github.com/org/repo");
    }

    #[test]
    fn go_mirror_maps_to_golang_org() {
        let url = canonicalize("https://go.googlesource.com/tools", &[]).unwrap();
        assert_eq!(url, "https://github.com/golang/tools");
    }

    #[test]
    fn canonicalize_is_idempotent_on_supported_forms() {
        let inputs = [
            "https://github.com/org/repo",
            "git@github.com:org/repo.git",
            "https://go.googlesource.com/tools",
        ];
        for input in inputs {
            let once = canonicalize(input, &[]).unwrap();
            let twice = canonicalize(&once, &[]).unwrap();
            assert_eq!(once, twice, "not idempotent for {input}");
        }
    }

    #[test]
    fn unknown_host_is_an_error() {
        let err = canonicalize("https://example.com/x", &[]).unwrap_err();
        match err {
            GitError::UnsupportedRemote { url } => assert_eq!(url, "https://example.com/x"),
            other => panic!("expected UnsupportedRemote, got {other:?}"),
        }
    }

    #[test]
    fn replacement_table_first_match_wins() {
        let table = vec![
            Replacement {
                prefix: "ssh://git.example.com/".into(),
                replacement: "https://code.example.com/".into(),
            },
            Replacement {
                prefix: "ssh://".into(),
                replacement: "https://never-reached/".into(),
            },
        ];
        let url = canonicalize("ssh://git.example.com/org/repo", &table).unwrap();
        assert_eq!(url, "https://code.example.com/org/repo");
    }

    #[test]
    fn builds_permalink_with_line_range() {
        let url = build_url(
            "https://github.com/org/repo",
            "main",
            Path::new("a/b.go"),
            Some(LineRange::new(10, 20)),
        );
        assert_eq!(url, "https://github.com/org/repo/blob/main/a/b.go?plain=1#L10-L20");
    }

    #[test]
    fn builds_permalink_without_line_range() {
        let url = build_url(
            "https://github.com/org/repo",
            "main",
            Path::new("a/b.go"),
            None,
        );
        assert_eq!(url, "https://github.com/org/repo/blob/main/a/b.go");
    }

    #[test]
    fn tag_prefix_is_stripped_from_branch_segment() {
        let url = build_url(
            "https://github.com/org/repo",
            "tags/v1.2.0",
            Path::new("README.md"),
            None,
        );
        assert_eq!(url, "https://github.com/org/repo/blob/v1.2.0/README.md");
    }
}
