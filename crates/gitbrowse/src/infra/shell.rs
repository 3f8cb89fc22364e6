//! Shell-out runner for the git CLI.
//!
//! Every git interaction in the crate goes through [`GitRunner`]; the layers
//! above it are pure logic over the strings it returns.

use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use crate::domain::errors::GitError;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Executes `git -C <dir> <args...>` with a bounded timeout.
#[derive(Debug, Clone)]
pub struct GitRunner {
    timeout: Duration,
}

impl GitRunner {
    /// Runner with the default 5 second timeout.
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Runner with a caller-supplied timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Run a git subcommand against `path`, returning trimmed stdout.
    ///
    /// When `path` is a file its parent directory is used as the `-C` target;
    /// git refuses plain files as working directories. Empty stdout is a
    /// valid (empty) result, not an error.
    pub fn run(&self, path: &Path, args: &[&str]) -> Result<String, GitError> {
        let dir = if path.is_dir() {
            path
        } else {
            path.parent().unwrap_or(path)
        };

        let rendered = render_command(dir, args);
        tracing::debug!(command = %rendered, "running git");

        let mut child = Command::new("git")
            .arg("-C")
            .arg(dir)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let started = Instant::now();
        let output = loop {
            if child.try_wait()?.is_some() {
                break child.wait_with_output()?;
            }
            if started.elapsed() >= self.timeout {
                let _ = child.kill();
                let _ = child.wait();
                tracing::warn!(command = %rendered, timeout_secs = self.timeout.as_secs(), "git timed out");
                return Err(GitError::CommandTimeout { command: rendered });
            }
            std::thread::sleep(POLL_INTERVAL);
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let stderr = if stderr.is_empty() {
                "<no stderr>".to_string()
            } else {
                stderr
            };
            let exit_code = output.status.code().unwrap_or(-1);
            tracing::warn!(command = %rendered, exit_code, stderr = %stderr, "git failed");
            return Err(GitError::CommandFailed {
                command: rendered,
                exit_code,
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Default for GitRunner {
    fn default() -> Self {
        Self::new()
    }
}

fn render_command(dir: &Path, args: &[&str]) -> String {
    format!("git -C {} {}", dir.display(), args.join(" "))
}
