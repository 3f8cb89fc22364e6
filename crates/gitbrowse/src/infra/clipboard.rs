//! Clipboard integration for the `--copy` output mode.

use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::{Context, Result, anyhow};

/// Copy a resolved URL to the system clipboard.
///
/// Tries `arboard` first and falls back to platform clipboard executables,
/// which keeps the flag usable over SSH or in otherwise headless sessions.
pub fn copy_url(url: &str) -> Result<()> {
    if let Ok(mut clipboard) = arboard::Clipboard::new()
        && clipboard.set_text(url.to_owned()).is_ok()
    {
        return Ok(());
    }

    for command in fallback_commands() {
        if pipe_to_command(command, url).is_ok() {
            return Ok(());
        }
    }

    Err(anyhow!("no usable clipboard backend for {url}"))
}

fn pipe_to_command(command: &[&str], text: &str) -> Result<()> {
    let (program, args) = command
        .split_first()
        .context("clipboard command missing program")?;

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to spawn clipboard command: {program}"))?;

    if let Some(stdin) = child.stdin.as_mut() {
        stdin
            .write_all(text.as_bytes())
            .context("failed to write clipboard contents")?;
    }

    let status = child
        .wait()
        .with_context(|| format!("clipboard command did not exit cleanly: {program}"))?;
    if status.success() {
        Ok(())
    } else {
        Err(anyhow!("clipboard command exited with status {status}"))
    }
}

#[cfg(target_os = "macos")]
fn fallback_commands() -> Vec<&'static [&'static str]> {
    vec![&["pbcopy"]]
}

#[cfg(all(unix, not(target_os = "macos")))]
fn fallback_commands() -> Vec<&'static [&'static str]> {
    vec![&["xclip", "-selection", "clipboard"], &["wl-copy"]]
}

#[cfg(target_os = "windows")]
fn fallback_commands() -> Vec<&'static [&'static str]> {
    vec![&["powershell.exe", "-NoProfile", "-Command", "Set-Clipboard"]]
}

#[cfg(not(any(unix, target_os = "windows")))]
fn fallback_commands() -> Vec<&'static [&'static str]> {
    Vec::new()
}
