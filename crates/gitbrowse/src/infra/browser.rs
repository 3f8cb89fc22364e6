//! Browser launching glue.

use anyhow::{Context, Result, bail};

/// Open a permalink in the default browser.
///
/// Only `http://`/`https://` URLs are accepted; everything the pipeline
/// produces is https, so anything else indicates a bad replacement-table
/// entry rather than a launchable link.
pub fn open_url(url: &str) -> Result<()> {
    if !is_web_url(url) {
        bail!("refusing to open non-web URL: {url}");
    }

    webbrowser::open(url).with_context(|| format!("failed to open browser for {url}"))?;
    Ok(())
}

fn is_web_url(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
