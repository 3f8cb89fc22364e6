use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Result, bail};
use clap::Parser;

use gitbrowse::app::browse::{BrowseRequest, resolve_permalink};
use gitbrowse::domain::model::LineRange;
use gitbrowse::infra::config::Config;
use gitbrowse::infra::shell::GitRunner;
use gitbrowse::infra::{browser, clipboard};

#[derive(Parser)]
#[command(author, version, about = "Open a file and line range on its git web host", long_about = None)]
struct Cli {
    /// File inside a git working copy.
    file: PathBuf,

    /// 1-based inclusive line range, BEGIN[:END].
    #[arg(
        short = 'n',
        long,
        value_parser = parse_lines,
        conflicts_with_all = ["sel_start", "sel_end"]
    )]
    lines: Option<LineRange>,

    /// Selection start as 0-based ROW:COL editor coordinates.
    #[arg(long, value_parser = parse_point, requires = "sel_end")]
    sel_start: Option<(u32, u32)>,

    /// Selection end as 0-based ROW:COL editor coordinates.
    #[arg(long, value_parser = parse_point, requires = "sel_start")]
    sel_end: Option<(u32, u32)>,

    /// Print the resolved URL to stdout instead of opening a browser.
    #[arg(long)]
    print_only: bool,

    /// Copy the resolved URL to the clipboard instead of opening a browser.
    #[arg(long, conflicts_with = "print_only")]
    copy: bool,
}

fn main() -> ExitCode {
    gitbrowse::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "command failed");
            eprintln!("gitbrowse: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if !cli.file.exists() {
        bail!("file not found on disk: {}", cli.file.display());
    }

    let config = Config::load()?;
    let runner = GitRunner::with_timeout(Duration::from_secs(config.git.timeout_secs));

    let lines = cli.lines.or_else(|| match (cli.sel_start, cli.sel_end) {
        (Some(start), Some(end)) => LineRange::from_selection(start, end),
        _ => None,
    });

    let request = BrowseRequest {
        file: cli.file,
        lines,
    };

    let Some(url) = resolve_permalink(&runner, &config, &request)? else {
        // Soft outcome, already logged with detail by the pipeline.
        eprintln!("gitbrowse: no browsable branch or remote for this file");
        return Ok(());
    };

    if cli.copy {
        clipboard::copy_url(&url)?;
    } else if cli.print_only || !config.browser.open {
        println!("{url}");
    } else {
        browser::open_url(&url)?;
    }

    Ok(())
}

fn parse_lines(raw: &str) -> Result<LineRange, String> {
    let (begin, end) = match raw.split_once(':') {
        Some((begin, end)) => (begin, end),
        None => (raw, raw),
    };
    let begin: u32 = begin
        .trim()
        .parse()
        .map_err(|_| format!("invalid line number: {begin}"))?;
    let end: u32 = end
        .trim()
        .parse()
        .map_err(|_| format!("invalid line number: {end}"))?;
    if begin == 0 || end == 0 {
        return Err("line numbers are 1-based".to_string());
    }
    Ok(LineRange::new(begin, end))
}

fn parse_point(raw: &str) -> Result<(u32, u32), String> {
    let (row, col) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected ROW:COL, got: {raw}"))?;
    let row = row
        .trim()
        .parse()
        .map_err(|_| format!("invalid row: {row}"))?;
    let col = col
        .trim()
        .parse()
        .map_err(|_| format!("invalid column: {col}"))?;
    Ok((row, col))
}
