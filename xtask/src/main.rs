use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(author, version, about = "Project automation commands", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full test suite
    Test {
        #[arg(long)]
        release: bool,
    },
    /// Run formatting and clippy checks as CI does
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Test { release } => run_tests(release)?,
        Commands::Check => run_checks()?,
    }
    Ok(())
}

fn run_tests(release: bool) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("test").arg("--workspace");
    if release {
        cmd.arg("--release");
    }
    run(cmd, "cargo test")
}

fn run_checks() -> Result<()> {
    let mut fmt = Command::new("cargo");
    fmt.args(["fmt", "--all", "--check"]);
    run(fmt, "cargo fmt")?;

    let mut clippy = Command::new("cargo");
    clippy.args(["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"]);
    run(clippy, "cargo clippy")
}

fn run(mut cmd: Command, name: &str) -> Result<()> {
    let status = cmd.status()?;
    if !status.success() {
        anyhow::bail!("{name} failed");
    }
    Ok(())
}
