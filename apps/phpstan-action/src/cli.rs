//! CLI argument parsing via `clap`.
//!
//! Flag names mirror the GitHub Actions context (`github.workspace`, ...) and
//! fall back to the matching `GITHUB_*` environment variables.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "phpstan-action",
    version,
    about = "Publish PHPStan findings as GitHub annotations",
    long_about = "Reads a PHPStan JSON report (--error-format=json) from stdin and publishes every finding as a GitHub annotation, either as workflow commands on stdout or as a Check Run.\n\nConfiguration precedence: CLI/env > phpstan-action.toml > defaults.",
    after_help = "Examples:\n  phpstan analyse --error-format=json | phpstan-action annotate\n  phpstan analyse --error-format=json | phpstan-action check-run --name 'PHPStan L8'",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[arg(
        long = "github.workspace",
        env = "GITHUB_WORKSPACE",
        global = true,
        help = "Workspace root that finding paths are made relative to"
    )]
    pub workspace: Option<String>,
    #[arg(
        long,
        global = true,
        help = "Directory holding phpstan-action.toml|yaml (default: current dir)"
    )]
    pub config_dir: Option<String>,
    #[arg(
        long,
        global = true,
        help = "Timeout in seconds for reading the report and for each API request (default: 30)"
    )]
    pub timeout_secs: Option<u64>,
    #[arg(short, long, action = clap::ArgAction::Count, global = true, help = "Increase log verbosity (-v info, -vv debug)")]
    pub verbose: u8,
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Publishing modes.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current phpstan-action version.")]
    Version,
    /// Emit workflow commands on stdout
    #[command(
        about = "Print findings as workflow commands",
        long_about = "Write one `::error file=...,line=...::message` line per finding to stdout. Exits non-zero when any finding exists.",
        after_help = "Examples:\n  phpstan analyse --error-format=json | phpstan-action annotate --github.workspace \"$PWD\""
    )]
    Annotate,
    /// Publish findings as a Check Run
    #[command(
        about = "Publish findings as a Check Run",
        long_about = "Create a Check Run on the head commit, attach findings in batches of 50 and complete it. Exits non-zero when any finding exists.",
        after_help = "Examples:\n  phpstan analyse --error-format=json | phpstan-action check-run"
    )]
    CheckRun {
        #[arg(long = "github.token", env = "GITHUB_TOKEN", hide_env_values = true, help = "Token with checks:write permission")]
        token: Option<String>,
        #[arg(long = "github.repository", env = "GITHUB_REPOSITORY", help = "Repository as owner/repo")]
        repository: Option<String>,
        #[arg(long = "github.sha", env = "GITHUB_SHA", help = "Commit SHA the check run is attached to")]
        sha: Option<String>,
        #[arg(long = "github.api-url", env = "GITHUB_API_URL", help = "API base URL (default: https://api.github.com)")]
        api_url: Option<String>,
        #[arg(long, help = "Check run name (default: PHPStan)")]
        name: Option<String>,
    },
}
