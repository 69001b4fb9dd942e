//! phpstan-action CLI binary entry point.
//! Resolves configuration, picks a publisher and runs the pipeline on stdin.

use clap::Parser;
use phpstan_action::cli::{Cli, Commands};
use phpstan_action::config::{self, GitHubSettings};
use phpstan_action::github::GitHubClient;
use phpstan_action::publish::{CheckRunPublisher, LogDirectivePublisher, PublishError};
use phpstan_action::{output, pipeline, Error};
use std::io;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(e) = run(cli) {
        output::print_error(&e);
        std::process::exit(e.exit_code());
    }
}

/// Initialize tracing on stderr; stdout is reserved for workflow commands.
fn init_logging(verbose: u8) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .try_init();
}

fn run(cli: Cli) -> Result<(), Error> {
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Annotate => {
            let eff = config::resolve_effective(
                cli.config_dir.as_deref(),
                cli.workspace.as_deref(),
                None,
                cli.timeout_secs,
                None,
            )?;
            let mut publisher = LogDirectivePublisher::new(io::stdout().lock());
            pipeline::run(io::stdin(), &eff, &mut publisher)
        }
        Commands::CheckRun {
            token,
            repository,
            sha,
            api_url,
            name,
        } => {
            let eff = config::resolve_effective(
                cli.config_dir.as_deref(),
                cli.workspace.as_deref(),
                name.as_deref(),
                cli.timeout_secs,
                api_url.as_deref(),
            )?;
            // Every required key is checked before stdin is read.
            eff.workspace()?;
            let gh = GitHubSettings::resolve(
                &eff,
                token.as_deref(),
                repository.as_deref(),
                sha.as_deref(),
            )?;
            tracing::debug!(settings = ?gh, "publishing to check run");
            let client = GitHubClient::new(&gh).map_err(PublishError::from)?;
            let mut publisher =
                CheckRunPublisher::new(client, gh.check_name.clone(), gh.head_sha.clone());
            pipeline::run(io::stdin(), &eff, &mut publisher)
        }
    }
}
