mod commands;
mod config;
mod logging;
mod output;
mod stats;

use clap::{Parser, Subcommand};
use commands::RosterError;
use config::{Config, ConfigError};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "roster", about = "Fetch people records, group them by category and sort each group")]
struct Cli {
    /// YAML config file. Defaults are used when omitted.
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Where to write the JSON document (overrides the config file)
    #[arg(long, short, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Fetch all pages, categorize and sort
    Run {
        /// First page of the upstream collection
        #[arg(long)]
        url: Option<String>,
    },
    /// Fetch all pages and write the normalized records unsorted
    Fetch {
        #[arg(long)]
        url: Option<String>,
    },
    /// Categorize and sort records previously written by `fetch`
    Sort {
        #[arg(long, short)]
        input: PathBuf,
    },
}

/// Loads the config file, applies command line overrides and validates the
/// result.
fn resolve_config(cli: &Cli) -> Result<Config, RosterError> {
    let mut config = Config::load(cli.config.as_deref())?;

    if let Some(output) = &cli.output {
        config.output.path = output.clone();
    }
    if let CliCommand::Run { url: Some(url) } | CliCommand::Fetch { url: Some(url) } =
        &cli.command
    {
        config.source.url = url.clone();
    }

    config.validate().map_err(ConfigError::from)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            return ExitCode::FAILURE;
        }
    };

    let _sentry = logging::init(&config.logging);

    if let Err(e) = stats::init(config.metrics.as_ref()) {
        tracing::warn!(error = %e, "Metrics disabled");
    }

    let result = match &cli.command {
        CliCommand::Run { .. } => commands::run(&config).await,
        CliCommand::Fetch { .. } => commands::fetch(&config).await,
        CliCommand::Sort { input } => commands::sort(input, &config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "An error occurred");
            ExitCode::FAILURE
        }
    }
}
