use crate::config::{Config, ConfigError};
use crate::output::{OutputError, write_json};
use census::config::ValidationError;
use census::{Fetcher, Record, categorize_and_sort};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum RosterError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid source: {0}")]
    Source(#[from] ValidationError),
    #[error("could not read records from {path}: {source}")]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse records from {path}: {source}")]
    ParseInput {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Fetches every record, groups and sorts them, and writes the result.
pub async fn run(config: &Config) -> Result<(), RosterError> {
    let records = fetch_records(config).await?;
    let groups = categorize_and_sort(&records);

    write_json(&config.output.path, &groups, config.output.pretty)?;

    tracing::info!(
        path = %config.output.path.display(),
        groups = groups.len(),
        records = records.len(),
        "The output file is generated"
    );
    Ok(())
}

/// Fetches every record and writes them ungrouped, in upstream order.
pub async fn fetch(config: &Config) -> Result<(), RosterError> {
    let records = fetch_records(config).await?;

    write_json(&config.output.path, &records, config.output.pretty)?;

    tracing::info!(
        path = %config.output.path.display(),
        records = records.len(),
        "Wrote fetched records"
    );
    Ok(())
}

/// Groups and sorts a record list previously written by [`fetch`].
pub fn sort(input: &Path, config: &Config) -> Result<(), RosterError> {
    let records = read_records(input)?;
    let groups = categorize_and_sort(&records);

    write_json(&config.output.path, &groups, config.output.pretty)?;

    tracing::info!(
        input = %input.display(),
        path = %config.output.path.display(),
        groups = groups.len(),
        "The output file is generated"
    );
    Ok(())
}

async fn fetch_records(config: &Config) -> Result<Vec<Record>, RosterError> {
    let fetcher = Fetcher::from_config(&config.source)?;
    let outcome = fetcher.fetch_pages().await;

    if let Some(e) = &outcome.error {
        tracing::warn!(
            pages = outcome.pages_fetched,
            records = outcome.records.len(),
            error = %e,
            "Pagination stopped early, output may be incomplete"
        );
    }

    Ok(outcome.records)
}

fn read_records(path: &Path) -> Result<Vec<Record>, RosterError> {
    let file = File::open(path).map_err(|source| RosterError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|source| RosterError::ParseInput {
        path: path.to_path_buf(),
        source,
    })
}
