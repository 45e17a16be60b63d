//! Paginated fetching of upstream records.
//!
//! Pages are requested one at a time, following each page's `next` link
//! until it is absent. The first failed page ends the walk: records from
//! earlier pages are kept, nothing from the failed page is. There are no
//! retries.

use crate::config::{FieldMapping, SourceConfig, ValidationError};
use crate::errors::FetchError;
use crate::metrics_defs::{FETCH_DURATION, PAGE_FAILURES, PAGES_FETCHED, RECORDS_FETCHED};
use crate::page_source::{HttpPageSource, PageSource, RawPage};
use crate::types::Record;
use serde_json::{Map, Value};
use shared::{counter, histogram};
use std::time::Instant;
use url::Url;

/// Result of walking the upstream collection.
#[derive(Debug)]
pub struct FetchOutcome {
    pub records: Vec<Record>,
    pub pages_fetched: usize,
    /// Set when pagination stopped on a failed page. The records are then
    /// possibly incomplete.
    pub error: Option<FetchError>,
}

impl FetchOutcome {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

pub struct Fetcher<S = HttpPageSource> {
    source: S,
    start_url: Url,
    fields: FieldMapping,
}

impl Fetcher<HttpPageSource> {
    pub fn from_config(config: &SourceConfig) -> Result<Self, ValidationError> {
        config.fields.validate()?;
        Ok(Fetcher::new(
            HttpPageSource::new(),
            config.start_url()?,
            config.fields.clone(),
        ))
    }
}

impl<S: PageSource> Fetcher<S> {
    pub fn new(source: S, start_url: Url, fields: FieldMapping) -> Self {
        Fetcher {
            source,
            start_url,
            fields,
        }
    }

    /// Fetches every page and returns the accumulated records.
    ///
    /// Never fails: a short list means a page could not be fetched. Use
    /// [`Fetcher::fetch_pages`] to find out whether that happened.
    pub async fn fetch_all(&self) -> Vec<Record> {
        self.fetch_pages().await.records
    }

    pub async fn fetch_pages(&self) -> FetchOutcome {
        let started = Instant::now();
        let mut records = Vec::new();
        let mut pages_fetched = 0;
        let mut error = None;
        let mut next_url = Some(self.start_url.clone());

        while let Some(url) = next_url.take() {
            match self.fetch_one(&url).await {
                Ok((page_records, next)) => {
                    pages_fetched += 1;
                    counter!(PAGES_FETCHED).increment(1);
                    counter!(RECORDS_FETCHED).increment(page_records.len() as u64);
                    tracing::debug!(
                        url = %url,
                        records = page_records.len(),
                        has_next = next.is_some(),
                        "Fetched page"
                    );

                    records.extend(page_records);
                    next_url = next;
                }
                Err(e) => {
                    counter!(PAGE_FAILURES).increment(1);
                    tracing::error!(url = %url, error = %e, "Error fetching page, stopping pagination");
                    error = Some(e);
                }
            }
        }

        histogram!(FETCH_DURATION).record(started.elapsed().as_secs_f64());
        tracing::info!(
            pages = pages_fetched,
            records = records.len(),
            complete = error.is_none(),
            "Finished fetching"
        );

        FetchOutcome {
            records,
            pages_fetched,
            error,
        }
    }

    /// Fetches and normalizes one page. Returns the page's records and the
    /// URL of the following page, if any.
    async fn fetch_one(&self, url: &Url) -> Result<(Vec<Record>, Option<Url>), FetchError> {
        let RawPage { results, next } = self.source.fetch_page(url).await?;

        let records = results
            .iter()
            .enumerate()
            .map(|(index, entity)| project(&self.fields, index, entity))
            .collect::<Result<Vec<_>, _>>()?;

        let next = match next {
            Some(next) if !next.is_empty() => Some(
                url.join(&next)
                    .map_err(|source| FetchError::InvalidNextUrl { url: next, source })?,
            ),
            _ => None,
        };

        Ok((records, next))
    }
}

/// Picks the three mapped fields out of a raw entity. Anything else on the
/// entity is ignored.
fn project(
    fields: &FieldMapping,
    index: usize,
    entity: &Map<String, Value>,
) -> Result<Record, FetchError> {
    let field = |name: &str| -> Result<String, FetchError> {
        entity
            .get(name)
            .and_then(Value::as_str)
            .map(String::from)
            .ok_or_else(|| FetchError::MalformedEntity {
                index,
                field: name.to_string(),
            })
    };

    Ok(Record::new(
        field(&fields.name)?,
        field(&fields.attribute)?,
        field(&fields.category)?,
    ))
}
