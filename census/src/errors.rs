use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

/// Errors raised while fetching a single page.
///
/// The fetcher never returns these to its caller directly; a failed page
/// ends pagination and is reported through `FetchOutcome::error`.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream returned {status} for {url}")]
    Status { status: StatusCode, url: Url },

    #[error("could not decode page: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid next page URL {url:?}: {source}")]
    InvalidNextUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("entity {index} has no string field {field:?}")]
    MalformedEntity { index: usize, field: String },
}
