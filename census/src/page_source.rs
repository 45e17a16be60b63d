use crate::errors::FetchError;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use url::Url;

/// One page of the upstream collection, before normalization.
#[derive(Debug, Deserialize)]
pub struct RawPage {
    pub results: Vec<Map<String, Value>>,
    // Absent, null or empty means this is the last page
    #[serde(default)]
    pub next: Option<String>,
}

/// Transport for retrieving a single page.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, url: &Url) -> Result<RawPage, FetchError>;
}

/// Fetches pages with plain GET requests.
#[derive(Clone, Default)]
pub struct HttpPageSource {
    client: reqwest::Client,
}

impl HttpPageSource {
    pub fn new() -> Self {
        HttpPageSource {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_page(&self, url: &Url) -> Result<RawPage, FetchError> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                url: url.clone(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
