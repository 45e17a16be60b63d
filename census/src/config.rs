use serde::Deserialize;
use thiserror::Error;
use url::Url;

pub const DEFAULT_SOURCE_URL: &str = "https://swapi.dev/api/people/";

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("invalid source URL {0:?}: {1}")]
    InvalidUrl(String, url::ParseError),

    #[error("unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Empty field name for {0}")]
    EmptyFieldName(&'static str),
}

/// Names of the upstream entity fields projected into a record.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldMapping {
    pub name: String,
    pub attribute: String,
    pub category: String,
}

impl Default for FieldMapping {
    fn default() -> Self {
        FieldMapping {
            name: "name".into(),
            attribute: "height".into(),
            category: "gender".into(),
        }
    }
}

impl FieldMapping {
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (label, value) in [
            ("name", &self.name),
            ("attribute", &self.attribute),
            ("category", &self.category),
        ] {
            if value.is_empty() {
                return Err(ValidationError::EmptyFieldName(label));
            }
        }
        Ok(())
    }
}

/// Where the paginated collection starts and how its entities are read.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SourceConfig {
    #[serde(default = "default_source_url")]
    pub url: String,
    #[serde(default)]
    pub fields: FieldMapping,
}

fn default_source_url() -> String {
    DEFAULT_SOURCE_URL.into()
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            url: default_source_url(),
            fields: FieldMapping::default(),
        }
    }
}

impl SourceConfig {
    /// Parses the first page URL. Only http and https are accepted.
    pub fn start_url(&self) -> Result<Url, ValidationError> {
        let url =
            Url::parse(&self.url).map_err(|e| ValidationError::InvalidUrl(self.url.clone(), e))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ValidationError::UnsupportedScheme(other.to_string())),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.start_url()?;
        self.fields.validate()
    }
}
