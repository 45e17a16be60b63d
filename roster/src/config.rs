use census::config::{SourceConfig, ValidationError as SourceValidationError};
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Deserialize, Debug, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
    #[serde(default)]
    pub pretty: bool,
}

fn default_output_path() -> PathBuf {
    PathBuf::from("./output.json")
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            path: default_output_path(),
            pretty: false,
        }
    }
}

#[derive(Deserialize, Debug, PartialEq)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,
    pub sentry_dsn: Option<String>,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            sentry_dsn: None,
        }
    }
}

#[derive(Deserialize, Debug, PartialEq)]
pub struct MetricsConfig {
    pub statsd_host: String,
    pub statsd_port: u16,
    #[serde(default = "default_metrics_prefix")]
    pub prefix: String,
}

fn default_metrics_prefix() -> String {
    "roster".into()
}

#[derive(Deserialize, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    pub metrics: Option<MetricsConfig>,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let data = serde_yaml::from_reader(file)?;

        Ok(data)
    }

    /// Loads the config file if one is given, otherwise uses defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.source.validate()?;

        if self.output.path.as_os_str().is_empty() {
            return Err(ValidationError::EmptyOutputPath);
        }

        if let Some(dsn) = &self.logging.sentry_dsn {
            sentry::types::Dsn::from_str(dsn)
                .map_err(|e| ValidationError::InvalidSentryDsn(e.to_string()))?;
        }

        if let Some(metrics) = &self.metrics {
            if metrics.statsd_host.is_empty() {
                return Err(ValidationError::EmptyStatsdHost);
            }
            if metrics.statsd_port == 0 {
                return Err(ValidationError::InvalidPort);
            }
        }

        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("could not load config from file: {0}")]
    LoadError(#[from] std::io::Error),
    #[error("could not parse config: {0}")]
    ParseError(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(#[from] ValidationError),
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("source: {0}")]
    Source(#[from] SourceValidationError),
    #[error("output path cannot be empty")]
    EmptyOutputPath,
    #[error("invalid sentry DSN: {0}")]
    InvalidSentryDsn(String),
    #[error("statsd host cannot be empty")]
    EmptyStatsdHost,
    #[error("Port cannot be 0")]
    InvalidPort,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_tmp_file(s: &str) -> tempfile::NamedTempFile {
        let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
        write!(tmp, "{}", s).expect("write yaml");

        tmp
    }

    #[test]
    fn full_config() {
        let yaml = r#"
            source:
                url: http://127.0.0.1:8080/api/people/
                fields:
                    attribute: mass
            output:
                path: /tmp/roster/out.json
                pretty: true
            logging:
                level: debug
            metrics:
                statsd_host: 127.0.0.1
                statsd_port: 8125
            "#;
        let tmp = write_tmp_file(yaml);
        let config = Config::from_file(tmp.path()).expect("load config");

        assert_eq!(config.source.url, "http://127.0.0.1:8080/api/people/");
        assert_eq!(config.source.fields.attribute, "mass");
        assert_eq!(config.source.fields.name, "name");
        assert_eq!(config.output.path, PathBuf::from("/tmp/roster/out.json"));
        assert!(config.output.pretty);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.sentry_dsn, None);

        let metrics = config.metrics.as_ref().expect("metrics config");
        assert_eq!(metrics.statsd_port, 8125);
        assert_eq!(metrics.prefix, "roster");

        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_config_uses_defaults() {
        let tmp = write_tmp_file("{}");
        let config = Config::from_file(tmp.path()).expect("load config");

        assert_eq!(config, Config::default());
        assert_eq!(config.source.url, census::config::DEFAULT_SOURCE_URL);
        assert_eq!(config.output.path, PathBuf::from("./output.json"));
        assert!(config.metrics.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_without_file() {
        let config = Config::load(None).expect("default config");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn missing_file() {
        let result = Config::from_file(Path::new("/nonexistent/roster.yaml"));
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn invalid_yaml() {
        let tmp = write_tmp_file("source: [not, a, mapping");
        let result = Config::from_file(tmp.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn validation_errors() {
        let config = Config {
            output: OutputConfig {
                path: PathBuf::new(),
                pretty: false,
            },
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::EmptyOutputPath));

        let config = Config {
            metrics: Some(MetricsConfig {
                statsd_host: "127.0.0.1".into(),
                statsd_port: 0,
                prefix: "roster".into(),
            }),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidPort));

        let config = Config {
            logging: LoggingConfig {
                sentry_dsn: Some("not a dsn".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidSentryDsn(_))
        ));

        let config = Config {
            source: SourceConfig {
                url: "file:///etc/passwd".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::Source(_))
        ));
    }
}
