//! Runtime configuration for a feed generation run.
//!
//! A [`Config`] is built once at startup and never mutated afterwards. Every
//! tunable has a built-in default; an optional YAML file may override any
//! subset of them:
//!
//! ```yaml
//! base_url: https://www.ilgazzettino.it/nordest/
//! max_links: 20
//! request_delay_secs: 2.5
//! timeout_secs: 10
//! output_path: /var/www/feeds/gazzettino_rss.xml
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, instrument};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://www.ilgazzettino.it/nordest/";
pub const DEFAULT_USER_AGENT: &str = "SimpleRSS/1.0 (+https://example.com)";
pub const DEFAULT_MAX_LINKS: usize = 50;
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_secs(1);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_OUTPUT_FILENAME: &str = "gazzettino_rss.xml";
pub const DEFAULT_FEED_TITLE: &str = "Il Gazzettino - Nordest";
pub const DEFAULT_FEED_DESCRIPTION: &str =
    "Feed RSS generato automaticamente contenente titolo, descrizione e corpo";
pub const DEFAULT_FEED_LANGUAGE: &str = "it";

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid base URL {value:?}: {reason}")]
    InvalidBaseUrl { value: String, reason: String },
    #[error("invalid {field}: {value} is not a valid number of seconds")]
    InvalidDuration { field: &'static str, value: f64 },
}

/// Immutable settings shared by every stage of the pipeline.
#[derive(Debug, Clone)]
pub struct Config {
    /// Index page to discover articles from. Also the feed `<link>`.
    pub base_url: Url,
    /// Maximum number of article links taken from the index page.
    pub max_links: usize,
    /// Pause between consecutive article fetches.
    pub request_delay: Duration,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Value of the `User-Agent` header sent with every request.
    pub user_agent: String,
    /// Destination of the generated feed. Overwritten on every run.
    pub output_path: PathBuf,
    pub feed_title: String,
    pub feed_description: String,
    pub feed_language: String,
}

/// On-disk shape of the YAML override file. Every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub base_url: Option<String>,
    pub max_links: Option<usize>,
    pub request_delay_secs: Option<f64>,
    pub timeout_secs: Option<f64>,
    pub user_agent: Option<String>,
    pub output_path: Option<PathBuf>,
    pub feed_title: Option<String>,
    pub feed_description: Option<String>,
    pub feed_language: Option<String>,
}

impl Config {
    /// The built-in defaults, with no overrides applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if [`DEFAULT_BASE_URL`] does not parse.
    pub fn new() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(DEFAULT_BASE_URL)?,
            max_links: DEFAULT_MAX_LINKS,
            request_delay: DEFAULT_REQUEST_DELAY,
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            output_path: default_output_path(),
            feed_title: DEFAULT_FEED_TITLE.to_string(),
            feed_description: DEFAULT_FEED_DESCRIPTION.to_string(),
            feed_language: DEFAULT_FEED_LANGUAGE.to_string(),
        })
    }

    /// Build the run configuration from the defaults and an optional YAML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Optional path to a YAML file overriding some or all defaults
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or parsed, or if
    /// an overridden value is invalid.
    #[instrument(level = "info")]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            debug!("No config file given; using built-in defaults");
            return Self::new();
        };

        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file = Self::parse_overrides(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::new()?.with_overrides(file)?;
        info!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    fn parse_overrides(raw: &str) -> Result<ConfigFile, serde_yaml::Error> {
        // An empty document deserializes to unit, not to a mapping.
        if raw.trim().is_empty() {
            return Ok(ConfigFile::default());
        }
        serde_yaml::from_str(raw)
    }

    /// Apply the fields present in `file` on top of `self`.
    pub fn with_overrides(mut self, file: ConfigFile) -> Result<Self, ConfigError> {
        if let Some(base_url) = file.base_url {
            self.base_url = parse_base_url(&base_url)?;
        }
        if let Some(max_links) = file.max_links {
            self.max_links = max_links;
        }
        if let Some(secs) = file.request_delay_secs {
            self.request_delay = secs_to_duration("request_delay_secs", secs)?;
        }
        if let Some(secs) = file.timeout_secs {
            self.timeout = secs_to_duration("timeout_secs", secs)?;
        }
        if let Some(user_agent) = file.user_agent {
            self.user_agent = user_agent;
        }
        if let Some(output_path) = file.output_path {
            self.output_path = output_path;
        }
        if let Some(title) = file.feed_title {
            self.feed_title = title;
        }
        if let Some(description) = file.feed_description {
            self.feed_description = description;
        }
        if let Some(language) = file.feed_language {
            self.feed_language = language;
        }
        Ok(self)
    }

    /// Replace the output path, e.g. from a command-line flag.
    pub fn with_output_path(mut self, output_path: PathBuf) -> Self {
        self.output_path = output_path;
        self
    }
}

/// `gazzettino_rss.xml` next to the running executable.
///
/// Falls back to the current directory when the executable location is unknown.
pub fn default_output_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_OUTPUT_FILENAME)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILENAME))
}

fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::InvalidBaseUrl {
        value: value.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidBaseUrl {
            value: value.to_string(),
            reason: format!("unsupported scheme {other:?}"),
        }),
    }
}

fn secs_to_duration(field: &'static str, secs: f64) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(secs).map_err(|_| ConfigError::InvalidDuration { field, value: secs })
}
