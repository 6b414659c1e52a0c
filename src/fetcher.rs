//! HTTP page fetching.
//!
//! The pipeline only needs "give me the text behind this URL", so that is
//! what the [`Fetch`] trait exposes. [`HttpFetcher`] is the real implementation
//! backed by a configured `reqwest::Client`; tests drive the pipeline with
//! in-memory implementations instead.
//!
//! There is no retry logic here: a request either succeeds on the first
//! attempt or yields a [`FetchError`].

use crate::config::Config;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, instrument};

/// Failure to retrieve a page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-success status code.
    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: StatusCode },
    /// The request never produced a usable response (DNS, connect, TLS,
    /// timeout, or a body that could not be decoded).
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Trait for retrieving the text of a web page.
///
/// Implementors return the decoded response body, or a [`FetchError`] if the
/// page could not be retrieved.
pub trait Fetch {
    /// Fetch `url` and return its body as text.
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}

/// [`Fetch`] implementation that performs a single HTTP GET per call.
///
/// Every request carries the configured `User-Agent` header and is bounded by
/// the configured timeout. Redirects follow the `reqwest` defaults.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher from the run configuration.
    ///
    /// # Errors
    ///
    /// Returns the underlying `reqwest` error if the HTTP client cannot be
    /// constructed (e.g. the TLS backend fails to initialize).
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;
        debug!(bytes = body.len(), %status, "Fetched page");
        Ok(body)
    }
}
