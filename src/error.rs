//! Error types for fetching, configuration and the top-level analysis.
//!
//! Only the seed page can fail an analysis. Every other page failure is
//! turned into an error [`PageResult`](crate::results::PageResult) by the
//! crawler and never surfaces as an `Err`.

use std::time::Duration;

/// Errors raised while retrieving a single page
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The URL could not be parsed or is not http(s)
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The request did not complete within the configured timeout
    #[error("timed out after {timeout:?} fetching {url}")]
    Timeout { url: String, timeout: Duration },

    /// The server answered with a non-2xx terminal status
    #[error("HTTP {code} fetching {url}")]
    Status { url: String, code: u16 },

    /// Network, TLS or redirect failure
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body could not be read as text
    #[error("failed to read body of {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client itself could not be built
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl FetchError {
    /// Short label used when a failure is recorded as page data
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::InvalidUrl { .. } => "invalid-url",
            FetchError::Timeout { .. } => "timeout",
            FetchError::Status { .. } => "status",
            FetchError::Request { .. } => "network",
            FetchError::Body { .. } => "body",
            FetchError::Client(_) => "client",
        }
    }
}

/// Errors raised while loading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid exclude pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Errors that fail a whole analysis request
#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    #[error("invalid seed URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP client could not be set up; nothing was fetched
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The seed page could not be fetched, so no session can start
    #[error("seed page failed: {0}")]
    Seed(#[source] FetchError),
}

impl From<FetchError> for AnalyzeError {
    fn from(error: FetchError) -> Self {
        match error {
            FetchError::Client(source) => AnalyzeError::Client(source),
            other => AnalyzeError::Seed(other),
        }
    }
}
