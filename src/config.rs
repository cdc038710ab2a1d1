use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// Browser-like user agent sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Configuration for an analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// User agent header sent to the target site
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Timeout for a single page fetch, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Number of pages fetched concurrently per crawl batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Maximum number of pages recorded during a deep scan (seed included)
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// Upper bound accepted for `max_pages`
    #[serde(default = "default_max_pages_limit")]
    pub max_pages_limit: usize,

    /// Optional deadline for the whole crawl, in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_timeout_secs: Option<u64>,

    /// Extra regex patterns for URLs that must never enter the frontier
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            request_timeout_secs: default_request_timeout_secs(),
            batch_size: default_batch_size(),
            max_pages: default_max_pages(),
            max_pages_limit: default_max_pages_limit(),
            total_timeout_secs: None,
            exclude_patterns: Vec::new(),
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Reject values the crawler cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::Invalid("batch_size must be at least 1".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be at least 1".into(),
            ));
        }
        if self.max_pages_limit == 0 {
            return Err(ConfigError::Invalid(
                "max_pages_limit must be at least 1".into(),
            ));
        }
        for pattern in &self.exclude_patterns {
            regex::Regex::new(pattern)?;
        }
        Ok(())
    }

    /// `max_pages` clamped into `1..=max_pages_limit`
    pub fn effective_max_pages(&self) -> usize {
        self.max_pages.clamp(1, self.max_pages_limit.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn total_timeout(&self) -> Option<Duration> {
        self.total_timeout_secs.map(Duration::from_secs)
    }
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_batch_size() -> usize {
    10
}

fn default_max_pages() -> usize {
    50
}

fn default_max_pages_limit() -> usize {
    500
}
