// src/error.rs
// =============================================================================
// Errors that can stop a crawl before it starts.
//
// Almost nothing in this tool is allowed to fail: transport problems become
// status code 0, failed page fetches become "no links". The only fatal
// cases are a bad seed URL and an HTTP client that cannot be built.
// =============================================================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("Invalid seed URL '{url}': {reason}")]
    InvalidSeed { url: String, reason: String },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, CrawlError>;

impl CrawlError {
    pub fn invalid_seed(url: &str, reason: impl Into<String>) -> Self {
        CrawlError::InvalidSeed {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}
