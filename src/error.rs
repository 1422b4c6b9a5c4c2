// src/error.rs
// =============================================================================
// Error types shared by the crawler and the HTTP API.
//
// There are two very different kinds of failure:
// - CrawlError: something that stops a crawl before it starts (bad seed URL)
//   or an unexpected failure the API reports as a server error
// - PageError: one page could not be fetched; the crawl logs it and moves on
//
// Rust concepts:
// - thiserror: derive Display and std::error::Error for our enums
// - #[from]: automatic conversion so `?` works across error types
// =============================================================================

use thiserror::Error;

// Errors a caller of the crawl API can see
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The seed URL is malformed, lacks an http/https scheme, or has no host
    #[error("invalid URL: {0}")]
    InvalidInput(String),

    /// Anything we did not anticipate (e.g. the crawl task panicked)
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

// Why a single page contributed nothing to the crawl
//
// These never escape the fetcher: they are logged and the page is treated as
// having zero images and zero links.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("request timed out")]
    Timeout,

    #[error("HTTP {0}")]
    Status(u16),

    #[error("not HTML (content-type: {0})")]
    NotHtml(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("{0}")]
    Network(String),
}

impl From<reqwest::Error> for PageError {
    // Sorts reqwest errors into the cases we care about when logging
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            PageError::Timeout
        } else if error.is_connect() {
            PageError::Connect(error.to_string())
        } else {
            PageError::Network(error.to_string())
        }
    }
}
