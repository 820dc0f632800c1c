use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by the public blog generation API
#[derive(Error, Debug)]
pub enum BlogError {
    /// Invalid or incomplete configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failed to load configuration sources
    #[error("Failed to load configuration: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    /// HTTP request to the text generation API failed
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The text generation API returned something unusable
    #[error("Blog content generation failed: {0}")]
    Generation(String),

    /// One of the concurrently generated variations failed
    #[error("Failed to generate blog variation {variation}: {source}")]
    Variation {
        variation: usize,
        source: Box<BlogError>,
    },

    /// Caller supplied input that cannot be processed
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of a single image provider call.
///
/// These never reach the caller of the image pipeline; the resolver logs them
/// and moves on to the next provider.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(StatusCode),

    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

/// Failure while downloading a candidate into the image store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("download failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(StatusCode),

    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}
