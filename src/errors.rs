use std::time::Duration;

use thiserror::Error;

/// Failures while downloading a PDF.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("Connection failed for {url}: {reason}")]
    Connect { url: String, reason: String },

    #[error("HTTP {status} for url {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to read response body from {url}: {reason}")]
    Body { url: String, reason: String },

    #[error("Request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

/// Failures while turning PDF bytes into text.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Failed to parse PDF: {0}")]
    Parse(String),

    #[error("Extraction task aborted: {0}")]
    Aborted(String),
}

#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("Conflict: {0}")]
    Conflict(String),
}

impl From<lopdf::Error> for ExtractionError {
    fn from(err: lopdf::Error) -> Self {
        ExtractionError::Parse(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ExtractionError {
    fn from(err: tokio::task::JoinError) -> Self {
        ExtractionError::Aborted(err.to_string())
    }
}
