//! Error types for the catalog client

use thiserror::Error;

/// Errors returned by the catalog client
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The configured endpoint could not be parsed as a URL
    #[error("Invalid endpoint URL '{0}'")]
    InvalidUrl(String),

    /// The server could not be reached
    #[error("Connection error: {0}")]
    Connection(String),

    /// The request did not complete within the configured timeout
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// The server answered with a non-success status code
    #[error("Server returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not a product list envelope
    #[error("Failed to decode product list: {0}")]
    Decode(String),

    /// Any other transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Decode(err.to_string())
    }
}
