//! Error types for the metadata resolvers.

use thiserror::Error;
use tubecast_core::CoreError;

/// Errors that can occur while looking up video metadata.
#[derive(Error, Debug)]
pub enum MetadataError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Upstream returned a non-success status
    #[error("Upstream error ({status}): {message}")]
    Status { status: u16, message: String },

    /// Failed to parse the response body
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Invalid base URL
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

impl From<MetadataError> for CoreError {
    fn from(err: MetadataError) -> Self {
        CoreError::resolution(err.to_string())
    }
}

/// Result type for metadata operations.
pub type Result<T> = std::result::Result<T, MetadataError>;
