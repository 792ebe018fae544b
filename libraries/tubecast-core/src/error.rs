/// Core error types for Tubecast
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Tubecast
#[derive(Error, Debug)]
pub enum CoreError {
    /// Input is not a valid 11-character video identifier
    #[error("Invalid video id: {0}")]
    InvalidVideoId(String),

    /// Metadata lookup failed (network error and not-found are not distinguished)
    #[error("Metadata resolution failed: {0}")]
    Resolution(String),
}

impl CoreError {
    /// Create a resolution error
    pub fn resolution(msg: impl Into<String>) -> Self {
        Self::Resolution(msg.into())
    }

    /// Create an invalid id error
    pub fn invalid_video_id(input: impl Into<String>) -> Self {
        Self::InvalidVideoId(input.into())
    }
}
