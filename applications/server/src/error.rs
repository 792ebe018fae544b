/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Video ID is required")]
    MissingVideoId,

    #[error("Metadata lookup failed: {0}")]
    Lookup(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<tubecast_core::CoreError> for ServerError {
    fn from(err: tubecast_core::CoreError) -> Self {
        ServerError::Lookup(err.to_string())
    }
}

/// Only raised while building the resolver from configuration
impl From<tubecast_metadata::MetadataError> for ServerError {
    fn from(err: tubecast_metadata::MetadataError) -> Self {
        ServerError::Config(err.to_string())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ServerError::MissingVideoId => {
                (StatusCode::BAD_REQUEST, "Video ID is required".to_string())
            }
            ServerError::Lookup(ref msg) => {
                tracing::error!("Lookup error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to fetch video information".to_string(),
                )
            }
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
