//! Shared HTTP plumbing for the resolvers.

use crate::error::{MetadataError, Result};
use crate::types::{ErrorBody, ResolverConfig};
use reqwest::{Client, Response};
use std::time::Duration;
use url::Url;

/// Validate and normalize a base URL (http or https, no trailing slash).
pub(crate) fn normalize_base(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(MetadataError::InvalidUrl("URL cannot be empty".into()));
    }

    let parsed = Url::parse(trimmed).map_err(|e| MetadataError::InvalidUrl(e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(MetadataError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }

    Ok(trimmed.to_string())
}

/// HTTP client with the timeouts from `config`.
pub(crate) fn build_http(config: &ResolverConfig) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .user_agent(format!("Tubecast/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(MetadataError::Request)
}

/// Turn a non-success response into `MetadataError::Status`.
///
/// Uses the `{"error": ...}` message when the body carries one.
pub(crate) async fn status_error(response: Response) -> MetadataError {
    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or(text);
    MetadataError::Status { status, message }
}
