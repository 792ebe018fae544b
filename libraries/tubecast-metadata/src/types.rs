//! Wire types and resolver configuration.

use serde::{Deserialize, Serialize};

/// Default oEmbed provider
pub const DEFAULT_OEMBED_BASE: &str = "https://www.youtube.com";

/// Connection settings shared by the HTTP resolvers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Base URL requests are made against (no trailing slash needed)
    pub base_url: String,

    /// Whole-request timeout in seconds
    pub timeout_secs: u64,

    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl ResolverConfig {
    /// Config pointing at `base_url` with default timeouts.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OEMBED_BASE.to_string(),
            timeout_secs: 10,
            connect_timeout_secs: 5,
        }
    }
}

/// The subset of an oEmbed response we use.
#[derive(Debug, Clone, Deserialize)]
pub struct OEmbedResponse {
    pub title: String,
    pub author_name: String,
}

/// Error body returned by the host info API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
