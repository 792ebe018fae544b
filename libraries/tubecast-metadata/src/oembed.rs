//! oEmbed resolver.
//!
//! Looks a video up with
//! `GET <base>/oembed?url=https://www.youtube.com/watch?v=<id>&format=json`
//! and derives the thumbnail, embed and stream URLs from the id.

use crate::client::{build_http, normalize_base, status_error};
use crate::error::{MetadataError, Result};
use crate::types::{OEmbedResponse, ResolverConfig};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};
use tubecast_core::types::watch_url;
use tubecast_core::{MetadataResolver, VideoId, VideoInfo};

/// Resolves video metadata from an oEmbed provider.
#[derive(Debug, Clone)]
pub struct OEmbedResolver {
    http: Client,
    base_url: String,
}

impl OEmbedResolver {
    /// Create a resolver for the provider in `config`.
    pub fn new(config: ResolverConfig) -> Result<Self> {
        let base_url = normalize_base(&config.base_url)?;
        let http = build_http(&config)?;
        Ok(Self { http, base_url })
    }

    /// The provider base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch metadata for `id`, keeping the typed error.
    pub async fn fetch(&self, id: &VideoId) -> Result<VideoInfo> {
        let url = format!("{}/oembed", self.base_url);
        debug!(video_id = %id, url = %url, "Requesting oEmbed metadata");

        let response = self
            .http
            .get(&url)
            .query(&[("url", watch_url(id).as_str()), ("format", "json")])
            .send()
            .await?;

        if !response.status().is_success() {
            let err = status_error(response).await;
            warn!(video_id = %id, error = %err, "oEmbed lookup failed");
            return Err(err);
        }

        let body: OEmbedResponse = response.json().await.map_err(|e| {
            MetadataError::Parse(format!("Failed to parse oEmbed response: {}", e))
        })?;

        Ok(VideoInfo::new(id.clone(), body.title, body.author_name))
    }
}

#[async_trait]
impl MetadataResolver for OEmbedResolver {
    async fn resolve(&self, id: &VideoId) -> tubecast_core::Result<VideoInfo> {
        Ok(self.fetch(id).await?)
    }
}
