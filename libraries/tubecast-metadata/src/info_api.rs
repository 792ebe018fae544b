//! Resolver over the host's own info endpoint.
//!
//! Clients that should not call the oEmbed provider directly ask the host
//! (`GET <base>/api/youtube/info?id=<id>`), which answers with a
//! [`VideoInfo`] in camelCase JSON.

use crate::client::{build_http, normalize_base, status_error};
use crate::error::{MetadataError, Result};
use crate::types::ResolverConfig;
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};
use tubecast_core::{MetadataResolver, VideoId, VideoInfo};

/// Resolves video metadata through a Tubecast host.
#[derive(Debug, Clone)]
pub struct InfoApiResolver {
    http: Client,
    base_url: String,
}

impl InfoApiResolver {
    pub fn new(config: ResolverConfig) -> Result<Self> {
        let base_url = normalize_base(&config.base_url)?;
        let http = build_http(&config)?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch(&self, id: &VideoId) -> Result<VideoInfo> {
        let url = format!("{}/api/youtube/info", self.base_url);
        debug!(video_id = %id, url = %url, "Requesting video info from host");

        let response = self
            .http
            .get(&url)
            .query(&[("id", id.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let err = status_error(response).await;
            warn!(video_id = %id, error = %err, "Host info lookup failed");
            return Err(err);
        }

        let info: VideoInfo = response
            .json()
            .await
            .map_err(|e| MetadataError::Parse(format!("Failed to parse video info: {}", e)))?;

        if &info.video_id != id {
            return Err(MetadataError::Parse(format!(
                "Host answered for {} instead of {}",
                info.video_id, id
            )));
        }
        Ok(info)
    }
}

#[async_trait]
impl MetadataResolver for InfoApiResolver {
    async fn resolve(&self, id: &VideoId) -> tubecast_core::Result<VideoInfo> {
        Ok(self.fetch(id).await?)
    }
}
