/// Shared application state
use crate::config::ServerConfig;
use crate::error::Result;
use std::sync::Arc;
use tubecast_core::MetadataResolver;
use tubecast_metadata::OEmbedResolver;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<dyn MetadataResolver>,
}

impl AppState {
    pub fn new(resolver: Arc<dyn MetadataResolver>) -> Self {
        Self { resolver }
    }

    /// State backed by the oEmbed provider from `config`
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let resolver = OEmbedResolver::new(config.oembed.resolver_config())?;
        Ok(Self::new(Arc::new(resolver)))
    }
}
