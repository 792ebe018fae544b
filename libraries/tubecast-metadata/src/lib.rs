//! Tubecast Metadata
//!
//! HTTP implementations of [`MetadataResolver`](tubecast_core::MetadataResolver).
//!
//! - [`OEmbedResolver`] asks an oEmbed provider (YouTube by default) for
//!   title and author.
//! - [`InfoApiResolver`] asks a Tubecast host's `/api/youtube/info`
//!   endpoint, which itself fronts the oEmbed provider.
//!
//! # Example
//!
//! ```no_run
//! use tubecast_core::{MetadataResolver, VideoId};
//! use tubecast_metadata::{OEmbedResolver, ResolverConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = OEmbedResolver::new(ResolverConfig::default())?;
//! let info = resolver.resolve(&VideoId::parse("dQw4w9WgXcQ")?).await?;
//! println!("{} by {}", info.title, info.author);
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod info_api;
mod oembed;
mod types;

pub use error::{MetadataError, Result};
pub use info_api::InfoApiResolver;
pub use oembed::OEmbedResolver;
pub use types::{ErrorBody, OEmbedResponse, ResolverConfig, DEFAULT_OEMBED_BASE};
