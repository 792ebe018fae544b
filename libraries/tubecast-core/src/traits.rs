/// Collaborator traits for Tubecast
///
/// The playback core decides *what* should happen; these traits are how it
/// asks the outside world to look something up or to present a track.
use crate::error::Result;
use crate::types::{VideoId, VideoInfo};
use async_trait::async_trait;

/// Looks up descriptive metadata for a video
///
/// Implementers fetch title, author and thumbnail for an id. Network errors
/// and not-found are both reported as [`CoreError::Resolution`](crate::CoreError::Resolution).
#[async_trait]
pub trait MetadataResolver: Send + Sync {
    /// Resolve metadata for a single video
    async fn resolve(&self, id: &VideoId) -> Result<VideoInfo>;
}

/// Hands a track to the host application to become the active one
///
/// How that is realized (route change, new player view) is up to the host.
pub trait Navigator: Send + Sync {
    /// Request that `id` becomes the active track
    fn activate_track(&self, id: &VideoId);
}
