/// Track domain types
use crate::types::{DisplayKey, VideoId};
use serde::{Deserialize, Serialize};

/// One playable item in a playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// External video identifier
    pub id: VideoId,

    /// Per-slot key, unique within a playlist
    pub display_key: DisplayKey,

    /// Video title, absent until metadata resolves
    pub title: Option<String>,

    /// Channel / author name
    pub author: Option<String>,

    /// Thumbnail image URL
    pub thumbnail_url: Option<String>,
}

impl Track {
    /// Create a track with no metadata and a freshly generated display key
    pub fn new(id: VideoId) -> Self {
        Self {
            display_key: DisplayKey::generate(&id),
            id,
            title: None,
            author: None,
            thumbnail_url: None,
        }
    }

    /// Create a track from a resolved metadata record
    pub fn from_info(info: VideoInfo) -> Self {
        Self {
            display_key: DisplayKey::generate(&info.video_id),
            id: info.video_id,
            title: Some(info.title),
            author: Some(info.author),
            thumbnail_url: Some(info.thumbnail),
        }
    }

    /// Title for display; the id stands in until metadata arrives
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(self.id.as_str())
    }
}

/// Descriptive record for a video, as returned by a metadata resolver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoInfo {
    pub video_id: VideoId,
    pub title: String,
    pub author: String,
    pub thumbnail: String,
    pub embed_url: String,
    pub stream_url: String,
}

impl VideoInfo {
    /// Build a record from title and author, deriving the well-known URLs from the id
    pub fn new(video_id: VideoId, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            thumbnail: thumbnail_url(&video_id),
            embed_url: embed_url(&video_id),
            stream_url: watch_url(&video_id),
            video_id,
            title: title.into(),
            author: author.into(),
        }
    }
}

/// Canonical watch page for a video
pub fn watch_url(id: &VideoId) -> String {
    format!("https://www.youtube.com/watch?v={}", id)
}

/// Embeddable player URL with the JS API enabled
pub fn embed_url(id: &VideoId) -> String {
    format!("https://www.youtube.com/embed/{}?enablejsapi=1", id)
}

/// Highest resolution thumbnail
pub fn thumbnail_url(id: &VideoId) -> String {
    format!("https://img.youtube.com/vi/{}/maxresdefault.jpg", id)
}
