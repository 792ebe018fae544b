/// ID types for Tubecast entities
use crate::error::{CoreError, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

/// Length of a YouTube video identifier
pub const VIDEO_ID_LEN: usize = 11;

/// External video identifier
///
/// Always exactly 11 characters drawn from `[A-Za-z0-9_-]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VideoId(String);

impl VideoId {
    /// Validate and wrap an identifier
    pub fn parse(id: impl AsRef<str>) -> Result<Self> {
        let id = id.as_ref();
        if Self::is_valid(id) {
            Ok(Self(id.to_string()))
        } else {
            Err(CoreError::invalid_video_id(id))
        }
    }

    /// Check whether a string is shaped like a video identifier
    pub fn is_valid(id: &str) -> bool {
        id.len() == VIDEO_ID_LEN
            && id
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for VideoId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for VideoId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self> {
        if Self::is_valid(&value) {
            Ok(Self(value))
        } else {
            Err(CoreError::InvalidVideoId(value))
        }
    }
}

impl From<VideoId> for String {
    fn from(id: VideoId) -> Self {
        id.0
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Per-slot key for a playlist entry
///
/// Distinct from the video id so the same video keeps a stable slot identity
/// for UI diffing. Generated as `<id>-<unix millis>-<sequence>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayKey(String);

static DISPLAY_KEY_SEQ: AtomicU64 = AtomicU64::new(0);

impl DisplayKey {
    /// Create a display key from an existing string
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Generate a fresh key for an entry being inserted now
    pub fn generate(id: &VideoId) -> Self {
        let seq = DISPLAY_KEY_SEQ.fetch_add(1, Ordering::Relaxed);
        Self(format!("{}-{}-{}", id, Utc::now().timestamp_millis(), seq))
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
