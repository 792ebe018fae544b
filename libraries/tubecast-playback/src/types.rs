//! Core types for playback management

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tubecast_core::VideoId;

/// Player state as reported by the widget
///
/// Discriminants match the widget's numeric state codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerState {
    /// Loaded but never started
    Unstarted,

    /// Reached the end of the video
    Ended,

    /// Currently playing
    Playing,

    /// Paused mid-video
    Paused,

    /// Waiting on the network
    Buffering,

    /// Video cued, not started
    Cued,
}

impl PlayerState {
    /// Map a widget state code
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(Self::Unstarted),
            0 => Some(Self::Ended),
            1 => Some(Self::Playing),
            2 => Some(Self::Paused),
            3 => Some(Self::Buffering),
            5 => Some(Self::Cued),
            _ => None,
        }
    }

    /// The widget state code
    pub fn code(self) -> i32 {
        match self {
            Self::Unstarted => -1,
            Self::Ended => 0,
            Self::Playing => 1,
            Self::Paused => 2,
            Self::Buffering => 3,
            Self::Cued => 5,
        }
    }
}

/// Point-in-time copy of a session's mirrored state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    /// Track bound to the session
    pub track_id: Option<VideoId>,

    /// Whether the widget signalled ready
    pub ready: bool,

    /// Last state the widget reported
    pub state: PlayerState,

    /// Local play/pause flag driving the play button
    pub is_playing: bool,

    /// Position in seconds
    pub position: f64,

    /// Duration in seconds (0 until ready)
    pub duration: f64,

    /// Whether the host reports the player container as fullscreen
    pub is_fullscreen: bool,
}

/// Construction parameters handed to the widget
///
/// Defaults produce a hidden, chrome-less player: the app draws its own
/// controls and only wants the audio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetOptions {
    pub height: String,
    pub width: String,
    pub autoplay: u8,
    pub controls: u8,
    pub disablekb: u8,
    pub enablejsapi: u8,
    pub fs: u8,
    pub iv_load_policy: u8,
    pub modestbranding: u8,
    pub playsinline: u8,
    pub rel: u8,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            height: "0".to_string(),
            width: "0".to_string(),
            autoplay: 0,
            controls: 0,
            disablekb: 1,
            enablejsapi: 1,
            fs: 0,
            iv_load_policy: 3,
            modestbranding: 1,
            playsinline: 1,
            rel: 0,
        }
    }
}

/// Configuration for sessions and playlists
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Position polling interval while playing (default: 100ms)
    pub poll_interval_ms: u64,

    /// How long a removed entry lingers for its exit transition (default: 300ms)
    pub removal_grace_ms: u64,

    /// Widget loader script (default: the iframe API)
    pub loader_src: String,

    /// Widget construction parameters
    pub widget: WidgetOptions,

    /// Capacity of the session/playlist event channels (default: 256)
    pub event_capacity: usize,
}

impl PlayerConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn removal_grace(&self) -> Duration {
        Duration::from_millis(self.removal_grace_ms)
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
            removal_grace_ms: 300,
            loader_src: "https://www.youtube.com/iframe_api".to_string(),
            widget: WidgetOptions::default(),
            event_capacity: 256,
        }
    }
}
