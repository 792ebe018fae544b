//! Error types for playback management

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The widget loader could not be injected
    #[error("Widget bootstrap failed: {0}")]
    Bootstrap(String),

    /// The session has been torn down
    #[error("Session closed")]
    SessionClosed,

    /// A widget call failed where the caller asked to see it
    #[error("Widget error: {0}")]
    Widget(#[from] WidgetError),
}

/// Failure reported by the external media widget
///
/// The widget may be mid-teardown or not yet initialized; callers inside this
/// crate log these and carry on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    /// The widget (or the method) is not available
    #[error("Widget unavailable")]
    Unavailable,

    /// The widget has already been destroyed
    #[error("Widget destroyed")]
    Destroyed,

    /// The widget threw while handling a call
    #[error("Widget call failed: {0}")]
    Call(String),
}

/// Why an item could not be added to the playlist
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppendError {
    /// Input is neither a bare id nor a supported link
    #[error("Not a recognizable video link or id: {0}")]
    InvalidInput(String),

    /// The id is the track currently playing
    #[error("Video {0} is already playing")]
    AlreadyActive(String),

    /// The id is already queued or being added
    #[error("Video {0} is already in the playlist")]
    Duplicate(String),

    /// Metadata lookup failed
    #[error("Could not resolve video {id}: {reason}")]
    Resolution { id: String, reason: String },

    /// The playlist was closed while the lookup was in flight
    #[error("Playlist closed")]
    Cancelled,
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
