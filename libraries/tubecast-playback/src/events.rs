//! Playback Events
//!
//! Event-based communication for UI synchronization.
//! Events are emitted at key points:
//! - Widget readiness and state changes
//! - Position updates (polled while playing, or optimistic after a seek)
//! - Track completion (drives auto-advance)
//! - Playlist mutations and their transition markers

use crate::types::PlayerState;
use serde::{Deserialize, Serialize};
use tubecast_core::{DisplayKey, VideoId};

/// Events emitted by a player session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A widget is being constructed for this track
    TrackActivated {
        track_id: VideoId,
        /// False when construction waits for the widget API to load
        immediate: bool,
    },

    /// Widget reported ready and its duration was read
    Ready {
        /// Duration in seconds
        duration: f64,
    },

    /// Widget reported a new state
    StateChanged {
        state: PlayerState,
        is_playing: bool,
    },

    /// Position changed (polled, or optimistic after seek)
    PositionChanged {
        /// Position in seconds
        position: f64,
    },

    /// Host entered or left fullscreen
    FullscreenChanged { is_fullscreen: bool },

    /// Track reached its end
    TrackEnded { track_id: VideoId },

    /// Session torn down; no further events follow
    Closed,
}

/// Events emitted by a playlist orchestrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaylistEvent {
    /// Metadata lookup started for an id
    Adding { id: VideoId },

    /// Lookup finished (successfully or not); the pending marker is gone
    AddFinished { id: VideoId, added: bool },

    /// Entry entered its removal grace period
    Removing { display_key: DisplayKey },

    /// Queue changed (tracks added/removed/reordered)
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// Auto-advance picked a track
    Advanced { id: VideoId },
}
