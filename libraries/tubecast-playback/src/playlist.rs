//! Playlist orchestration
//!
//! Wraps a [`Playlist`] with the timing and lookups around it:
//! - `append` resolves metadata before an entry appears, with an "adding"
//!   marker while the lookup runs
//! - `remove`/`clear` mark entries "removing" and drop them after a grace
//!   delay so the view can animate them out
//! - `on_track_ended` picks what plays next and hands it to the [`Navigator`]
//!
//! Every mutation works on the queue as it is when the mutation runs, so a
//! reorder during another entry's grace delay cannot shift the wrong entry.

use crate::error::AppendError;
use crate::events::{PlaylistEvent, SessionEvent};
use crate::queue::Playlist;
use crate::session::PlayerSession;
use crate::types::PlayerConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use tubecast_core::{extract_identifier, DisplayKey, MetadataResolver, Navigator, Track, VideoId};

/// Transition state of a queued entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryStatus {
    /// Normal
    Idle,

    /// In its removal grace period
    Removing,
}

/// A queued track with its transition state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    pub track: Track,
    pub status: EntryStatus,
}

/// Ordered queue with auto-advance
///
/// Owns the lifetime of its background work: closing or dropping the
/// orchestrator abandons in-flight lookups and pending removals.
pub struct PlaylistOrchestrator {
    core: Arc<PlaylistCore>,
}

struct PlaylistCore {
    state: Mutex<PlaylistState>,
    resolver: Arc<dyn MetadataResolver>,
    navigator: Arc<dyn Navigator>,
    grace: Duration,
    events: broadcast::Sender<PlaylistEvent>,
    shutdown: CancellationToken,
}

#[derive(Default)]
struct PlaylistState {
    playlist: Playlist,
    current: Option<VideoId>,
    adding: HashSet<VideoId>,
    removing: HashSet<DisplayKey>,
}

impl PlaylistState {
    fn check_addable(&self, id: &VideoId) -> Result<(), AppendError> {
        if self.current.as_ref() == Some(id) {
            return Err(AppendError::AlreadyActive(id.to_string()));
        }
        if self.playlist.contains(id) || self.adding.contains(id) {
            return Err(AppendError::Duplicate(id.to_string()));
        }
        Ok(())
    }

    /// Queue `track` at the tail, refusing anything the playlist would reject
    fn admit(&mut self, track: Track) -> Result<(), AppendError> {
        self.check_addable(&track.id)?;
        let id = track.id.to_string();
        if self.playlist.push(track) {
            Ok(())
        } else {
            Err(AppendError::Duplicate(id))
        }
    }
}

/// Clears an id's "adding" marker if the append future is dropped mid-lookup
struct AddingMarker<'a> {
    core: &'a PlaylistCore,
    id: Option<VideoId>,
}

impl Drop for AddingMarker<'_> {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.core.lock().adding.remove(&id);
            self.core.emit(PlaylistEvent::AddFinished { id, added: false });
        }
    }
}

impl PlaylistOrchestrator {
    pub fn new(
        resolver: Arc<dyn MetadataResolver>,
        navigator: Arc<dyn Navigator>,
        config: &PlayerConfig,
    ) -> Self {
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        Self {
            core: Arc::new(PlaylistCore {
                state: Mutex::new(PlaylistState::default()),
                resolver,
                navigator,
                grace: config.removal_grace(),
                events,
                shutdown: CancellationToken::new(),
            }),
        }
    }

    /// Add a link or bare id to the end of the playlist
    ///
    /// Rejects unparseable input, the currently active track, and ids that
    /// are queued or already being added. Otherwise resolves metadata and
    /// appends on success. A failed lookup leaves the playlist unchanged.
    pub async fn append(&self, input: &str) -> Result<Track, AppendError> {
        let core = self.core.as_ref();
        let id = extract_identifier(input)
            .ok_or_else(|| AppendError::InvalidInput(input.trim().to_string()))?;

        {
            let mut state = core.lock();
            if core.shutdown.is_cancelled() {
                return Err(AppendError::Cancelled);
            }
            state.check_addable(&id)?;
            state.adding.insert(id.clone());
        }
        core.emit(PlaylistEvent::Adding { id: id.clone() });
        let mut marker = AddingMarker {
            core,
            id: Some(id.clone()),
        };

        let resolved = tokio::select! {
            () = core.shutdown.cancelled() => Err(AppendError::Cancelled),
            result = core.resolver.resolve(&id) => result.map_err(|e| AppendError::Resolution {
                id: id.to_string(),
                reason: e.to_string(),
            }),
        };

        let mut state = core.lock();
        state.adding.remove(&id);
        marker.id = None;

        let outcome = resolved.and_then(|info| {
            if core.shutdown.is_cancelled() {
                return Err(AppendError::Cancelled);
            }
            if info.video_id != id {
                return Err(AppendError::Resolution {
                    id: id.to_string(),
                    reason: format!("resolver answered for {}", info.video_id),
                });
            }
            let track = Track::from_info(info);
            state.admit(track.clone())?;
            Ok(track)
        });
        let length = state.playlist.len();
        drop(state);

        match &outcome {
            Ok(track) => {
                info!(video_id = %id, title = track.display_title(), "Added to playlist");
                core.emit(PlaylistEvent::QueueChanged { length });
            }
            Err(e) => warn!(video_id = %id, error = %e, "Append abandoned"),
        }
        core.emit(PlaylistEvent::AddFinished {
            id,
            added: outcome.is_ok(),
        });
        outcome
    }

    /// Remove `id` after the grace delay
    ///
    /// Returns false if it is not queued or already on its way out.
    pub fn remove(&self, id: &VideoId) -> bool {
        let key = {
            let mut state = self.core.lock();
            let Some(key) = state.playlist.find(id).map(|t| t.display_key.clone()) else {
                return false;
            };
            if !state.removing.insert(key.clone()) {
                return false;
            }
            key
        };
        debug!(video_id = %id, "Removing from playlist");
        self.core.emit(PlaylistEvent::Removing {
            display_key: key.clone(),
        });
        self.core.schedule_removal(vec![key]);
        true
    }

    /// Remove every entry after the grace delay, in one step
    ///
    /// Entries appended during the delay are kept. Returns how many entries
    /// were newly marked.
    pub fn clear(&self) -> usize {
        let (keys, newly_marked) = {
            let mut state = self.core.lock();
            let keys: Vec<DisplayKey> = state
                .playlist
                .iter()
                .map(|t| t.display_key.clone())
                .collect();
            let newly_marked: Vec<DisplayKey> = keys
                .iter()
                .filter(|key| state.removing.insert((*key).clone()))
                .cloned()
                .collect();
            (keys, newly_marked)
        };
        if keys.is_empty() {
            return 0;
        }
        for key in &newly_marked {
            self.core.emit(PlaylistEvent::Removing {
                display_key: key.clone(),
            });
        }
        debug!(entries = keys.len(), "Clearing playlist");
        self.core.schedule_removal(keys);
        newly_marked.len()
    }

    /// Move the entry at `from` to `to`
    pub fn reorder(&self, from: usize, to: usize) -> bool {
        let (moved, length) = {
            let mut state = self.core.lock();
            let moved = state.playlist.reorder(from, to);
            (moved, state.playlist.len())
        };
        if moved {
            self.core.emit(PlaylistEvent::QueueChanged { length });
        }
        moved
    }

    /// Auto-advance after `current` finished
    ///
    /// Returns the id handed to the navigator, if any.
    pub fn on_track_ended(&self, current: &VideoId) -> Option<VideoId> {
        self.core.on_track_ended(current)
    }

    /// Make `id` the active track via the navigator
    pub fn activate(&self, id: &VideoId) {
        self.core.activate(id);
    }

    /// Record which track is playing (used to reject self-adds)
    pub fn set_current(&self, id: Option<VideoId>) {
        self.core.lock().current = id;
    }

    pub fn current(&self) -> Option<VideoId> {
        self.core.lock().current.clone()
    }

    pub fn tracks(&self) -> Vec<Track> {
        self.core.lock().playlist.tracks().to_vec()
    }

    /// Queue contents with their transition state
    pub fn entries(&self) -> Vec<PlaylistEntry> {
        let state = self.core.lock();
        state
            .playlist
            .iter()
            .map(|track| PlaylistEntry {
                track: track.clone(),
                status: if state.removing.contains(&track.display_key) {
                    EntryStatus::Removing
                } else {
                    EntryStatus::Idle
                },
            })
            .collect()
    }

    /// Ids whose metadata lookup is in flight
    pub fn pending(&self) -> Vec<VideoId> {
        let mut pending: Vec<VideoId> = self.core.lock().adding.iter().cloned().collect();
        pending.sort();
        pending
    }

    pub fn is_adding(&self, id: &VideoId) -> bool {
        self.core.lock().adding.contains(id)
    }

    pub fn len(&self) -> usize {
        self.core.lock().playlist.len()
    }

    pub fn is_empty(&self) -> bool {
        self.core.lock().playlist.is_empty()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PlaylistEvent> {
        self.core.events.subscribe()
    }

    /// Forward a session's `TrackEnded` events to [`on_track_ended`](Self::on_track_ended)
    ///
    /// Tracks the session activates become `current`, so they cannot be
    /// queued while playing. The task ends when the session closes or the orchestrator does.
    pub fn follow_session(&self, session: &PlayerSession) -> JoinHandle<()> {
        let mut events = session.subscribe();
        let weak: Weak<PlaylistCore> = Arc::downgrade(&self.core);
        let shutdown = self.core.shutdown.clone();
        tokio::spawn(async move {
            loop {
                let event = tokio::select! {
                    () = shutdown.cancelled() => break,
                    event = events.recv() => event,
                };
                match event {
                    Ok(SessionEvent::TrackActivated { track_id, .. }) => {
                        let Some(core) = weak.upgrade() else { break };
                        core.lock().current = Some(track_id);
                    }
                    Ok(SessionEvent::TrackEnded { track_id }) => {
                        let Some(core) = weak.upgrade() else { break };
                        core.on_track_ended(&track_id);
                    }
                    Ok(SessionEvent::Closed) | Err(RecvError::Closed) => break,
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        debug!(skipped, "Auto-advance listener lagged");
                    }
                }
            }
        })
    }

    /// Abandon in-flight lookups and pending removals
    pub fn close(&self) {
        self.core.shutdown.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.core.shutdown.is_cancelled()
    }
}

impl Drop for PlaylistOrchestrator {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for PlaylistOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaylistOrchestrator")
            .field("tracks", &self.tracks())
            .field("pending", &self.pending())
            .finish_non_exhaustive()
    }
}

impl PlaylistCore {
    fn lock(&self) -> MutexGuard<'_, PlaylistState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn emit(&self, event: PlaylistEvent) {
        let _ = self.events.send(event);
    }

    fn on_track_ended(&self, current: &VideoId) -> Option<VideoId> {
        let next = self
            .lock()
            .playlist
            .next_after(current)
            .map(|t| t.id.clone())?;
        info!(finished = %current, next = %next, "Auto-advancing");
        self.emit(PlaylistEvent::Advanced { id: next.clone() });
        self.activate(&next);
        Some(next)
    }

    fn activate(&self, id: &VideoId) {
        self.lock().current = Some(id.clone());
        self.navigator.activate_track(id);
    }

    /// Drop `keys` from the queue once the grace delay passes
    fn schedule_removal(self: &Arc<Self>, keys: Vec<DisplayKey>) {
        let weak = Arc::downgrade(self);
        let shutdown = self.shutdown.clone();
        let grace = self.grace;
        tokio::spawn(async move {
            tokio::select! {
                () = shutdown.cancelled() => return,
                () = tokio::time::sleep(grace) => {}
            }
            let Some(core) = weak.upgrade() else { return };
            let length = {
                let mut state = core.lock();
                for key in &keys {
                    state.playlist.remove_by_key(key);
                    state.removing.remove(key);
                }
                state.playlist.len()
            };
            core.emit(PlaylistEvent::QueueChanged { length });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: char) -> VideoId {
        VideoId::parse(std::iter::repeat(n).take(11).collect::<String>()).unwrap()
    }

    #[test]
    fn admit_rejects_display_key_collision() {
        let mut state = PlaylistState::default();
        let first = Track::new(id('A'));
        let mut second = Track::new(id('B'));
        second.display_key = first.display_key.clone();

        assert!(state.admit(first).is_ok());
        assert_eq!(
            state.admit(second),
            Err(AppendError::Duplicate(id('B').to_string()))
        );
        assert_eq!(state.playlist.len(), 1);
    }

    #[test]
    fn admit_rejects_active_and_queued_ids() {
        let mut state = PlaylistState {
            current: Some(id('C')),
            ..PlaylistState::default()
        };
        assert!(state.admit(Track::new(id('A'))).is_ok());

        assert!(matches!(
            state.admit(Track::new(id('A'))),
            Err(AppendError::Duplicate(_))
        ));
        assert!(matches!(
            state.admit(Track::new(id('C'))),
            Err(AppendError::AlreadyActive(_))
        ));
    }
}
