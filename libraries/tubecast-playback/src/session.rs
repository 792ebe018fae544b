//! Player session - playback state synchronization
//!
//! Binds one track to at most one live widget and mirrors what the widget
//! reports into local state:
//!
//! ```text
//! Unstarted ──Ready──▶ idle (duration known)
//!     any ──Playing──▶ is_playing, polling every poll_interval
//! Playing ──Paused───▶ !is_playing, polling stopped
//!  any ──Ended───────▶ !is_playing, position 0, polling stopped, TrackEnded
//! ```
//!
//! Play/pause are confirmed by the widget before local state changes. Seek
//! updates position immediately since the widget does not reliably report a
//! bare seek while paused.
//!
//! All methods must be called from within a Tokio runtime.

use crate::bootstrap::ApiReady;
use crate::error::{PlaybackError, Result};
use crate::events::SessionEvent;
use crate::input::PlayerCommand;
use crate::lifecycle::{WidgetHandle, WidgetLifecycle};
use crate::types::{PlaybackSnapshot, PlayerConfig, PlayerState};
use crate::widget::{WidgetApi, WidgetEvent, WidgetEventSink};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};
use tubecast_core::VideoId;

/// Outcome of [`PlayerSession::activate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Widget constructed
    Active,

    /// Widget API still loading; construction runs when it is ready
    Pending,

    /// The widget refused construction
    Failed,
}

/// Binding between one active track and one live widget
///
/// Dropping the session tears it down.
pub struct PlayerSession {
    core: Arc<SessionCore>,
}

struct SessionCore {
    state: Mutex<SessionState>,
    lifecycle: WidgetLifecycle,
    events: broadcast::Sender<SessionEvent>,
    poll_interval: Duration,
}

struct SessionState {
    track_id: Option<VideoId>,
    widget: Option<WidgetHandle>,
    ready: bool,
    player_state: PlayerState,
    is_playing: bool,
    position: f64,
    duration: f64,
    /// Mirrors the host; only [`PlayerSession::fullscreen_changed`] writes it
    is_fullscreen: bool,
    /// Bumped on every activation; events from older widgets are dropped
    generation: u64,
    poll_task: Option<JoinHandle<()>>,
    pump_task: Option<JoinHandle<()>>,
    pending_task: Option<JoinHandle<()>>,
    closed: bool,
}

impl SessionState {
    fn new() -> Self {
        Self {
            track_id: None,
            widget: None,
            ready: false,
            player_state: PlayerState::Unstarted,
            is_playing: false,
            position: 0.0,
            duration: 0.0,
            is_fullscreen: false,
            generation: 0,
            poll_task: None,
            pump_task: None,
            pending_task: None,
            closed: false,
        }
    }

    fn stop_polling(&mut self) {
        if let Some(task) = self.poll_task.take() {
            task.abort();
        }
    }

    fn abort_background(&mut self) {
        if let Some(task) = self.pump_task.take() {
            task.abort();
        }
        if let Some(task) = self.pending_task.take() {
            task.abort();
        }
    }

    fn reset_playback(&mut self) {
        self.ready = false;
        self.player_state = PlayerState::Unstarted;
        self.is_playing = false;
        self.position = 0.0;
        self.duration = 0.0;
    }
}

impl PlayerSession {
    pub fn new(lifecycle: WidgetLifecycle, config: &PlayerConfig) -> Self {
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        Self {
            core: Arc::new(SessionCore {
                state: Mutex::new(SessionState::new()),
                lifecycle,
                events,
                poll_interval: config.poll_interval(),
            }),
        }
    }

    /// Bind `video_id`, replacing any current widget
    ///
    /// The previous widget is destroyed before a new one is built. If the
    /// widget API is still loading the construction is queued on the ready
    /// hook and `Activation::Pending` is returned.
    pub fn activate(&self, video_id: VideoId) -> Result<Activation> {
        let core = &self.core;
        let mut state = core.lock();
        if state.closed {
            return Err(PlaybackError::SessionClosed);
        }

        state.stop_polling();
        state.abort_background();
        if let Some(previous) = state.widget.take() {
            core.lifecycle.release(previous);
        }
        state.reset_playback();
        state.generation += 1;
        state.track_id = Some(video_id.clone());
        let generation = state.generation;

        core.lifecycle.ensure_bootstrapped()?;

        let activation = match core.lifecycle.api_ready() {
            ApiReady::Ready(api) => {
                if core.install(&mut state, api.as_ref(), generation) {
                    Activation::Active
                } else {
                    Activation::Failed
                }
            }
            ApiReady::Pending(rx) => {
                debug!(video_id = %video_id, "Widget API not loaded, deferring construction");
                let weak = Arc::downgrade(core);
                state.pending_task = Some(tokio::spawn(async move {
                    let Ok(api) = rx.await else { return };
                    let Some(core) = weak.upgrade() else { return };
                    let mut state = core.lock();
                    if state.closed || state.generation != generation {
                        return;
                    }
                    state.pending_task = None;
                    core.install(&mut state, api.as_ref(), generation);
                }));
                Activation::Pending
            }
        };

        core.emit(SessionEvent::TrackActivated {
            track_id: video_id,
            immediate: activation != Activation::Pending,
        });
        Ok(activation)
    }

    /// Ask the widget to play or pause
    ///
    /// No-op until ready. Local state follows the widget's next state event.
    /// Returns true if a command reached the widget.
    pub fn toggle_play(&self) -> bool {
        let state = self.core.lock();
        if !state.ready {
            return false;
        }
        let Some(widget) = state.widget.as_ref() else {
            return false;
        };
        if state.is_playing {
            widget.pause()
        } else {
            widget.play()
        }
    }

    /// Seek to `seconds`, updating local position right away
    ///
    /// No-op until ready. Returns true if the widget accepted the seek.
    pub fn seek(&self, seconds: f64) -> bool {
        if !seconds.is_finite() {
            return false;
        }
        let mut state = self.core.lock();
        if !state.ready {
            return false;
        }
        let issued = state
            .widget
            .as_ref()
            .is_some_and(|widget| widget.seek_to(seconds));
        if issued {
            state.position = seconds;
            self.core
                .emit(SessionEvent::PositionChanged { position: seconds });
        }
        issued
    }

    /// Ask the host to enter or leave fullscreen for the player container
    ///
    /// Works before the widget is ready. The local flag only changes when the
    /// host reports back through [`fullscreen_changed`](Self::fullscreen_changed).
    /// Returns true if the host accepted the request.
    pub fn toggle_fullscreen(&self) -> bool {
        let state = self.core.lock();
        if state.closed {
            return false;
        }
        if state.is_fullscreen {
            return self.core.lifecycle.exit_fullscreen();
        }
        match state.track_id.as_ref() {
            Some(video_id) => self.core.lifecycle.request_fullscreen(video_id),
            None => false,
        }
    }

    /// Host-side fullscreen change notification
    pub fn fullscreen_changed(&self, is_fullscreen: bool) {
        let mut state = self.core.lock();
        if state.closed || state.is_fullscreen == is_fullscreen {
            return;
        }
        state.is_fullscreen = is_fullscreen;
        debug!(is_fullscreen, "Fullscreen changed");
        self.core
            .emit(SessionEvent::FullscreenChanged { is_fullscreen });
    }

    pub fn is_fullscreen(&self) -> bool {
        self.core.lock().is_fullscreen
    }

    /// Run an input command
    pub fn execute(&self, command: PlayerCommand) -> bool {
        match command {
            PlayerCommand::TogglePlay => self.toggle_play(),
            PlayerCommand::Seek(seconds) => self.seek(seconds),
            PlayerCommand::ToggleFullscreen => self.toggle_fullscreen(),
        }
    }

    /// Stop polling, then release the widget
    ///
    /// Runs unconditionally, including when the widget never finished
    /// initializing or throws on every call. Idempotent.
    pub fn teardown(&self) {
        let mut state = self.core.lock();
        if state.closed {
            return;
        }
        state.closed = true;
        state.stop_polling();
        state.abort_background();
        if let Some(handle) = state.widget.take() {
            self.core.lifecycle.release(handle);
        }
        state.ready = false;
        state.is_playing = false;
        info!(video_id = ?state.track_id, "Session torn down");
        self.core.emit(SessionEvent::Closed);
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        let state = self.core.lock();
        PlaybackSnapshot {
            track_id: state.track_id.clone(),
            ready: state.ready,
            state: state.player_state,
            is_playing: state.is_playing,
            position: state.position,
            duration: state.duration,
            is_fullscreen: state.is_fullscreen,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.core.events.subscribe()
    }

    pub fn track_id(&self) -> Option<VideoId> {
        self.core.lock().track_id.clone()
    }

    pub fn is_ready(&self) -> bool {
        self.core.lock().ready
    }

    /// Whether a polling task is alive
    pub fn is_polling(&self) -> bool {
        self.core
            .lock()
            .poll_task
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// Whether a widget is currently held
    pub fn has_widget(&self) -> bool {
        self.core.lock().widget.is_some()
    }

    pub fn is_closed(&self) -> bool {
        self.core.lock().closed
    }
}

impl Drop for PlayerSession {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for PlayerSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerSession")
            .field("snapshot", &self.snapshot())
            .finish_non_exhaustive()
    }
}

impl SessionCore {
    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn emit(&self, event: SessionEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    /// Construct the widget for the current binding and start pumping its events
    fn install(self: &Arc<Self>, state: &mut SessionState, api: &dyn WidgetApi, generation: u64) -> bool {
        let Some(video_id) = state.track_id.clone() else {
            return false;
        };
        let (sink, rx) = WidgetEventSink::channel();
        match self.lifecycle.construct(api, &video_id, sink) {
            Some(handle) => {
                state.widget = Some(handle);
                state.pump_task = Some(self.spawn_pump(rx, generation));
                true
            }
            None => {
                warn!(video_id = %video_id, "No widget for session");
                false
            }
        }
    }

    fn spawn_pump(
        self: &Arc<Self>,
        mut rx: mpsc::UnboundedReceiver<WidgetEvent>,
        generation: u64,
    ) -> JoinHandle<()> {
        let weak: Weak<Self> = Arc::downgrade(self);
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                let Some(core) = weak.upgrade() else { break };
                core.handle_event(generation, event);
            }
        })
    }

    fn handle_event(self: &Arc<Self>, generation: u64, event: WidgetEvent) {
        let mut state = self.lock();
        if state.closed || state.generation != generation {
            debug!(?event, "Dropping event from a retired widget");
            return;
        }

        match event {
            WidgetEvent::Ready => {
                let duration = state.widget.as_ref().and_then(|w| w.duration());
                if let Some(duration) = duration {
                    state.duration = duration;
                    state.ready = true;
                    debug!(duration, "Widget ready");
                    self.emit(SessionEvent::Ready { duration });
                }
            }
            WidgetEvent::StateChanged(new_state) => {
                state.player_state = new_state;
                match new_state {
                    PlayerState::Playing => {
                        state.is_playing = true;
                        self.start_polling(&mut state, generation);
                    }
                    PlayerState::Paused => {
                        state.is_playing = false;
                        state.stop_polling();
                    }
                    PlayerState::Ended => {
                        state.is_playing = false;
                        state.position = 0.0;
                        state.stop_polling();
                    }
                    PlayerState::Unstarted | PlayerState::Buffering | PlayerState::Cued => {}
                }

                self.emit(SessionEvent::StateChanged {
                    state: new_state,
                    is_playing: state.is_playing,
                });

                if new_state == PlayerState::Ended {
                    self.emit(SessionEvent::PositionChanged { position: 0.0 });
                    if let Some(track_id) = state.track_id.clone() {
                        info!(video_id = %track_id, "Track ended");
                        self.emit(SessionEvent::TrackEnded { track_id });
                    }
                }
            }
        }
    }

    /// Replace any running poller with a fresh one
    fn start_polling(self: &Arc<Self>, state: &mut SessionState, generation: u64) {
        state.stop_polling();
        let weak = Arc::downgrade(self);
        let period = self.poll_interval;
        state.poll_task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let Some(core) = weak.upgrade() else { break };
                if !core.poll_position(generation) {
                    break;
                }
            }
        }));
    }

    /// One polling tick; false once the binding it belonged to is gone
    fn poll_position(&self, generation: u64) -> bool {
        let mut state = self.lock();
        if state.closed || state.generation != generation {
            return false;
        }
        if let Some(position) = state.widget.as_ref().and_then(|w| w.current_time()) {
            state.position = position;
            self.emit(SessionEvent::PositionChanged { position });
        }
        true
    }
}
