//! External media widget contract
//!
//! The widget is an embeddable player hosted by someone else. We can send it
//! imperative commands and it talks back through events; nothing else about
//! it is visible. Hosts implement these traits over the real widget, tests
//! implement them over fakes.

use crate::error::WidgetError;
use crate::types::{PlayerState, WidgetOptions};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Result of a call into the widget
pub type WidgetResult<T> = std::result::Result<T, WidgetError>;

/// One live widget instance
///
/// Any method may fail if the widget is half torn down or not initialized.
/// Positions and durations are in seconds.
pub trait MediaWidget: Send {
    /// Start or resume playback
    fn play(&self) -> WidgetResult<()>;

    /// Pause playback
    fn pause(&self) -> WidgetResult<()>;

    /// Jump to a position
    ///
    /// `allow_seek_ahead` lets the widget fetch unbuffered data.
    fn seek_to(&self, seconds: f64, allow_seek_ahead: bool) -> WidgetResult<()>;

    /// Current playback position
    fn current_time(&self) -> WidgetResult<f64>;

    /// Total duration
    fn duration(&self) -> WidgetResult<f64>;

    /// Tear the instance down
    fn destroy(&self) -> WidgetResult<()>;
}

/// The loaded widget API, able to construct instances
pub trait WidgetApi: Send + Sync {
    /// Construct a widget for `video_id` inside the element `container_id`
    ///
    /// The widget reports `Ready` and state changes through `events`.
    fn create(
        &self,
        container_id: &str,
        video_id: &str,
        options: &WidgetOptions,
        events: WidgetEventSink,
    ) -> WidgetResult<Box<dyn MediaWidget>>;
}

/// The page (or equivalent) that hosts the widget API
pub trait WidgetHost: Send + Sync {
    /// The API if it is already present in the host
    fn loaded_api(&self) -> Option<Arc<dyn WidgetApi>>;

    /// Insert the loader resource
    ///
    /// The host later reports completion through
    /// [`WidgetBootstrap::mark_ready`](crate::WidgetBootstrap::mark_ready).
    fn inject_loader(&self, src: &str) -> WidgetResult<()>;

    /// Ask the host to show the element `element_id` fullscreen
    ///
    /// The host confirms the change later through
    /// [`PlayerSession::fullscreen_changed`](crate::PlayerSession::fullscreen_changed).
    fn request_fullscreen(&self, element_id: &str) -> WidgetResult<()> {
        let _ = element_id;
        Err(WidgetError::Unavailable)
    }

    /// Leave fullscreen, whatever element holds it
    fn exit_fullscreen(&self) -> WidgetResult<()> {
        Err(WidgetError::Unavailable)
    }
}

/// Event delivered by a widget instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetEvent {
    /// Widget finished loading the video
    Ready,

    /// Widget changed state
    StateChanged(PlayerState),
}

/// Sending half of a widget's event stream
///
/// Events are queued in emission order and processed by the owning session.
#[derive(Debug, Clone)]
pub struct WidgetEventSink {
    tx: mpsc::UnboundedSender<WidgetEvent>,
}

impl WidgetEventSink {
    pub(crate) fn channel() -> (Self, mpsc::UnboundedReceiver<WidgetEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Deliver `Ready`
    pub fn ready(&self) {
        self.emit(WidgetEvent::Ready);
    }

    /// Deliver a state change
    pub fn state_changed(&self, state: PlayerState) {
        self.emit(WidgetEvent::StateChanged(state));
    }

    /// Deliver a raw state code; unknown codes are dropped
    pub fn state_code(&self, code: i32) {
        match PlayerState::from_code(code) {
            Some(state) => self.state_changed(state),
            None => tracing::debug!(code, "Ignoring unknown widget state code"),
        }
    }

    /// Deliver any event
    ///
    /// Returns false once the owning session has stopped listening.
    pub fn emit(&self, event: WidgetEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    /// Whether the owning session still listens
    pub fn is_connected(&self) -> bool {
        !self.tx.is_closed()
    }
}
