//! Widget instance lifecycle
//!
//! Constructs and destroys widget instances for a session. Every call into
//! a live widget goes through [`WidgetHandle`], which swallows widget errors:
//! the widget may be mid-teardown or not yet initialized, and neither should
//! take the player down.

use crate::bootstrap::{ApiReady, BootstrapStatus, WidgetBootstrap};
use crate::error::Result;
use crate::types::WidgetOptions;
use crate::widget::{MediaWidget, WidgetApi, WidgetEventSink, WidgetHost};
use std::sync::Arc;
use tracing::{debug, info, warn};
use tubecast_core::VideoId;

/// Element id the widget is mounted into for a video
pub fn container_id(video_id: &VideoId) -> String {
    format!("youtube-player-{}", video_id)
}

/// Element id of the player wrapper that goes fullscreen
pub fn player_container_id(video_id: &VideoId) -> String {
    format!("player-container-{}", video_id)
}

/// Exclusive owner of one widget instance
///
/// Destroyed at most once, either explicitly or on drop.
pub struct WidgetHandle {
    widget: Box<dyn MediaWidget>,
    video_id: VideoId,
    destroyed: bool,
}

impl WidgetHandle {
    pub fn new(widget: Box<dyn MediaWidget>, video_id: VideoId) -> Self {
        Self {
            widget,
            video_id,
            destroyed: false,
        }
    }

    pub fn video_id(&self) -> &VideoId {
        &self.video_id
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Returns true if the command reached the widget
    pub fn play(&self) -> bool {
        self.call("play", |w| w.play()).is_some()
    }

    /// Returns true if the command reached the widget
    pub fn pause(&self) -> bool {
        self.call("pause", |w| w.pause()).is_some()
    }

    /// Returns true if the command reached the widget
    pub fn seek_to(&self, seconds: f64) -> bool {
        self.call("seek_to", |w| w.seek_to(seconds, true)).is_some()
    }

    pub fn current_time(&self) -> Option<f64> {
        self.call("current_time", |w| w.current_time())
    }

    pub fn duration(&self) -> Option<f64> {
        self.call("duration", |w| w.duration())
    }

    /// Tear the widget down; errors are ignored
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        if let Err(e) = self.widget.destroy() {
            debug!(video_id = %self.video_id, error = %e, "Widget destroy failed, ignoring");
        }
    }

    fn call<T>(
        &self,
        method: &'static str,
        f: impl FnOnce(&dyn MediaWidget) -> crate::widget::WidgetResult<T>,
    ) -> Option<T> {
        if self.destroyed {
            return None;
        }
        match f(self.widget.as_ref()) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!(video_id = %self.video_id, method, error = %e, "Widget call failed, ignoring");
                None
            }
        }
    }
}

impl Drop for WidgetHandle {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl std::fmt::Debug for WidgetHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetHandle")
            .field("video_id", &self.video_id)
            .field("destroyed", &self.destroyed)
            .finish_non_exhaustive()
    }
}

/// Builds and releases widgets on behalf of a session
pub struct WidgetLifecycle {
    bootstrap: Arc<WidgetBootstrap>,
    host: Arc<dyn WidgetHost>,
    loader_src: String,
    options: WidgetOptions,
}

impl WidgetLifecycle {
    pub fn new(
        bootstrap: Arc<WidgetBootstrap>,
        host: Arc<dyn WidgetHost>,
        loader_src: impl Into<String>,
        options: WidgetOptions,
    ) -> Self {
        Self {
            bootstrap,
            host,
            loader_src: loader_src.into(),
            options,
        }
    }

    pub fn bootstrap(&self) -> &Arc<WidgetBootstrap> {
        &self.bootstrap
    }

    /// Make sure the API is loaded or loading
    pub fn ensure_bootstrapped(&self) -> Result<BootstrapStatus> {
        self.bootstrap
            .ensure_bootstrapped(self.host.as_ref(), &self.loader_src)
    }

    /// The API now, or a receiver for when it arrives
    pub fn api_ready(&self) -> ApiReady {
        self.bootstrap.subscribe()
    }

    /// Construct a hidden widget for `video_id`
    ///
    /// Returns `None` if the widget refuses; the failure is logged.
    pub fn construct(
        &self,
        api: &dyn WidgetApi,
        video_id: &VideoId,
        events: WidgetEventSink,
    ) -> Option<WidgetHandle> {
        let container = container_id(video_id);
        match api.create(&container, video_id.as_str(), &self.options, events) {
            Ok(widget) => {
                info!(video_id = %video_id, container = %container, "Widget constructed");
                Some(WidgetHandle::new(widget, video_id.clone()))
            }
            Err(e) => {
                warn!(video_id = %video_id, error = %e, "Widget construction failed");
                None
            }
        }
    }

    /// Returns true if the host accepted the request
    pub fn request_fullscreen(&self, video_id: &VideoId) -> bool {
        let element = player_container_id(video_id);
        match self.host.request_fullscreen(&element) {
            Ok(()) => true,
            Err(e) => {
                debug!(video_id = %video_id, error = %e, "Fullscreen request refused");
                false
            }
        }
    }

    /// Returns true if the host accepted the request
    pub fn exit_fullscreen(&self) -> bool {
        match self.host.exit_fullscreen() {
            Ok(()) => true,
            Err(e) => {
                debug!(error = %e, "Fullscreen exit refused");
                false
            }
        }
    }

    /// Destroy a handle, ignoring widget errors
    pub fn release(&self, mut handle: WidgetHandle) {
        debug!(video_id = %handle.video_id(), "Releasing widget");
        handle.destroy();
    }
}

impl std::fmt::Debug for WidgetLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetLifecycle")
            .field("bootstrap", &self.bootstrap)
            .field("loader_src", &self.loader_src)
            .finish_non_exhaustive()
    }
}
