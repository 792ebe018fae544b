//! Tubecast - Playback Management
//!
//! Drives an externally hosted video widget as a podcast player.
//!
//! This crate provides:
//! - Widget API bootstrap (load once per process, fan out the ready hook)
//! - Widget lifecycle (construct/destroy per session, best-effort calls)
//! - Playback state sync (mirror widget events, poll position while playing)
//! - Playlist orchestration (append with metadata lookup, delayed removal,
//!   reorder, auto-advance)
//! - Keyboard shortcut mapping
//!
//! # Architecture
//!
//! `tubecast-playback` never touches a browser directly. The widget, the page
//! hosting it, metadata lookup and navigation are all traits:
//! [`MediaWidget`], [`WidgetApi`], [`WidgetHost`],
//! [`MetadataResolver`](tubecast_core::MetadataResolver) and
//! [`Navigator`](tubecast_core::Navigator).
//!
//! # Example: Wiring a player view
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tubecast_core::{MetadataResolver, Navigator, VideoId};
//! use tubecast_playback::{
//!     PlayerConfig, PlayerSession, PlaylistOrchestrator, WidgetBootstrap, WidgetHost,
//!     WidgetLifecycle,
//! };
//!
//! # async fn mount(
//! #     host: Arc<dyn WidgetHost>,
//! #     resolver: Arc<dyn MetadataResolver>,
//! #     navigator: Arc<dyn Navigator>,
//! # ) -> Result<(), Box<dyn std::error::Error>> {
//! let config = PlayerConfig::default();
//! let lifecycle = WidgetLifecycle::new(
//!     WidgetBootstrap::global(),
//!     host,
//!     config.loader_src.clone(),
//!     config.widget.clone(),
//! );
//!
//! let session = PlayerSession::new(lifecycle, &config);
//! let playlist = PlaylistOrchestrator::new(resolver, navigator, &config);
//!
//! let id = VideoId::parse("dQw4w9WgXcQ")?;
//! playlist.set_current(Some(id.clone()));
//! session.activate(id)?;
//!
//! // Auto-advance when the widget reports the end
//! let _advance = playlist.follow_session(&session);
//!
//! playlist.append("https://youtu.be/9bZkp7q19f0").await?;
//! session.toggle_play();
//! # Ok(())
//! # }
//! ```

mod bootstrap;
mod error;
pub mod events;
pub mod input;
mod lifecycle;
mod playlist;
mod queue;
mod session;
pub mod types;
mod widget;

// Public exports
pub use bootstrap::{ApiReady, BootstrapStatus, WidgetBootstrap};
pub use error::{AppendError, PlaybackError, Result, WidgetError};
pub use events::{PlaylistEvent, SessionEvent};
pub use input::{shortcut_for, Focus, Key, PlayerCommand};
pub use lifecycle::{container_id, player_container_id, WidgetHandle, WidgetLifecycle};
pub use playlist::{EntryStatus, PlaylistEntry, PlaylistOrchestrator};
pub use queue::Playlist;
pub use session::{Activation, PlayerSession};
pub use types::{PlaybackSnapshot, PlayerConfig, PlayerState, WidgetOptions};
pub use widget::{MediaWidget, WidgetApi, WidgetEvent, WidgetEventSink, WidgetHost, WidgetResult};
