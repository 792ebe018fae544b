//! Tubecast Core
//!
//! Platform-agnostic core types, traits, and utilities for Tubecast.
//!
//! This crate provides the building blocks shared by the playback library,
//! the metadata resolvers and the host server.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `VideoId`, `DisplayKey`, `Track`, `VideoInfo`
//! - **Core Traits**: `MetadataResolver`, `Navigator`
//! - **Utilities**: identifier extraction from pasted links, duration formatting
//! - **Error Handling**: Unified `CoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use tubecast_core::{extract_identifier, format_duration, Track};
//!
//! let id = extract_identifier("https://youtu.be/dQw4w9WgXcQ").unwrap();
//! assert_eq!(id.as_str(), "dQw4w9WgXcQ");
//!
//! let track = Track::new(id);
//! assert_eq!(track.display_title(), "dQw4w9WgXcQ");
//!
//! assert_eq!(format_duration(75.0), "1:15");
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod format;
pub mod identifier;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use format::format_duration;
pub use identifier::extract_identifier;
pub use traits::{MetadataResolver, Navigator};
pub use types::{DisplayKey, Track, VideoId, VideoInfo};
