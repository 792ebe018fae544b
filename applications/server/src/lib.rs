//! Tubecast Server Library
//!
//! Host for the Tubecast player: answers video info lookups by fronting an
//! oEmbed provider, so browsers never call the provider directly.
//!
//! This library exposes the router and its parts for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod state;

// Re-export commonly used types for convenience
pub use api::create_router;
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use state::AppState;
