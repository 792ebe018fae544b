//! Keyboard shortcuts
//!
//! Space toggles playback anywhere on the page except while the user is
//! typing in a text field.

use serde::{Deserialize, Serialize};

/// Command the view layer sends to a session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlayerCommand {
    TogglePlay,
    /// Seek to a position in seconds
    Seek(f64),
    /// Enter fullscreen, or leave it if already there
    ToggleFullscreen,
}

/// Key pressed, as far as shortcuts care
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Other,
}

impl Key {
    /// Map a DOM-style key name (`" "`, `"Space"`, `"Spacebar"`)
    pub fn from_name(name: &str) -> Self {
        match name {
            " " | "Space" | "Spacebar" => Self::Space,
            _ => Self::Other,
        }
    }
}

/// What currently holds keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Text input, textarea or contenteditable
    TextField,
    Other,
}

/// Map a key press to a player command
pub fn shortcut_for(key: Key, focus: Focus) -> Option<PlayerCommand> {
    match (key, focus) {
        (Key::Space, Focus::Other) => Some(PlayerCommand::TogglePlay),
        _ => None,
    }
}
