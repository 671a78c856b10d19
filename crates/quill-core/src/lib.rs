//! # Quill Core
//!
//! Editor logic shared by every front end.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                        Editor                         │
//! │  ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐ │
//! │  │  Config  │ │  Keymap  │ │ EventBus │ │Highlight │ │
//! │  └──────────┘ └──────────┘ └────▲─────┘ └──────────┘ │
//! │                                 │                     │
//! │  ┌──────────────┐   ┌───────────┴─────┐               │
//! │  │ SharedBuffer │◄──│ AutoSaver thread│               │
//! │  └──────┬───────┘   └───────┬─────────┘               │
//! │         └──────► Persistence ◄┘                       │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! The UI thread and the auto-save thread only meet at `SharedBuffer`,
//! whose lock guarantees each write sees one consistent buffer state.

pub mod autosave;
pub mod command;
pub mod config;
pub mod editor;
pub mod event;
pub mod keymap;
pub mod persistence;

pub use autosave::{AutoSaveOutcome, AutoSaver};
pub use command::Command;
pub use config::{Config, ConfigError};
pub use editor::Editor;
pub use event::{EditorEvent, EventBus};
pub use keymap::{Key, KeyPress, Keymap, Modifiers};
pub use persistence::Persistence;

use std::path::PathBuf;

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Unable to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to save {}: {source}", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No file path associated with the buffer")]
    NoPath,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Buffer error: {0}")]
    Buffer(#[from] quill_buffer::BufferError),

    #[error("Syntax error: {0}")]
    Syntax(#[from] quill_syntax::SyntaxError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_file() {
        let err = CoreError::Open {
            path: PathBuf::from("/tmp/missing.txt"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.to_string().starts_with("Unable to open /tmp/missing.txt: "));

        let err = CoreError::Save {
            path: PathBuf::from("/ro/a.txt"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(err.to_string().starts_with("Unable to save /ro/a.txt: "));
    }

    #[test]
    fn test_source_is_preserved() {
        use std::error::Error;

        let err = CoreError::Save {
            path: PathBuf::from("a.txt"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(err.source().is_some());
    }
}
