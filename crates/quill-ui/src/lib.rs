//! # Quill UI
//!
//! Desktop shell built on the iced framework.
//!
//! ## Architecture
//!
//! The UI follows the Elm architecture (TEA):
//! - **Model**: `App`, which owns the `quill_core::Editor`
//! - **Message**: Events that can occur
//! - **Update**: (state, message) -> new state plus follow-up tasks
//! - **View**: state -> UI elements
//!
//! The auto-save thread never touches the UI. It publishes events, and a
//! timer subscription drains them into the status bar.

pub mod app;
pub mod highlighter;
pub mod theme;

pub use app::{run, App, Flags};
pub use theme::Theme;
