use iced::keyboard;
use iced::time::Instant;
use iced::widget::text_editor;
use std::path::PathBuf;

use quill_core::Command;

#[derive(Debug, Clone)]
pub enum Message {
    // File operations
    Open,
    OpenPathChosen(Option<PathBuf>),
    Save,
    SaveAs,
    SavePathChosen(Option<PathBuf>),
    Quit,

    // Edit operations
    Undo,
    Redo,

    // Editor
    EditorAction(text_editor::Action),

    // Search and replace
    ShowReplace,
    FindChanged(String),
    ReplaceChanged(String),
    ReplaceAll,
    HideReplace,

    // View
    ToggleDarkMode,
    DismissError,
    /// Closes the topmost modal
    Escape,

    // Background
    Tick(Instant),
    KeyPressed(keyboard::Key, keyboard::Modifiers),
}

impl From<Command> for Message {
    fn from(command: Command) -> Self {
        match command {
            Command::Open => Message::Open,
            Command::Save => Message::Save,
            Command::SaveAs => Message::SaveAs,
            Command::SearchReplace => Message::ShowReplace,
            Command::ToggleDarkMode => Message::ToggleDarkMode,
            Command::Undo => Message::Undo,
            Command::Redo => Message::Redo,
            Command::Quit => Message::Quit,
        }
    }
}
