//! User-facing editor actions.
//!
//! ## Learning: The Command Pattern
//!
//! Actions are plain enum values. Menus, key bindings and the config file
//! all refer to the same `Command`, and the shell decides how to execute
//! each one (some need a file dialog first).

/// Actions the shell can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Open,
    Save,
    SaveAs,
    SearchReplace,
    ToggleDarkMode,
    Undo,
    Redo,
    Quit,
}

impl Command {
    /// Every command, in menu order.
    pub const ALL: [Command; 8] = [
        Command::Open,
        Command::Save,
        Command::SaveAs,
        Command::Quit,
        Command::Undo,
        Command::Redo,
        Command::SearchReplace,
        Command::ToggleDarkMode,
    ];

    /// Returns the command's display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Command::Open => "Open",
            Command::Save => "Save",
            Command::SaveAs => "Save As",
            Command::SearchReplace => "Search & Replace",
            Command::ToggleDarkMode => "Dark Mode",
            Command::Undo => "Undo",
            Command::Redo => "Redo",
            Command::Quit => "Exit",
        }
    }

    /// Returns the identifier used in config files.
    pub fn id(&self) -> &'static str {
        match self {
            Command::Open => "file.open",
            Command::Save => "file.save",
            Command::SaveAs => "file.save_as",
            Command::SearchReplace => "edit.search_replace",
            Command::ToggleDarkMode => "view.dark_mode",
            Command::Undo => "edit.undo",
            Command::Redo => "edit.redo",
            Command::Quit => "file.quit",
        }
    }

    /// Parses a config identifier.
    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cmd| cmd.id() == id)
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
