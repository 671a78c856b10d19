//! Keyboard shortcuts.
//!
//! Shortcuts are single key presses with modifiers (`Ctrl+S`). The shell
//! translates toolkit key events into [`KeyPress`] values and asks the
//! [`Keymap`] which [`Command`] they trigger.

use crate::command::Command;
use crate::config::Config;
use std::collections::HashMap;

/// Keyboard modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    /// No modifiers pressed.
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
        shift: false,
    };

    /// Ctrl modifier.
    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        alt: false,
        shift: false,
    };

    /// Ctrl+Shift.
    pub const CTRL_SHIFT: Modifiers = Modifiers {
        ctrl: true,
        alt: false,
        shift: true,
    };

    /// Returns true if no modifiers are pressed.
    pub fn is_empty(&self) -> bool {
        !self.ctrl && !self.alt && !self.shift
    }
}

impl std::fmt::Display for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.alt {
            parts.push("Alt");
        }
        if self.shift {
            parts.push("Shift");
        }
        write!(f, "{}", parts.join("+"))
    }
}

/// A key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable key, stored lowercase
    Char(char),
    Enter,
    Escape,
    Tab,
    F(u8),
}

impl Key {
    /// Parses a key from a string.
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "enter" | "return" => Some(Key::Enter),
            "escape" | "esc" => Some(Key::Escape),
            "tab" => Some(Key::Tab),
            _ if lower.starts_with('f') && lower.len() > 1 && lower.len() <= 3 => {
                lower[1..].parse().ok().map(Key::F)
            }
            _ => {
                let mut chars = lower.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Key::Char(c)),
                    _ => None,
                }
            }
        }
    }

    /// Builds a character key, normalising case.
    pub fn char(c: char) -> Self {
        Key::Char(c.to_lowercase().next().unwrap_or(c))
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{}", c.to_uppercase()),
            Key::Enter => write!(f, "Enter"),
            Key::Escape => write!(f, "Escape"),
            Key::Tab => write!(f, "Tab"),
            Key::F(n) => write!(f, "F{}", n),
        }
    }
}

/// A key press event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPress {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyPress {
    /// Creates a new key press.
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Parses a binding string like "ctrl+s" or "ctrl+shift+s".
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split('+').map(str::trim).collect();
        let (key_str, mod_parts) = parts.split_last()?;
        let key = Key::parse(key_str)?;

        let mut modifiers = Modifiers::NONE;
        for part in mod_parts {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => modifiers.ctrl = true,
                "alt" | "option" => modifiers.alt = true,
                "shift" => modifiers.shift = true,
                _ => return None,
            }
        }

        Some(Self { key, modifiers })
    }
}

impl std::fmt::Display for KeyPress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.modifiers.is_empty() {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{}+{}", self.modifiers, self.key)
        }
    }
}

/// Shortcut table.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<KeyPress, Command>,
}

impl Keymap {
    /// Creates a keymap with default bindings.
    pub fn new() -> Self {
        let mut keymap = Self {
            bindings: HashMap::new(),
        };
        keymap.add_default_bindings();
        keymap
    }

    /// Creates a keymap from configuration.
    ///
    /// User bindings override defaults on the same key. Entries that do not
    /// parse are skipped with a warning.
    pub fn from_config(config: &Config) -> Self {
        let mut keymap = Self::new();

        for (key_str, cmd_str) in &config.keyboard.bindings {
            match (KeyPress::parse(key_str), Command::parse(cmd_str)) {
                (Some(key), Some(cmd)) => keymap.bind(key, cmd),
                (None, _) => tracing::warn!("Ignoring binding with unknown key: {}", key_str),
                (_, None) => tracing::warn!("Ignoring binding to unknown command: {}", cmd_str),
            }
        }

        keymap
    }

    fn add_default_bindings(&mut self) {
        use crate::command::Command::*;

        let bindings = [
            (Key::Char('o'), Modifiers::CTRL, Open),
            (Key::Char('s'), Modifiers::CTRL, Save),
            (Key::Char('s'), Modifiers::CTRL_SHIFT, SaveAs),
            (Key::Char('f'), Modifiers::CTRL, SearchReplace),
            (Key::Char('z'), Modifiers::CTRL, Undo),
            (Key::Char('y'), Modifiers::CTRL, Redo),
            (Key::Char('q'), Modifiers::CTRL, Quit),
        ];

        for (key, modifiers, cmd) in bindings {
            self.bind(KeyPress::new(key, modifiers), cmd);
        }
    }

    /// Adds or replaces a binding.
    pub fn bind(&mut self, key: KeyPress, command: Command) {
        self.bindings.insert(key, command);
    }

    /// Returns the command bound to a key press.
    pub fn lookup(&self, key: &KeyPress) -> Option<Command> {
        self.bindings.get(key).copied()
    }

    /// Returns a shortcut label for menus, e.g. "Ctrl+O".
    ///
    /// When several keys trigger the command the shortest label wins.
    pub fn shortcut_for(&self, command: Command) -> Option<String> {
        self.bindings
            .iter()
            .filter(|(_, cmd)| **cmd == command)
            .map(|(key, _)| key.to_string())
            .min_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)))
    }

    /// Returns the number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new()
    }
}
