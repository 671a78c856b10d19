//! Editor configuration.
//!
//! ## Learning: Serde for Serialization
//!
//! The `#[derive(Serialize, Deserialize)]` macro generates code to convert
//! structs to/from TOML. `#[serde(default)]` fills missing fields from
//! `Default::default()`, so a config file only needs the keys it changes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main editor configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Editor behavior settings
    pub editor: EditorConfig,

    /// File handling settings
    pub files: FileConfig,

    /// UI appearance settings
    pub ui: UiConfig,

    /// Highlighting settings
    pub syntax: SyntaxConfig,

    /// Keyboard settings
    pub keyboard: KeyboardConfig,
}

impl Config {
    /// Loads config from the default location, falling back to defaults.
    pub fn load() -> Self {
        match Self::load_from_default_path() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring config: {}", e);
                Self::default()
            }
        }
    }

    /// Loads config from a file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Loads from the default config path.
    fn load_from_default_path() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default config file path.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("quill").join("config.toml"))
    }

    /// Writes the config to `path`, creating parent directories.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the auto-save interval, or `None` when auto-save is off.
    pub fn auto_save_interval(&self) -> Option<Duration> {
        match self.editor.auto_save_interval_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

/// Editor behavior configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Seconds between auto-saves (0 to disable)
    pub auto_save_interval_secs: u64,

    /// Undo history limit
    pub undo_limit: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            auto_save_interval_secs: crate::autosave::DEFAULT_INTERVAL.as_secs(),
            undo_limit: 1000,
        }
    }
}

/// File handling configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Write to a temporary file and rename it into place
    pub atomic_write: bool,

    /// Extension offered by the save dialog
    pub default_extension: String,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            atomic_write: true,
            default_extension: "txt".to_string(),
        }
    }
}

/// UI appearance configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Start with the dark palette
    pub dark_mode: bool,

    /// Font size in points
    pub font_size: f32,

    /// Show the line-number gutter
    pub line_numbers: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            dark_mode: false,
            font_size: 15.0,
            line_numbers: true,
        }
    }
}

/// Keyword highlighting configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntaxConfig {
    /// Keyword set used when the file extension says nothing
    pub language: String,

    /// Pick the keyword set from the file extension when it is known
    pub detect_from_extension: bool,
}

impl Default for SyntaxConfig {
    fn default() -> Self {
        Self {
            language: "python".to_string(),
            detect_from_extension: true,
        }
    }
}

/// Keyboard configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardConfig {
    /// Custom key bindings, e.g. `"ctrl+k" = "file.save"`
    pub bindings: HashMap<String, String>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config directory not found")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
