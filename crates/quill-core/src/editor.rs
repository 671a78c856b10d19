//! Main editor orchestration.
//!
//! ## Learning: The Facade Pattern
//!
//! `Editor` acts as a facade, providing a simple interface to
//! complex subsystems. The shell only talks to `Editor`; the buffer lock,
//! the persistence mode and the auto-save thread stay behind it.

use std::path::{Path, PathBuf};

use quill_buffer::{LineEnding, SharedBuffer, TextBuffer};
use quill_syntax::{detect_language, HighlightSpan, KeywordHighlighter};
use tokio::sync::broadcast;

use crate::autosave::AutoSaver;
use crate::config::Config;
use crate::event::{EditorEvent, EventBus};
use crate::keymap::Keymap;
use crate::persistence::Persistence;
use crate::{CoreError, CoreResult};

const APP_TITLE: &str = "Text Editor";

/// The main editor state.
///
/// ## Thread Safety
///
/// `Editor` is owned by the UI thread. The only state shared with the
/// auto-save thread is the [`SharedBuffer`], and every access to it goes
/// through its lock.
pub struct Editor {
    /// Text content and its file association
    buffer: SharedBuffer,

    /// How files are written
    persistence: Persistence,

    /// Keyword matcher, `None` when the configured language is unknown
    highlighter: Option<KeywordHighlighter>,

    /// Editor configuration
    config: Config,

    /// Key bindings
    keymap: Keymap,

    /// Event bus for notifications
    event_bus: EventBus,

    /// Background save loop, if running
    auto_saver: Option<AutoSaver>,
}

impl Editor {
    /// Creates a new editor instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an editor with custom configuration.
    pub fn with_config(config: Config) -> Self {
        let buffer = SharedBuffer::new(TextBuffer::with_history_limit(config.editor.undo_limit));
        let mut editor = Self {
            buffer,
            persistence: Persistence::new(config.files.atomic_write),
            highlighter: None,
            keymap: Keymap::from_config(&config),
            config,
            event_bus: EventBus::new(),
            auto_saver: None,
        };
        editor.refresh_highlighter();
        editor
    }

    // ==================== Content ====================

    /// Returns the current content.
    pub fn text(&self) -> String {
        self.buffer.text()
    }

    /// Replaces the content after an edit in the text widget.
    pub fn set_text(&mut self, text: &str) {
        self.buffer.set_text(text);
    }

    /// Replaces every literal occurrence of `find` with `replace`.
    ///
    /// An empty `find` changes nothing. Returns the number of replacements.
    pub fn replace_all(&mut self, find: &str, replace: &str) -> usize {
        let count = self.buffer.write().replace_all(find, replace);
        tracing::debug!(find, replace, count, "Replace all");
        if count > 0 {
            self.emit(EditorEvent::ContentReplaced { count });
        }
        count
    }

    /// Counts the literal occurrences `replace_all` would substitute.
    pub fn match_count(&self, find: &str) -> usize {
        self.buffer.read().find_all(find).len()
    }

    /// Undoes the last change.
    pub fn undo(&mut self) -> CoreResult<()> {
        self.buffer.write().undo()?;
        Ok(())
    }

    /// Redoes the last undone change.
    pub fn redo(&mut self) -> CoreResult<()> {
        self.buffer.write().redo()?;
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        self.buffer.read().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.buffer.read().can_redo()
    }

    // ==================== Files ====================

    /// Loads a file into the buffer.
    ///
    /// On failure the buffer keeps its content and path.
    pub fn open(&mut self, path: impl AsRef<Path>) -> CoreResult<()> {
        let path = path.as_ref();
        let text = self.persistence.load(path)?;

        self.buffer.write().load(&text, path);
        self.refresh_highlighter();

        tracing::info!("Opened {}", path.display());
        self.emit(EditorEvent::Opened(path.to_path_buf()));
        Ok(())
    }

    /// Writes the buffer to its associated file.
    ///
    /// Returns [`CoreError::NoPath`] when the buffer has never been saved;
    /// the shell answers that with a save-as prompt.
    pub fn save(&mut self) -> CoreResult<PathBuf> {
        let path = {
            let mut buffer = self.buffer.write();
            let path = buffer
                .file_path()
                .map(Path::to_path_buf)
                .ok_or(CoreError::NoPath)?;
            self.persistence.store(&path, &buffer.disk_text())?;
            buffer.mark_saved();
            path
        };

        tracing::info!("Saved {}", path.display());
        self.emit(EditorEvent::Saved(path.clone()));
        Ok(path)
    }

    /// Writes the buffer to `path` and associates it with the buffer.
    ///
    /// The association only changes once the write succeeded.
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> CoreResult<()> {
        let path = path.as_ref();
        {
            let mut buffer = self.buffer.write();
            self.persistence.store(path, &buffer.disk_text())?;
            buffer.set_file_path(path);
            buffer.mark_saved();
        }
        self.refresh_highlighter();

        tracing::info!("Saved as {}", path.display());
        self.emit(EditorEvent::Saved(path.to_path_buf()));
        Ok(())
    }

    /// Returns the associated file path.
    pub fn file_path(&self) -> Option<PathBuf> {
        self.buffer.file_path()
    }

    /// Returns true if there are unsaved changes.
    pub fn is_modified(&self) -> bool {
        self.buffer.is_modified()
    }

    // ==================== Display ====================

    /// Window title derived from the associated path.
    pub fn title(&self) -> String {
        let buffer = self.buffer.read();
        let mut title = match buffer.file_path() {
            Some(path) => format!("{} - {}", APP_TITLE, path.display()),
            None => APP_TITLE.to_string(),
        };
        if buffer.is_modified() {
            title.push_str(" *");
        }
        title
    }

    /// Gutter text for the current content.
    pub fn line_numbers(&self) -> String {
        self.buffer.read().line_numbers()
    }

    /// Line ending the file uses on disk.
    pub fn line_ending(&self) -> LineEnding {
        self.buffer.read().line_ending()
    }

    /// Keyword spans over the whole content.
    pub fn highlights(&self) -> Vec<HighlightSpan> {
        match &self.highlighter {
            Some(highlighter) => highlighter.highlight(&self.buffer.read().text()),
            None => Vec::new(),
        }
    }

    /// Name of the active keyword set.
    pub fn language(&self) -> Option<&'static str> {
        self.highlighter.as_ref().map(|h| h.language())
    }

    /// Picks the keyword set from the file extension or the configuration.
    fn refresh_highlighter(&mut self) {
        let detected = if self.config.syntax.detect_from_extension {
            self.buffer
                .file_path()
                .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
                .and_then(|name| detect_language(&name))
        } else {
            None
        };
        let language = detected.unwrap_or(self.config.syntax.language.as_str());

        if self.language() == Some(language) {
            return;
        }

        self.highlighter = match KeywordHighlighter::new(language) {
            Ok(highlighter) => Some(highlighter),
            Err(e) => {
                tracing::warn!("Highlighting disabled: {}", e);
                None
            }
        };
    }

    // ==================== Auto-save ====================

    /// Starts the auto-save loop with the configured interval.
    ///
    /// Returns `false` when auto-save is disabled by configuration. A loop
    /// that is already running is restarted.
    pub fn start_auto_save(&mut self) -> CoreResult<bool> {
        self.stop_auto_save();

        let Some(interval) = self.config.auto_save_interval() else {
            tracing::info!("Auto-save disabled");
            return Ok(false);
        };

        let saver = AutoSaver::spawn(
            self.buffer.clone(),
            self.persistence,
            interval,
            self.event_bus.clone(),
        )?;
        self.auto_saver = Some(saver);
        Ok(true)
    }

    /// Stops the auto-save loop if it is running.
    pub fn stop_auto_save(&mut self) {
        if let Some(saver) = self.auto_saver.take() {
            saver.stop();
        }
    }

    pub fn is_auto_saving(&self) -> bool {
        self.auto_saver.is_some()
    }

    // ==================== Configuration ====================

    /// Returns the editor configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Updates the configuration.
    ///
    /// The undo limit is only read when the editor is created.
    pub fn set_config(&mut self, config: Config) -> CoreResult<()> {
        self.config = config;
        self.keymap = Keymap::from_config(&self.config);
        self.persistence = Persistence::new(self.config.files.atomic_write);
        self.highlighter = None;
        self.refresh_highlighter();

        if self.is_auto_saving() {
            self.start_auto_save()?;
        }

        self.emit(EditorEvent::ConfigChanged);
        Ok(())
    }

    /// Returns the keymap.
    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    // ==================== Events ====================

    /// Subscribes to editor events.
    pub fn subscribe(&self) -> broadcast::Receiver<EditorEvent> {
        self.event_bus.subscribe()
    }

    fn emit(&self, event: EditorEvent) {
        self.event_bus.emit(event);
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("path", &self.file_path())
            .field("modified", &self.is_modified())
            .field("language", &self.language())
            .field("auto_saving", &self.is_auto_saving())
            .finish()
    }
}
