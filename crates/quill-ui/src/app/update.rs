use iced::widget::text_editor;
use iced::{keyboard, Task};
use std::path::PathBuf;

use quill_core::event::drain;
use quill_core::{CoreError, EditorEvent};

use super::file_ops::{display_name, pick_open_path, pick_save_path};
use super::keys::key_press;
use super::{App, Message};

impl App {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Open => {
                let extension = self.editor.config().files.default_extension.clone();
                return pick_open_path(extension);
            }

            Message::OpenPathChosen(Some(path)) => self.open(path),

            Message::Save => match self.editor.save() {
                Ok(path) => {
                    self.status_message = format!("Saved {}", display_name(&path));
                }
                Err(CoreError::NoPath) => return self.update(Message::SaveAs),
                Err(e) => self.show_error(e),
            },

            Message::SaveAs => {
                let extension = self.editor.config().files.default_extension.clone();
                return pick_save_path(extension, self.editor.file_path());
            }

            Message::SavePathChosen(Some(path)) => match self.editor.save_as(&path) {
                Ok(()) => {
                    self.status_message = format!("Saved {}", display_name(&path));
                }
                Err(e) => self.show_error(e),
            },

            // Picker cancelled
            Message::OpenPathChosen(None) | Message::SavePathChosen(None) => {}

            Message::Quit => {
                self.editor.stop_auto_save();
                return iced::exit();
            }

            Message::Undo => match self.editor.undo() {
                Ok(()) => {
                    self.reload_content();
                    self.status_message = "Undo".to_string();
                }
                Err(_) => self.status_message = "Nothing to undo".to_string(),
            },

            Message::Redo => match self.editor.redo() {
                Ok(()) => {
                    self.reload_content();
                    self.status_message = "Redo".to_string();
                }
                Err(_) => self.status_message = "Nothing to redo".to_string(),
            },

            Message::EditorAction(action) => {
                let is_edit = action.is_edit();
                self.content.perform(action);
                if is_edit {
                    let text = content_text(&self.content);
                    self.editor.set_text(&text);
                }
            }

            Message::ShowReplace => self.replace.open(),
            Message::HideReplace => self.replace.close(),
            Message::FindChanged(find) => self.replace.find = find,
            Message::ReplaceChanged(replace) => self.replace.replace = replace,

            Message::ReplaceAll => {
                let count = self
                    .editor
                    .replace_all(&self.replace.find, &self.replace.replace);
                if count > 0 {
                    self.reload_content();
                }
                self.status_message = match count {
                    0 => "No matches".to_string(),
                    1 => "Replaced 1 occurrence".to_string(),
                    n => format!("Replaced {} occurrences", n),
                };
                self.replace.close();
            }

            Message::ToggleDarkMode => {
                self.theme = self.theme.toggled();
            }

            Message::DismissError => self.error = None,

            Message::Escape => {
                if self.error.is_some() {
                    self.error = None;
                } else {
                    self.replace.close();
                }
            }

            Message::Tick(_) => {
                for event in drain(&mut self.events) {
                    self.apply_event(event);
                }
            }

            Message::KeyPressed(key, modifiers) => {
                return self.handle_key_pressed(key, modifiers);
            }
        }
        Task::none()
    }

    fn handle_key_pressed(
        &mut self,
        key: keyboard::Key,
        modifiers: keyboard::Modifiers,
    ) -> Task<Message> {
        let Some(press) = key_press(&key, modifiers) else {
            return Task::none();
        };

        match self.editor.keymap().lookup(&press) {
            Some(command) => {
                tracing::debug!("{} -> {}", press, command.id());
                self.update(command.into())
            }
            None => Task::none(),
        }
    }

    fn open(&mut self, path: PathBuf) {
        match self.editor.open(&path) {
            Ok(()) => {
                self.reload_content();
                self.status_message = format!("Opened {}", display_name(&path));
            }
            Err(e) => self.show_error(e),
        }
    }

    /// Rebuilds the widget content after the buffer changed underneath it.
    fn reload_content(&mut self) {
        self.content = text_editor::Content::with_text(&self.editor.text());
    }

    fn show_error(&mut self, error: CoreError) {
        tracing::error!("{}", error);
        self.error = Some(error.to_string());
    }

    fn apply_event(&mut self, event: EditorEvent) {
        match event {
            EditorEvent::AutoSaved(path) => {
                self.status_message = format!("Auto-saved {}", display_name(&path));
            }
            EditorEvent::AutoSaveFailed { error, .. } => {
                self.status_message = format!("Auto-save failed: {}", error);
            }
            EditorEvent::ConfigChanged => {
                self.status_message = "Configuration updated".to_string();
            }
            // Foreground actions already set their own status.
            EditorEvent::Opened(_) | EditorEvent::Saved(_) | EditorEvent::ContentReplaced { .. } => {}
        }
    }
}

/// Joins the widget's lines with `\n`, without adding a trailing newline.
pub fn content_text(content: &text_editor::Content) -> String {
    let mut text = String::new();
    for (i, line) in content.lines().enumerate() {
        if i > 0 {
            text.push('\n');
        }
        text.push_str(&line);
    }
    text
}
