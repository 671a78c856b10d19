use iced::widget::text_editor;
use iced::{keyboard, Subscription, Task};
use std::time::Duration;
use tokio::sync::broadcast;

use quill_core::{Editor, EditorEvent};

use crate::theme::Theme;

pub mod file_ops;
pub mod keys;
pub mod messages;
pub mod types;
pub mod update;
pub mod view;

pub use messages::*;
pub use types::*;

/// How often background events are folded into the status bar.
const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(500);

pub struct App {
    pub editor: Editor,
    /// Widget-side copy of the buffer text, with cursor and selection
    pub content: text_editor::Content,
    pub events: broadcast::Receiver<EditorEvent>,
    pub theme: Theme,
    pub replace: ReplaceDialog,
    /// Message shown in the error modal
    pub error: Option<String>,
    pub status_message: String,
}

impl App {
    pub fn new(flags: Flags) -> (Self, Task<Message>) {
        let theme = Theme::for_mode(flags.config.ui.dark_mode);
        let mut editor = Editor::with_config(flags.config);
        let events = editor.subscribe();

        let mut error = None;
        if let Some(path) = &flags.file {
            if let Err(e) = editor.open(path) {
                tracing::error!("{}", e);
                error = Some(e.to_string());
            }
        }

        if let Err(e) = editor.start_auto_save() {
            tracing::error!("Could not start auto-save: {}", e);
            error.get_or_insert_with(|| format!("Could not start auto-save: {}", e));
        }

        let content = text_editor::Content::with_text(&editor.text());

        let app = Self {
            editor,
            content,
            events,
            theme,
            replace: ReplaceDialog::default(),
            error,
            status_message: "Ready".to_string(),
        };

        (app, Task::none())
    }

    pub fn title(&self) -> String {
        self.editor.title()
    }

    pub fn theme(&self) -> iced::Theme {
        self.theme.iced_theme()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let keyboard_sub = keyboard::on_key_press(|key, modifiers| {
            Some(Message::KeyPressed(key, modifiers))
        });

        Subscription::batch([
            keyboard_sub,
            iced::event::listen_with(keys::escape_pressed),
            iced::time::every(EVENT_POLL_INTERVAL).map(Message::Tick),
        ])
    }
}

pub fn run(flags: Flags) -> iced::Result {
    iced::application(App::title, App::update, App::view)
        .subscription(App::subscription)
        .theme(App::theme)
        .window_size(iced::Size::new(1024.0, 720.0))
        .antialiasing(true)
        .run_with(move || App::new(flags))
}
