//! Translation from iced key events to keymap key presses.

use iced::keyboard::{self, key::Named};
use iced::{event, window, Event};
use quill_core::{Key, KeyPress, Modifiers};

use super::Message;

/// Maps Escape to [`Message::Escape`] whether or not a widget captured it.
///
/// A focused `text_input` consumes Escape to drop its focus, so
/// `keyboard::on_key_press` never sees it while a dialog is being typed in.
pub fn escape_pressed(event: Event, _status: event::Status, _window: window::Id) -> Option<Message> {
    match event {
        Event::Keyboard(keyboard::Event::KeyPressed {
            key: keyboard::Key::Named(Named::Escape),
            ..
        }) => Some(Message::Escape),
        _ => None,
    }
}

/// Converts an iced key event, if the keymap can express it.
pub fn key_press(key: &keyboard::Key, modifiers: keyboard::Modifiers) -> Option<KeyPress> {
    let key = match key {
        keyboard::Key::Character(c) => Key::char(c.chars().next()?),
        keyboard::Key::Named(named) => match named {
            Named::Enter => Key::Enter,
            Named::Escape => Key::Escape,
            Named::Tab => Key::Tab,
            Named::F1 => Key::F(1),
            Named::F2 => Key::F(2),
            Named::F3 => Key::F(3),
            Named::F4 => Key::F(4),
            Named::F5 => Key::F(5),
            Named::F6 => Key::F(6),
            Named::F7 => Key::F(7),
            Named::F8 => Key::F(8),
            Named::F9 => Key::F(9),
            Named::F10 => Key::F(10),
            Named::F11 => Key::F(11),
            Named::F12 => Key::F(12),
            _ => return None,
        },
        keyboard::Key::Unidentified => return None,
    };

    let modifiers = Modifiers {
        ctrl: modifiers.control(),
        alt: modifiers.alt(),
        shift: modifiers.shift(),
    };

    Some(KeyPress::new(key, modifiers))
}
