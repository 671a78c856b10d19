use iced::widget::{button, column, container, row, text, text_input, Space};
use iced::{Background, Border, Color, Element, Length, Padding, Theme};

use crate::app::{App, Message};
use crate::theme::Theme as Palette;

impl App {
    pub fn view_replace_modal(&self) -> Element<'_, Message> {
        let palette = self.theme;
        let matches = match self.editor.match_count(&self.replace.find) {
            _ if self.replace.find.is_empty() => String::new(),
            1 => "1 match".to_string(),
            n => format!("{} matches", n),
        };

        let modal_content = column![
            text("Search & Replace").size(16).color(palette.foreground.primary),
            Space::with_height(12),
            text("Find").size(12).color(palette.foreground.muted),
            Space::with_height(4),
            text_input("Text to find...", &self.replace.find)
                .on_input(Message::FindChanged)
                .on_submit(Message::ReplaceAll)
                .padding(Padding::from([8, 12]))
                .size(13),
            Space::with_height(4),
            text(matches).size(11).color(palette.foreground.muted),
            Space::with_height(8),
            text("Replace with").size(12).color(palette.foreground.muted),
            Space::with_height(4),
            text_input("Replacement...", &self.replace.replace)
                .on_input(Message::ReplaceChanged)
                .on_submit(Message::ReplaceAll)
                .padding(Padding::from([8, 12]))
                .size(13),
            Space::with_height(16),
            row![
                secondary_button("Cancel", Message::HideReplace, palette),
                Space::with_width(12),
                primary_button("Replace All", Message::ReplaceAll, palette),
            ]
            .align_y(iced::Alignment::Center),
        ]
        .padding(24)
        .width(Length::Fixed(380.0));

        modal_frame(modal_content.into(), palette)
    }

    pub fn view_error_modal(&self) -> Element<'_, Message> {
        let palette = self.theme;
        let message = self.error.as_deref().unwrap_or_default();

        let modal_content = column![
            text("Error").size(16).color(palette.foreground.error),
            Space::with_height(12),
            text(message).size(13).color(palette.foreground.secondary),
            Space::with_height(20),
            primary_button("OK", Message::DismissError, palette),
        ]
        .padding(24)
        .width(Length::Fixed(420.0));

        modal_frame(modal_content.into(), palette)
    }
}

/// Centers dialog content on a bordered card.
fn modal_frame(content: Element<'_, Message>, palette: Palette) -> Element<'_, Message> {
    container(container(content).style(move |_| container::Style {
        background: Some(Background::Color(palette.background.secondary)),
        border: Border {
            color: palette.ui.border,
            width: 1.0,
            radius: 8.0.into(),
        },
        ..Default::default()
    }))
    .width(Length::Fill)
    .height(Length::Fill)
    .center_x(Length::Fill)
    .center_y(Length::Fill)
    .into()
}

fn secondary_button(label: &str, message: Message, palette: Palette) -> Element<'_, Message> {
    button(text(label).size(13).color(palette.foreground.primary))
        .padding(Padding::from([8, 20]))
        .style(move |_: &Theme, status: button::Status| {
            let bg = match status {
                button::Status::Hovered => palette.ui.button_hover,
                _ => palette.ui.button,
            };
            button::Style {
                background: Some(Background::Color(bg)),
                text_color: palette.foreground.primary,
                border: Border {
                    color: palette.ui.border,
                    width: 1.0,
                    radius: 4.0.into(),
                },
                ..Default::default()
            }
        })
        .on_press(message)
        .into()
}

fn primary_button(label: &str, message: Message, palette: Palette) -> Element<'_, Message> {
    button(text(label).size(13).color(Color::WHITE))
        .padding(Padding::from([8, 20]))
        .style(move |_: &Theme, status: button::Status| {
            let accent = palette.foreground.accent;
            let bg = match status {
                button::Status::Hovered => Color {
                    a: 0.85,
                    ..accent
                },
                _ => accent,
            };
            button::Style {
                background: Some(Background::Color(bg)),
                text_color: Color::WHITE,
                border: Border {
                    radius: 4.0.into(),
                    ..Default::default()
                },
                ..Default::default()
            }
        })
        .on_press(message)
        .into()
}
