use iced::widget::{container, horizontal_space, row, text, Space};
use iced::{Background, Border, Element, Length, Padding};

use crate::app::file_ops::display_name;
use crate::app::{App, Message};

impl App {
    pub fn view_status_bar(&self) -> Element<'_, Message> {
        let palette = self.theme;

        let (line, col) = self.content.cursor_position();
        let cursor_info = format!("Ln {}, Col {}", line + 1, col + 1);

        let file_info = match self.editor.file_path() {
            Some(path) if self.editor.is_modified() => {
                format!("{} [modified]", display_name(&path))
            }
            Some(path) => display_name(&path),
            None => "Untitled".to_string(),
        };

        let language_info = self.editor.language().unwrap_or("text");

        let status_content = row![
            text(&self.status_message)
                .size(12)
                .color(palette.foreground.secondary),
            horizontal_space(),
            text(file_info).size(12).color(palette.foreground.secondary),
            Space::with_width(24),
            text(cursor_info).size(12).color(palette.foreground.primary),
            Space::with_width(24),
            text(language_info).size(12).color(palette.foreground.accent),
            Space::with_width(24),
            text(self.editor.line_ending().label())
                .size(12)
                .color(palette.foreground.secondary),
            Space::with_width(12),
            text("UTF-8").size(12).color(palette.foreground.secondary),
            Space::with_width(12),
        ]
        .padding(Padding::from([6, 12]))
        .align_y(iced::Alignment::Center);

        container(status_content)
            .width(Length::Fill)
            .height(28)
            .style(move |_| container::Style {
                background: Some(Background::Color(palette.background.secondary)),
                border: Border {
                    color: palette.ui.border,
                    width: 1.0,
                    radius: 0.0.into(),
                },
                ..Default::default()
            })
            .into()
    }
}
