pub mod dialogs;
pub mod editor;
pub mod status;

use iced::widget::{button, column, container, mouse_area, row, stack, text, Row, Space};
use iced::{Background, Border, Element, Length, Padding, Theme};

use quill_core::Command;

use crate::app::{App, Message};

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let palette = self.theme;

        let content = column![
            self.view_toolbar(),
            self.view_main_area(),
            self.view_status_bar(),
        ];

        let main_view: Element<'_, Message> = container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(move |_| container::Style {
                background: Some(Background::Color(palette.background.primary)),
                ..Default::default()
            })
            .into();

        let (modal, on_dismiss) = if self.error.is_some() {
            (self.view_error_modal(), Message::DismissError)
        } else if self.replace.visible {
            (self.view_replace_modal(), Message::HideReplace)
        } else {
            return main_view;
        };

        stack![
            main_view,
            mouse_area(
                container(Space::new(Length::Fill, Length::Fill))
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .style(move |_| container::Style {
                        background: Some(Background::Color(palette.background.backdrop)),
                        ..Default::default()
                    })
            )
            .on_press(on_dismiss),
            modal,
        ]
        .into()
    }

    /// One button per command, with its shortcut when it has one.
    pub fn view_toolbar(&self) -> Element<'_, Message> {
        let palette = self.theme;
        let groups = [
            &[Command::Open, Command::Save, Command::SaveAs][..],
            &[Command::Undo, Command::Redo, Command::SearchReplace][..],
            &[Command::ToggleDarkMode, Command::Quit][..],
        ];

        let mut items: Vec<Element<'_, Message>> = Vec::new();
        for (i, group) in groups.iter().enumerate() {
            if i > 0 {
                items.push(
                    container(Space::new(1, 18))
                        .style(move |_| container::Style {
                            background: Some(Background::Color(palette.ui.border)),
                            ..Default::default()
                        })
                        .into(),
                );
            }
            for &command in *group {
                items.push(self.toolbar_button(command));
            }
        }

        container(
            Row::with_children(items)
                .spacing(4)
                .align_y(iced::Alignment::Center),
        )
        .width(Length::Fill)
        .padding(Padding::from([4, 8]))
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

    fn toolbar_button(&self, command: Command) -> Element<'_, Message> {
        let palette = self.theme;
        let color = if self.is_enabled(command) {
            palette.foreground.primary
        } else {
            palette.foreground.muted
        };
        let mut label = row![text(command.display_name()).size(12).color(color)]
        .align_y(iced::Alignment::Center);

        if let Some(shortcut) = self.editor.keymap().shortcut_for(command) {
            label = label.push(Space::with_width(6)).push(
                text(shortcut)
                    .size(11)
                    .color(palette.foreground.muted),
            );
        }

        button(label)
            .padding(Padding::from([4, 10]))
            .style(move |_: &Theme, status: button::Status| {
                let bg = match status {
                    button::Status::Hovered => palette.ui.button_hover,
                    _ => palette.ui.button,
                };
                button::Style {
                    background: Some(Background::Color(bg)),
                    text_color: palette.foreground.primary,
                    border: Border {
                        radius: 4.0.into(),
                        ..Default::default()
                    },
                    ..Default::default()
                }
            })
            .on_press_maybe(self.is_enabled(command).then(|| command.into()))
            .into()
    }

    fn is_enabled(&self, command: Command) -> bool {
        match command {
            Command::Undo => self.editor.can_undo(),
            Command::Redo => self.editor.can_redo(),
            _ => true,
        }
    }
}
