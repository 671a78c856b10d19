use iced::widget::{container, row, text, text_editor};
use iced::{Background, Border, Color, Element, Font, Length, Padding, Theme};

use crate::app::{App, Message};
use crate::highlighter::{EditorHighlighter, HighlightSettings};

/// Shared by the gutter and the editor so their lines stay aligned.
const EDITOR_PADDING: f32 = 16.0;

impl App {
    pub fn view_main_area(&self) -> Element<'_, Message> {
        let mut main = row![].height(Length::Fill);
        if self.editor.config().ui.line_numbers {
            main = main.push(self.view_gutter());
        }
        main.push(self.view_editor()).into()
    }

    /// Line numbers, one per buffer line, pinned to the top of the view.
    pub fn view_gutter(&self) -> Element<'_, Message> {
        let palette = self.theme;
        let font_size = self.editor.config().ui.font_size;

        container(
            text(self.editor.line_numbers())
                .font(Font::MONOSPACE)
                .size(font_size)
                .color(palette.foreground.muted)
                .wrapping(text::Wrapping::None)
                .align_x(iced::alignment::Horizontal::Right),
        )
        .height(Length::Fill)
        .padding(Padding {
            top: EDITOR_PADDING,
            right: 8.0,
            bottom: EDITOR_PADDING,
            left: 12.0,
        })
        .style(move |_| container::Style {
            background: Some(Background::Color(palette.background.tertiary)),
            border: Border {
                color: palette.ui.border,
                width: 1.0,
                radius: 0.0.into(),
            },
            ..Default::default()
        })
        .into()
    }

    pub fn view_editor(&self) -> Element<'_, Message> {
        let palette = self.theme;
        let highlight_settings = HighlightSettings {
            language: self.editor.language(),
            dark: palette.is_dark,
        };

        // Wrapping is off so each buffer line takes exactly one gutter row.
        // TODO: the gutter does not follow the editor's internal scroll
        // offset; offset it once text_editor exposes its viewport.
        text_editor(&self.content)
            .wrapping(text::Wrapping::None)
            .height(Length::Fill)
            .padding(Padding {
                top: EDITOR_PADDING,
                right: 20.0,
                bottom: EDITOR_PADDING,
                left: EDITOR_PADDING,
            })
            .font(Font::MONOSPACE)
            .size(self.editor.config().ui.font_size)
            .style(move |_theme: &Theme, _status| text_editor::Style {
                background: Background::Color(palette.background.primary),
                border: Border {
                    width: 0.0,
                    radius: 0.0.into(),
                    color: Color::TRANSPARENT,
                },
                icon: palette.foreground.muted,
                placeholder: palette.foreground.muted,
                value: palette.foreground.primary,
                selection: palette.background.selection,
            })
            .highlight_with::<EditorHighlighter>(highlight_settings, |highlight, _theme| {
                highlight.to_format()
            })
            .on_action(Message::EditorAction)
            .into()
    }
}
