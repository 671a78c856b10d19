//! Light and dark palettes.
//!
//! ## Learning: `Copy` themes
//!
//! A palette is a handful of colors, so `Theme` is `Copy`. View code moves
//! a copy into each style closure instead of borrowing `App`, which keeps
//! the closures `'static`-friendly.

use iced::Color;
use quill_syntax::HighlightKind;

/// Editor theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Theme name
    pub name: &'static str,

    /// Is this a dark theme?
    pub is_dark: bool,

    /// Background colors
    pub background: BackgroundColors,

    /// Foreground colors
    pub foreground: ForegroundColors,

    /// UI element colors
    pub ui: UiColors,

    /// Syntax highlighting colors
    pub syntax: SyntaxColors,
}

/// Background colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundColors {
    /// Editor area
    pub primary: Color,
    /// Bars and dialogs
    pub secondary: Color,
    /// Gutter
    pub tertiary: Color,
    pub selection: Color,
    /// Dimmed layer behind modals
    pub backdrop: Color,
}

/// Foreground (text) colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForegroundColors {
    pub primary: Color,
    pub secondary: Color,
    pub muted: Color,
    pub accent: Color,
    pub error: Color,
}

/// UI element colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UiColors {
    pub border: Color,
    pub button: Color,
    pub button_hover: Color,
}

/// Syntax highlighting colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyntaxColors {
    pub keyword: Color,
    pub constant: Color,
}

impl Theme {
    /// Creates the dark theme.
    pub fn dark() -> Self {
        Self {
            name: "Quill Dark",
            is_dark: true,
            background: BackgroundColors {
                primary: Color::from_rgb(0.11, 0.11, 0.13),
                secondary: Color::from_rgb(0.14, 0.14, 0.16),
                tertiary: Color::from_rgb(0.12, 0.12, 0.14),
                selection: Color::from_rgba(0.25, 0.46, 0.85, 0.55),
                backdrop: Color::from_rgba(0.0, 0.0, 0.0, 0.5),
            },
            foreground: ForegroundColors {
                primary: Color::from_rgb(0.9, 0.9, 0.9),
                secondary: Color::from_rgb(0.7, 0.7, 0.7),
                muted: Color::from_rgb(0.5, 0.5, 0.5),
                accent: Color::from_rgb(0.4, 0.6, 1.0),
                error: Color::from_rgb(0.9, 0.4, 0.4),
            },
            ui: UiColors {
                border: Color::from_rgb(0.25, 0.25, 0.28),
                button: Color::from_rgb(0.18, 0.18, 0.20),
                button_hover: Color::from_rgb(0.22, 0.22, 0.25),
            },
            syntax: SyntaxColors {
                keyword: Color::from_rgb(0.86, 0.55, 0.76), // Pink/purple
                constant: Color::from_rgb(0.82, 0.68, 0.55), // Orange
            },
        }
    }

    /// Creates the light theme.
    pub fn light() -> Self {
        Self {
            name: "Quill Light",
            is_dark: false,
            background: BackgroundColors {
                primary: Color::from_rgb(1.0, 1.0, 1.0),
                secondary: Color::from_rgb(0.96, 0.96, 0.96),
                tertiary: Color::from_rgb(0.93, 0.93, 0.93),
                selection: Color::from_rgba(0.3, 0.5, 0.8, 0.3),
                backdrop: Color::from_rgba(0.0, 0.0, 0.0, 0.3),
            },
            foreground: ForegroundColors {
                primary: Color::from_rgb(0.1, 0.1, 0.1),
                secondary: Color::from_rgb(0.3, 0.3, 0.3),
                muted: Color::from_rgb(0.5, 0.5, 0.5),
                accent: Color::from_rgb(0.2, 0.4, 0.8),
                error: Color::from_rgb(0.75, 0.2, 0.2),
            },
            ui: UiColors {
                border: Color::from_rgb(0.85, 0.85, 0.85),
                button: Color::from_rgb(0.92, 0.92, 0.92),
                button_hover: Color::from_rgb(0.88, 0.88, 0.88),
            },
            syntax: SyntaxColors {
                // Classic blue keywords
                keyword: Color::from_rgb(0.0, 0.0, 1.0),
                constant: Color::from_rgb(0.7, 0.3, 0.2),
            },
        }
    }

    pub fn for_mode(dark: bool) -> Self {
        if dark { Self::dark() } else { Self::light() }
    }

    /// Returns the opposite palette.
    pub fn toggled(&self) -> Self {
        Self::for_mode(!self.is_dark)
    }

    /// Color for a highlighted span.
    pub fn syntax_color(&self, kind: HighlightKind) -> Color {
        match kind {
            HighlightKind::Keyword => self.syntax.keyword,
            HighlightKind::Constant => self.syntax.constant,
        }
    }

    /// Built-in iced theme used for widgets we do not style ourselves.
    pub fn iced_theme(&self) -> iced::Theme {
        if self.is_dark {
            iced::Theme::Dark
        } else {
            iced::Theme::Light
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let light = Theme::default();
        assert!(!light.is_dark);
        assert_eq!(light.toggled(), Theme::dark());
        assert_eq!(light.toggled().toggled(), light);
    }

    #[test]
    fn test_keywords_are_blue_in_light_mode() {
        let color = Theme::light().syntax_color(HighlightKind::Keyword);
        assert_eq!(color, Color::from_rgb(0.0, 0.0, 1.0));
    }
}
