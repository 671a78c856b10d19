//! Keyword highlighting integration for the editor widget.
//!
//! iced asks for spans one line at a time and only re-asks for lines that
//! changed, so recomputing highlights after an edit costs one regex pass
//! over the edited lines.

use iced::advanced::text::highlighter::{Format, Highlighter};
use iced::{Color, Font};
use quill_syntax::KeywordHighlighter;
use std::ops::Range;

use crate::theme::Theme;

/// Settings for the highlighter.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightSettings {
    /// Keyword set, `None` for plain text
    pub language: Option<&'static str>,
    pub dark: bool,
}

/// Format for highlighted text.
#[derive(Debug, Clone, Copy)]
pub struct HighlightFormat {
    pub color: Color,
}

impl HighlightFormat {
    pub fn to_format(self) -> Format<Font> {
        Format {
            color: Some(self.color),
            font: None,
        }
    }
}

/// Adapts [`KeywordHighlighter`] to iced's line-by-line protocol.
#[derive(Debug)]
pub struct EditorHighlighter {
    keywords: Option<KeywordHighlighter>,
    theme: Theme,
    current_line: usize,
}

impl EditorHighlighter {
    fn build(settings: &HighlightSettings) -> Option<KeywordHighlighter> {
        let language = settings.language?;
        match KeywordHighlighter::new(language) {
            Ok(highlighter) => Some(highlighter),
            Err(e) => {
                tracing::warn!("Highlighting disabled: {}", e);
                None
            }
        }
    }
}

impl Highlighter for EditorHighlighter {
    type Settings = HighlightSettings;
    type Highlight = HighlightFormat;
    type Iterator<'a> = std::vec::IntoIter<(Range<usize>, HighlightFormat)> where Self: 'a;

    fn new(settings: &Self::Settings) -> Self {
        Self {
            keywords: Self::build(settings),
            theme: Theme::for_mode(settings.dark),
            current_line: 0,
        }
    }

    fn update(&mut self, new_settings: &Self::Settings) {
        let language = self.keywords.as_ref().map(|k| k.language());
        if language != new_settings.language {
            self.keywords = Self::build(new_settings);
        }
        self.theme = Theme::for_mode(new_settings.dark);
        self.current_line = 0;
    }

    fn change_line(&mut self, line: usize) {
        // Lines are independent, so restarting anywhere is fine.
        self.current_line = line;
    }

    fn highlight_line(&mut self, line: &str) -> Self::Iterator<'_> {
        self.current_line += 1;

        let Some(keywords) = &self.keywords else {
            return Vec::new().into_iter();
        };

        keywords
            .highlight_line(line)
            .into_iter()
            .map(|span| {
                (
                    span.range(),
                    HighlightFormat {
                        color: self.theme.syntax_color(span.kind),
                    },
                )
            })
            .collect::<Vec<_>>()
            .into_iter()
    }

    fn current_line(&self) -> usize {
        self.current_line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(language: Option<&'static str>) -> HighlightSettings {
        HighlightSettings {
            language,
            dark: false,
        }
    }

    #[test]
    fn test_highlights_keywords_on_a_line() {
        let mut highlighter = EditorHighlighter::new(&settings(Some("python")));
        let spans: Vec<_> = highlighter
            .highlight_line("for x in class_name")
            .map(|(range, _)| range)
            .collect();

        assert_eq!(spans, vec![0..3, 6..8]);
        assert_eq!(highlighter.current_line(), 1);
    }

    #[test]
    fn test_plain_text_has_no_spans() {
        let mut highlighter = EditorHighlighter::new(&settings(None));
        assert_eq!(highlighter.highlight_line("for x in y").count(), 0);

        let mut unknown = EditorHighlighter::new(&settings(Some("cobol")));
        assert_eq!(unknown.highlight_line("for x in y").count(), 0);
    }

    #[test]
    fn test_update_switches_language_and_palette() {
        let mut highlighter = EditorHighlighter::new(&settings(Some("python")));
        highlighter.update(&HighlightSettings {
            language: Some("rust"),
            dark: true,
        });

        let spans: Vec<_> = highlighter.highlight_line("fn def").collect();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].0, 0..2);
        assert_eq!(spans[0].1.color, Theme::dark().syntax.keyword);
    }

    #[test]
    fn test_change_line_rewinds() {
        let mut highlighter = EditorHighlighter::new(&settings(Some("python")));
        for _ in 0..5 {
            let _ = highlighter.highlight_line("pass");
        }
        highlighter.change_line(2);
        assert_eq!(highlighter.current_line(), 2);
    }
}
