//! Line ending of the file behind a buffer.
//!
//! The buffer always holds `\n`-separated text because that is what the
//! editing widget produces. The ending found on load is remembered and
//! restored when the text goes back to disk.

use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    /// Detects the ending from the first line break. Text without one is `Lf`.
    pub fn detect(text: &str) -> Self {
        match text.find('\n') {
            Some(i) if text[..i].ends_with('\r') => LineEnding::CrLf,
            _ => LineEnding::Lf,
        }
    }

    /// Short name for the status bar.
    pub fn label(self) -> &'static str {
        match self {
            LineEnding::Lf => "LF",
            LineEnding::CrLf => "CRLF",
        }
    }

    /// Converts disk text into buffer text.
    pub fn normalize(self, text: &str) -> Cow<'_, str> {
        match self {
            LineEnding::Lf => Cow::Borrowed(text),
            LineEnding::CrLf => Cow::Owned(text.replace("\r\n", "\n")),
        }
    }

    /// Converts buffer text back into disk text.
    pub fn restore(self, text: &str) -> Cow<'_, str> {
        match self {
            LineEnding::Lf => Cow::Borrowed(text),
            LineEnding::CrLf => Cow::Owned(text.replace('\n', "\r\n")),
        }
    }
}
