//! # Quill Syntax
//!
//! Reserved-word highlighting.
//!
//! ## Why one regex instead of one search per keyword?
//!
//! The whole keyword table is compiled once into a single alternation
//! wrapped in word boundaries, `\b(?:kw1|kw2|...)\b`. The regex engine turns
//! that into one automaton, so highlighting a buffer is a single linear pass
//! no matter how many keywords the language has.
//!
//! `\b` uses Unicode word characters: letters, digits and `_` all belong to
//! an identifier, so `class` inside `class_name` is not a match.

mod keywords;

pub use keywords::{keyword_set, supported_languages, KeywordSet};

use regex::Regex;
use std::collections::HashSet;
use std::ops::Range;

/// Errors that can occur while building a highlighter.
#[derive(Debug, thiserror::Error)]
pub enum SyntaxError {
    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    #[error("Invalid keyword pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// A highlighted span of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSpan {
    /// Start byte offset
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
    /// Kind of syntax element
    pub kind: HighlightKind,
}

impl HighlightSpan {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Categories a span can be rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightKind {
    Keyword,
    Constant,
}

/// Finds reserved words of one language.
#[derive(Debug, Clone)]
pub struct KeywordHighlighter {
    language: &'static str,
    matcher: Regex,
    constants: HashSet<&'static str>,
}

impl KeywordHighlighter {
    /// Compiles the matcher for a language.
    pub fn new(language: &str) -> Result<Self, SyntaxError> {
        let set = keyword_set(language)
            .ok_or_else(|| SyntaxError::UnknownLanguage(language.to_string()))?;
        Self::from_set(set)
    }

    /// Compiles the matcher for an explicit keyword table.
    pub fn from_set(set: KeywordSet) -> Result<Self, SyntaxError> {
        let mut words: Vec<&str> = set
            .keywords
            .iter()
            .chain(set.constants.iter())
            .copied()
            .collect();
        // Longest first, so a keyword that prefixes another never shadows it.
        words.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
        words.dedup();

        let alternation = words
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|");
        let matcher = Regex::new(&format!(r"\b(?:{alternation})\b"))?;

        tracing::debug!(language = set.name, words = words.len(), "Compiled keyword matcher");

        Ok(Self {
            language: set.name,
            matcher,
            constants: set.constants.iter().copied().collect(),
        })
    }

    /// Returns the canonical language name.
    pub fn language(&self) -> &'static str {
        self.language
    }

    /// Returns spans for every standalone reserved word in `text`.
    ///
    /// Offsets are byte offsets into `text`; spans are sorted and never
    /// overlap.
    pub fn highlight(&self, text: &str) -> Vec<HighlightSpan> {
        self.matcher
            .find_iter(text)
            .map(|m| HighlightSpan {
                start: m.start(),
                end: m.end(),
                kind: self.classify(m.as_str()),
            })
            .collect()
    }

    /// Highlights a single line. Offsets are relative to the line start.
    ///
    /// Keywords never span a newline, so lines can be highlighted
    /// independently and only changed lines need recomputing.
    pub fn highlight_line(&self, line: &str) -> Vec<HighlightSpan> {
        self.highlight(line)
    }

    fn classify(&self, word: &str) -> HighlightKind {
        if self.constants.contains(word) {
            HighlightKind::Constant
        } else {
            HighlightKind::Keyword
        }
    }
}

/// Maps a file name to a supported language, if its extension is known.
pub fn detect_language(file_name: &str) -> Option<&'static str> {
    let ext = file_name.rsplit_once('.')?.1;
    keyword_set(ext).map(|set| set.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words<'a>(text: &'a str, spans: &[HighlightSpan]) -> Vec<&'a str> {
        spans.iter().map(|s| &text[s.range()]).collect()
    }

    #[test]
    fn test_standalone_words_only() {
        let highlighter = KeywordHighlighter::new("python").unwrap();
        let text = "for x in class_name";
        let spans = highlighter.highlight(text);

        assert_eq!(words(text, &spans), vec!["for", "in"]);
        assert_eq!(spans[0], HighlightSpan { start: 0, end: 3, kind: HighlightKind::Keyword });
        assert_eq!(spans[1], HighlightSpan { start: 6, end: 8, kind: HighlightKind::Keyword });
    }

    #[test]
    fn test_prefix_keywords_do_not_shadow() {
        let highlighter = KeywordHighlighter::new("python").unwrap();
        let text = "async def f(): await x is not None";
        let spans = highlighter.highlight(text);

        assert_eq!(
            words(text, &spans),
            vec!["async", "def", "await", "is", "not", "None"]
        );
        assert_eq!(spans.last().unwrap().kind, HighlightKind::Constant);
    }

    #[test]
    fn test_identifiers_containing_keywords() {
        let highlighter = KeywordHighlighter::new("python").unwrap();
        for text in ["format", "import_path", "if2", "_else", "Forward", "classy"] {
            assert!(highlighter.highlight(text).is_empty(), "{text} should not match");
        }
    }

    #[test]
    fn test_punctuation_is_a_boundary() {
        let highlighter = KeywordHighlighter::new("python").unwrap();
        let text = "(not)[pass]";
        assert_eq!(words(text, &highlighter.highlight(text)), vec!["not", "pass"]);
    }

    #[test]
    fn test_multibyte_offsets_are_bytes() {
        let highlighter = KeywordHighlighter::new("python").unwrap();
        let text = "é if";
        let spans = highlighter.highlight(text);
        assert_eq!(spans[0].range(), 3..5);
    }

    #[test]
    fn test_multiline_text() {
        let highlighter = KeywordHighlighter::new("rust").unwrap();
        let text = "fn main() {\n    let x = true;\n}";
        let spans = highlighter.highlight(text);
        assert_eq!(words(text, &spans), vec!["fn", "let", "true"]);
        assert_eq!(spans[2].kind, HighlightKind::Constant);
    }

    #[test]
    fn test_line_offsets_are_line_relative() {
        let highlighter = KeywordHighlighter::new("javascript").unwrap();
        let spans = highlighter.highlight_line("  return null");
        assert_eq!(spans[0].range(), 2..8);
        assert_eq!(spans[1].kind, HighlightKind::Constant);
    }

    #[test]
    fn test_empty_text() {
        let highlighter = KeywordHighlighter::new("python").unwrap();
        assert!(highlighter.highlight("").is_empty());
    }

    #[test]
    fn test_unknown_language() {
        let result = KeywordHighlighter::new("cobol");
        assert!(matches!(result, Err(SyntaxError::UnknownLanguage(_))));
    }

    #[test]
    fn test_language_aliases() {
        assert_eq!(KeywordHighlighter::new("py").unwrap().language(), "python");
        assert_eq!(KeywordHighlighter::new("RS").unwrap().language(), "rust");
        assert!(supported_languages().contains(&"javascript"));
    }

    #[test]
    fn test_detect_language() {
        assert_eq!(detect_language("main.py"), Some("python"));
        assert_eq!(detect_language("lib.rs"), Some("rust"));
        assert_eq!(detect_language("app.min.js"), Some("javascript"));
        assert_eq!(detect_language("notes.txt"), None);
        assert_eq!(detect_language("Makefile"), None);
    }
}
