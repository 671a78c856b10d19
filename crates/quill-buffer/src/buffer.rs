//! Core text buffer implementation using rope data structure.
//!
//! ## Why Rope?
//!
//! Traditional text editors use gap buffers or arrays, but ropes excel at:
//! - **Large files**: O(log n) line lookups for the line-number gutter
//! - **Cheap snapshots**: cloning a rope shares its chunks
//!
//! The buffer is deliberately toolkit-agnostic: the shell hands over whole
//! replacement texts, and the buffer tracks the associated file path, the
//! modified flag and a revision counter next to the content. Each
//! replacement is reduced to an [`Edit`] and spliced into the rope, so a
//! keystroke touches one chunk instead of rebuilding the whole text.

use ropey::Rope;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

use crate::history::{Edit, History};
use crate::line_ending::LineEnding;
use crate::{BufferError, BufferResult};

/// A text buffer backed by a rope data structure.
///
/// # Thread Safety
///
/// `TextBuffer` is `Send` but mutation needs `&mut self`. To share one
/// between the interactive thread and a background thread, wrap it in a
/// [`SharedBuffer`](crate::SharedBuffer).
#[derive(Debug, Clone)]
pub struct TextBuffer {
    /// The rope holding our text content
    rope: Rope,

    /// Edit history for undo/redo
    history: History,

    /// Whether the buffer has unsaved changes
    modified: bool,

    /// Associated file path (if any)
    file_path: Option<PathBuf>,

    /// Line ending of the file on disk
    line_ending: LineEnding,

    /// Bumped on every content mutation
    revision: u64,
}

impl TextBuffer {
    /// Creates a new empty buffer.
    ///
    /// # Example
    /// ```
    /// use quill_buffer::TextBuffer;
    ///
    /// let buffer = TextBuffer::new();
    /// assert!(buffer.is_empty());
    /// assert!(buffer.file_path().is_none());
    /// ```
    pub fn new() -> Self {
        Self::with_history_limit(1000)
    }

    /// Creates an empty buffer with a custom undo depth.
    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            rope: Rope::new(),
            history: History::new(limit),
            modified: false,
            file_path: None,
            line_ending: LineEnding::Lf,
            revision: 0,
        }
    }

    // ==================== Text Access ====================

    /// Returns the entire text content.
    ///
    /// # Learning: Cow (Clone-on-Write)
    ///
    /// For small buffers held in a single rope chunk this borrows.
    /// Larger buffers spanning several chunks allocate.
    #[inline]
    pub fn text(&self) -> Cow<'_, str> {
        self.rope.slice(..).into()
    }

    /// Returns the content with the file's line ending, ready to be written.
    pub fn disk_text(&self) -> String {
        self.line_ending.restore(&self.text()).into_owned()
    }

    // ==================== Measurements ====================

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Returns the number of Unicode scalar values in the buffer.
    #[inline]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Returns the number of lines in the buffer.
    ///
    /// An empty buffer has 1 line. A buffer ending with `\n` counts
    /// the empty line after it.
    #[inline]
    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    /// Returns the gutter text: one number per line, newline separated.
    pub fn line_numbers(&self) -> String {
        gutter_text(self.len_lines())
    }

    // ==================== Mutations ====================

    /// Replaces the whole content.
    ///
    /// The previous content becomes an undo step. Setting identical text is
    /// a no-op and does not mark the buffer modified.
    pub fn set_text(&mut self, text: &str) {
        let Some(edit) = Edit::between(&self.text(), text) else {
            return;
        };
        self.commit(edit);
    }

    /// Replaces every non-overlapping literal occurrence of `pattern`.
    ///
    /// Scanning is left to right and resumes after each replaced occurrence,
    /// so replacement text is never rescanned. An empty pattern matches
    /// nothing. The whole substitution is a single undo step.
    ///
    /// Returns the number of replacements made.
    pub fn replace_all(&mut self, pattern: &str, replacement: &str) -> usize {
        if pattern.is_empty() {
            return 0;
        }

        let text = self.text().into_owned();
        let count = text.matches(pattern).count();
        if count == 0 {
            return 0;
        }

        let replaced = text.replace(pattern, replacement);
        if let Some(edit) = Edit::between(&text, &replaced) {
            self.commit(edit);
        }
        count
    }

    fn commit(&mut self, edit: Edit) {
        splice(&mut self.rope, edit.at, &edit.removed, &edit.inserted);
        self.history.record(edit);
        self.touch();
    }

    fn touch(&mut self) {
        self.modified = true;
        self.revision += 1;
    }

    // ==================== Undo/Redo ====================

    /// Restores the content before the last change.
    pub fn undo(&mut self) -> BufferResult<()> {
        let edit = self.history.undo().ok_or(BufferError::NothingToUndo)?;
        splice(&mut self.rope, edit.at, &edit.inserted, &edit.removed);
        self.touch();
        Ok(())
    }

    /// Re-applies the last undone change.
    pub fn redo(&mut self) -> BufferResult<()> {
        let edit = self.history.redo().ok_or(BufferError::NothingToRedo)?;
        splice(&mut self.rope, edit.at, &edit.removed, &edit.inserted);
        self.touch();
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ==================== File Association ====================

    /// Returns the associated file path, if any.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Associates a file path.
    ///
    /// Callers only do this after a successful open or save.
    pub fn set_file_path(&mut self, path: impl Into<PathBuf>) {
        self.file_path = Some(path.into());
    }

    /// Replaces content and path with a freshly loaded file.
    ///
    /// History is cleared: undoing past an open would resurrect another
    /// file's text under this path. CRLF text is held as `\n` and the
    /// ending is restored by [`TextBuffer::disk_text`].
    pub fn load(&mut self, text: &str, path: impl Into<PathBuf>) {
        self.line_ending = LineEnding::detect(text);
        self.rope = Rope::from_str(&self.line_ending.normalize(text));
        self.history.clear();
        self.file_path = Some(path.into());
        self.modified = false;
        self.revision += 1;
    }

    /// Clears the modified flag after the content reached disk.
    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    // ==================== State Queries ====================

    /// Returns true if the buffer has unsaved changes.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Monotonic counter of content mutations.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // ==================== Search ====================

    /// Finds all non-overlapping occurrences of a pattern.
    ///
    /// Returns character indices of each match start.
    pub fn find_all(&self, pattern: &str) -> Vec<usize> {
        if pattern.is_empty() {
            return Vec::new();
        }

        let text = self.text();
        let mut chars_seen = 0;
        let mut last_byte = 0;
        text.match_indices(pattern)
            .map(|(byte_idx, _)| {
                chars_seen += text[last_byte..byte_idx].chars().count();
                last_byte = byte_idx;
                chars_seen
            })
            .collect()
    }
}

/// Replaces the `remove` text found at byte offset `at` with `insert`.
fn splice(rope: &mut Rope, at: usize, remove: &str, insert: &str) {
    let start = rope.byte_to_char(at);
    let end = start + remove.chars().count();
    rope.remove(start..end);
    rope.insert(start, insert);
}

/// Renders `1..=lines` one per line, the way the gutter displays them.
pub fn gutter_text(lines: usize) -> String {
    (1..=lines.max(1))
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for TextBuffer {
    fn from(s: &str) -> Self {
        let mut buffer = Self::new();
        buffer.rope = Rope::from_str(s);
        buffer
    }
}

impl From<String> for TextBuffer {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_set_text_marks_modified() {
        let mut buffer = TextBuffer::new();
        assert!(!buffer.is_modified());

        buffer.set_text("hello");
        assert_eq!(buffer.text(), "hello");
        assert!(buffer.is_modified());
        assert_eq!(buffer.revision(), 1);
    }

    #[test]
    fn test_set_identical_text_is_noop() {
        let mut buffer = TextBuffer::from("same");
        buffer.set_text("same");
        assert!(!buffer.is_modified());
        assert!(!buffer.can_undo());
        assert_eq!(buffer.revision(), 0);
    }

    #[test]
    fn test_empty_text_is_accepted() {
        let mut buffer = TextBuffer::from("something");
        buffer.set_text("");
        assert!(buffer.is_empty());
        assert_eq!(buffer.len_lines(), 1);
    }

    #[test]
    fn test_replace_all_literal() {
        let mut buffer = TextBuffer::from("a.b.c");
        let count = buffer.replace_all(".", "::");
        assert_eq!(count, 2);
        assert_eq!(buffer.text(), "a::b::c");
    }

    #[test]
    fn test_replace_all_non_overlapping() {
        let mut buffer = TextBuffer::from("aaaa");
        assert_eq!(buffer.replace_all("aa", "b"), 2);
        assert_eq!(buffer.text(), "bb");

        let mut buffer = TextBuffer::from("aaa");
        assert_eq!(buffer.replace_all("aa", "b"), 1);
        assert_eq!(buffer.text(), "ba");
    }

    #[test]
    fn test_replace_all_does_not_rescan_replacement() {
        let mut buffer = TextBuffer::from("ab ab");
        assert_eq!(buffer.replace_all("ab", "abab"), 2);
        assert_eq!(buffer.text(), "abab abab");
    }

    #[test]
    fn test_replace_all_empty_pattern() {
        let mut buffer = TextBuffer::from("abc");
        assert_eq!(buffer.replace_all("", "x"), 0);
        assert_eq!(buffer.text(), "abc");
        assert!(!buffer.is_modified());
    }

    #[test]
    fn test_replace_all_is_one_undo_step() {
        let mut buffer = TextBuffer::from("x y x");
        buffer.replace_all("x", "z");
        assert_eq!(buffer.text(), "z y z");

        buffer.undo().unwrap();
        assert_eq!(buffer.text(), "x y x");
        assert!(!buffer.can_undo());
    }

    #[test]
    fn test_replace_with_same_text_counts_but_keeps_history_clean() {
        let mut buffer = TextBuffer::from("aa");
        assert_eq!(buffer.replace_all("a", "a"), 2);
        assert!(!buffer.can_undo());
    }

    #[test]
    fn test_undo_redo() {
        let mut buffer = TextBuffer::new();
        buffer.set_text("Hello");
        buffer.set_text("Hello World");

        buffer.undo().unwrap();
        assert_eq!(buffer.text(), "Hello");

        buffer.redo().unwrap();
        assert_eq!(buffer.text(), "Hello World");

        assert!(matches!(buffer.redo(), Err(BufferError::NothingToRedo)));
    }

    #[test]
    fn test_undo_on_fresh_buffer() {
        let mut buffer = TextBuffer::new();
        assert!(matches!(buffer.undo(), Err(BufferError::NothingToUndo)));
    }

    #[test]
    fn test_load_resets_history_and_sets_path() {
        let mut buffer = TextBuffer::new();
        buffer.set_text("draft");
        buffer.load("from disk", "/tmp/file.txt");

        assert_eq!(buffer.text(), "from disk");
        assert_eq!(buffer.file_path(), Some(Path::new("/tmp/file.txt")));
        assert!(!buffer.is_modified());
        assert!(!buffer.can_undo());
    }

    #[test]
    fn test_line_numbers() {
        assert_eq!(TextBuffer::new().line_numbers(), "1");
        assert_eq!(TextBuffer::from("a\nb\nc").line_numbers(), "1\n2\n3");
        assert_eq!(TextBuffer::from("a\n").line_numbers(), "1\n2");
    }

    #[test]
    fn test_keystrokes_on_large_buffer_keep_history_small() {
        let mut text = "x".repeat(1024 * 1024);
        let mut buffer = TextBuffer::from(text.as_str());

        for i in 0..500 {
            text.insert(i * 2, 'y');
            buffer.set_text(&text);
        }

        assert_eq!(buffer.history.undo_len(), 500);
        assert!(buffer.history.retained_bytes() <= 500);

        for _ in 0..500 {
            buffer.undo().unwrap();
        }
        assert_eq!(buffer.text(), "x".repeat(1024 * 1024));
    }

    #[test]
    fn test_undo_redo_in_the_middle_of_multibyte_text() {
        let mut buffer = TextBuffer::from("héllo wörld");
        buffer.set_text("héllo, wörld!");
        buffer.set_text("hé wörld!");

        buffer.undo().unwrap();
        assert_eq!(buffer.text(), "héllo, wörld!");
        buffer.undo().unwrap();
        assert_eq!(buffer.text(), "héllo wörld");
        buffer.redo().unwrap();
        buffer.redo().unwrap();
        assert_eq!(buffer.text(), "hé wörld!");
    }

    #[test]
    fn test_crlf_file_round_trips() {
        let mut buffer = TextBuffer::new();
        buffer.load("one\r\ntwo\r\n", "/tmp/dos.txt");
        assert_eq!(buffer.text(), "one\ntwo\n");
        assert_eq!(buffer.line_ending(), LineEnding::CrLf);

        buffer.set_text("one\ntwo\nthree");
        assert_eq!(buffer.disk_text(), "one\r\ntwo\r\nthree");

        buffer.load("unix\n", "/tmp/unix.txt");
        assert_eq!(buffer.disk_text(), "unix\n");
    }

    #[test]
    fn test_find_all_char_offsets() {
        let buffer = TextBuffer::from("héllo héllo");
        assert_eq!(buffer.find_all("llo"), vec![2, 8]);
        assert!(buffer.find_all("").is_empty());
    }

    proptest! {
        #[test]
        fn replace_all_matches_str_replace(
            text in "[ab ]{0,40}",
            pattern in "[ab]{1,3}",
            replacement in "[abc]{0,3}",
        ) {
            let mut buffer = TextBuffer::from(text.as_str());
            let count = buffer.replace_all(&pattern, &replacement);
            prop_assert_eq!(buffer.text().into_owned(), text.replace(&pattern, &replacement));
            prop_assert_eq!(count, text.matches(pattern.as_str()).count());
        }
    }
}
