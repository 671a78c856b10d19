//! # Quill Buffer
//!
//! The buffer store: text content plus the file it belongs to.
//!
//! ## Key Concepts for Learning Rust
//!
//! ### Ownership & Borrowing
//! - `TextBuffer` owns the rope and its history
//! - Methods like `text()` return borrowed data (`Cow<str>`)
//! - Mutations require `&mut self` (exclusive access)
//!
//! ### Sharing Across Threads
//! - `SharedBuffer` wraps a `TextBuffer` in `Arc<RwLock<_>>`
//! - The auto-save thread and the UI both go through the lock
//! - `Snapshot` captures text and path together so they always agree
//!
//! ### Undo Without Copies
//! - Every change is stored as an `Edit` (offset, removed, inserted)
//! - Undo splices the removed text back instead of restoring a full copy

mod buffer;
mod history;
mod line_ending;
mod shared;

pub use buffer::{gutter_text, TextBuffer};
pub use history::{Edit, History};
pub use line_ending::LineEnding;
pub use shared::{SharedBuffer, Snapshot};

/// Result type for buffer operations
pub type BufferResult<T> = Result<T, BufferError>;

/// Errors that can occur during buffer operations
#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_creation() {
        let buffer = TextBuffer::new();
        assert!(buffer.is_empty());
        assert_eq!(buffer.len_chars(), 0);
        assert!(!buffer.is_modified());
    }

    #[test]
    fn test_buffer_from_string() {
        let buffer = TextBuffer::from("Hello, World!");
        assert_eq!(buffer.len_chars(), 13);
        assert_eq!(buffer.text(), "Hello, World!");
    }

    #[test]
    fn test_shared_buffer_wraps_existing() {
        let shared = SharedBuffer::from(TextBuffer::from("abc"));
        assert_eq!(shared.text(), "abc");
        assert!(shared.file_path().is_none());
    }
}
