//! A `TextBuffer` shared between the interactive thread and background work.
//!
//! ## Learning: Arc + RwLock
//!
//! `Arc` gives shared ownership across threads; `RwLock` lets many readers
//! in at once but gives a writer exclusive access. Every access goes through
//! the lock, so a reader can never observe a half-written buffer.
//!
//! Poisoning is recovered rather than propagated. A writer that panics
//! mid-edit still leaves a rope of valid UTF-8 behind, and the auto-save
//! thread keeps going with whatever text is there.

use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::TextBuffer;

/// Text, path and revision captured under one read-lock acquisition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub text: String,
    pub path: Option<PathBuf>,
    pub revision: u64,
}

/// Cheaply clonable handle to a lock-guarded buffer.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<RwLock<TextBuffer>>,
}

impl SharedBuffer {
    pub fn new(buffer: TextBuffer) -> Self {
        Self {
            inner: Arc::new(RwLock::new(buffer)),
        }
    }

    /// Shared access. Hold the guard only as long as needed.
    pub fn read(&self) -> RwLockReadGuard<'_, TextBuffer> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Exclusive access.
    pub fn write(&self) -> RwLockWriteGuard<'_, TextBuffer> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Captures a consistent view of the buffer.
    pub fn snapshot(&self) -> Snapshot {
        let buffer = self.read();
        Snapshot {
            text: buffer.text().into_owned(),
            path: buffer.file_path().map(|p| p.to_path_buf()),
            revision: buffer.revision(),
        }
    }

    pub fn text(&self) -> String {
        self.read().text().into_owned()
    }

    pub fn set_text(&self, text: &str) {
        self.write().set_text(text);
    }

    pub fn file_path(&self) -> Option<PathBuf> {
        self.read().file_path().map(|p| p.to_path_buf())
    }

    pub fn set_file_path(&self, path: impl Into<PathBuf>) {
        self.write().set_file_path(path);
    }

    pub fn is_modified(&self) -> bool {
        self.read().is_modified()
    }
}

impl From<TextBuffer> for SharedBuffer {
    fn from(buffer: TextBuffer) -> Self {
        Self::new(buffer)
    }
}
