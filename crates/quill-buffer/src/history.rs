//! Undo/redo history.
//!
//! Edits arrive from the shell as complete replacement texts (the widget owns
//! the cursor and keystroke handling). Storing those texts whole would keep a
//! full copy of the file per keystroke, so each entry is reduced to an
//! [`Edit`]: the byte offset where old and new text diverge, plus the span
//! that was removed and the span that replaced it.
//!
//! ## Learning: VecDeque as a bounded stack
//!
//! `VecDeque` gives O(1) push/pop at both ends. We push new entries on the
//! back and drop the oldest from the front once a limit is reached.

use std::collections::VecDeque;

/// Upper bound on the text held by the undo stack.
pub const DEFAULT_MAX_BYTES: usize = 64 * 1024 * 1024;

/// One reversible change: `removed` at byte offset `at` became `inserted`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub at: usize,
    pub removed: String,
    pub inserted: String,
}

impl Edit {
    /// Describes the change from `old` to `new`, or `None` if they are equal.
    ///
    /// The common prefix and suffix are trimmed so a keystroke in a large
    /// file records a few bytes.
    pub fn between(old: &str, new: &str) -> Option<Self> {
        if old == new {
            return None;
        }

        let prefix = common_prefix(old, new);
        let (old_rest, new_rest) = (&old[prefix..], &new[prefix..]);
        let suffix = common_suffix(old_rest, new_rest);

        Some(Self {
            at: prefix,
            removed: old_rest[..old_rest.len() - suffix].to_string(),
            inserted: new_rest[..new_rest.len() - suffix].to_string(),
        })
    }

    /// Bytes of text this entry keeps alive.
    pub fn size(&self) -> usize {
        self.removed.len() + self.inserted.len()
    }
}

/// Length in bytes of the longest shared prefix, on a char boundary.
fn common_prefix(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .take_while(|((_, x), y)| x == y)
        .last()
        .map_or(0, |((i, c), _)| i + c.len_utf8())
}

/// Length in bytes of the longest shared suffix, on a char boundary.
fn common_suffix(a: &str, b: &str) -> usize {
    a.chars()
        .rev()
        .zip(b.chars().rev())
        .take_while(|(x, y)| x == y)
        .map(|(c, _)| c.len_utf8())
        .sum()
}

/// Bounded undo/redo stacks of edits.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: VecDeque<Edit>,
    redo_stack: Vec<Edit>,
    limit: usize,
    max_bytes: usize,
    undo_bytes: usize,
}

impl History {
    /// Creates an empty history keeping at most `limit` undo steps.
    pub fn new(limit: usize) -> Self {
        Self::with_max_bytes(limit, DEFAULT_MAX_BYTES)
    }

    /// Like [`History::new`], also capping the bytes held by undo steps.
    pub fn with_max_bytes(limit: usize, max_bytes: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            limit,
            max_bytes,
            undo_bytes: 0,
        }
    }

    /// Records a change that was just applied.
    ///
    /// Any pending redo steps are discarded: a fresh edit starts a new branch.
    /// The oldest steps are dropped until both the step and byte limits hold.
    pub fn record(&mut self, edit: Edit) {
        self.redo_stack.clear();
        if self.limit == 0 {
            return;
        }

        self.undo_bytes += edit.size();
        self.undo_stack.push_back(edit);

        while self.undo_stack.len() > self.limit
            || (self.undo_bytes > self.max_bytes && self.undo_stack.len() > 1)
        {
            if let Some(dropped) = self.undo_stack.pop_front() {
                self.undo_bytes -= dropped.size();
            }
        }
    }

    /// Steps back. The returned edit must be reverted by the caller.
    pub fn undo(&mut self) -> Option<&Edit> {
        let edit = self.undo_stack.pop_back()?;
        self.undo_bytes -= edit.size();
        self.redo_stack.push(edit);
        self.redo_stack.last()
    }

    /// Steps forward again. The returned edit must be re-applied by the caller.
    pub fn redo(&mut self) -> Option<&Edit> {
        let edit = self.redo_stack.pop()?;
        self.undo_bytes += edit.size();
        self.undo_stack.push_back(edit);
        self.undo_stack.back()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Forgets everything, e.g. after loading a different file.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.undo_bytes = 0;
    }

    /// Number of undo steps currently held.
    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Bytes of text held by the undo stack.
    pub fn retained_bytes(&self) -> usize {
        self.undo_bytes
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(1000)
    }
}
