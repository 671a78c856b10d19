//! Event system for editor notifications.
//!
//! ## Learning: Observer Pattern in Rust
//!
//! We use `tokio::sync::broadcast` as an event bus. `Sender::send` is a
//! plain synchronous call, so the auto-save thread can publish without
//! running inside a tokio runtime, and the UI drains its receiver with
//! `try_recv` on a timer.

use std::path::PathBuf;
use tokio::sync::broadcast;

/// Events that can occur in the editor.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// A file was loaded into the buffer
    Opened(PathBuf),
    /// The buffer was saved by the user
    Saved(PathBuf),
    /// The background loop persisted the buffer
    AutoSaved(PathBuf),
    /// The background loop failed to persist the buffer
    AutoSaveFailed { path: PathBuf, error: String },
    /// Search-and-replace rewrote the buffer
    ContentReplaced { count: usize },
    /// Configuration changed
    ConfigChanged,
}

/// Event bus for broadcasting editor events.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EditorEvent>,
}

impl EventBus {
    /// Creates a new event bus.
    pub fn new() -> Self {
        // Capacity of 256 events in the buffer
        let (sender, _) = broadcast::channel(256);
        Self { sender }
    }

    /// Emits an event to all subscribers.
    pub fn emit(&self, event: EditorEvent) {
        // Ignore error if no receivers (not a problem)
        let _ = self.sender.send(event);
    }

    /// Subscribes to events.
    ///
    /// Returns a receiver that will get all future events.
    pub fn subscribe(&self) -> broadcast::Receiver<EditorEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Drains everything currently queued on a receiver without waiting.
///
/// Lagged receivers skip the lost events and keep going.
pub fn drain(receiver: &mut broadcast::Receiver<EditorEvent>) -> Vec<EditorEvent> {
    use broadcast::error::TryRecvError;

    let mut events = Vec::new();
    loop {
        match receiver.try_recv() {
            Ok(event) => events.push(event),
            Err(TryRecvError::Lagged(n)) => {
                tracing::warn!("Event receiver lagged, missed {} events", n);
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return events,
        }
    }
}
