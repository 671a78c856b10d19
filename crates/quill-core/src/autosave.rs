//! Timed background persistence.
//!
//! The loop has one state: wait for the interval, then persist the buffer
//! if it has an associated file. A failed write is logged and published on
//! the event bus; the loop carries on with the next interval.
//!
//! ## Learning: Channels as stop signals
//!
//! The thread sleeps in `recv_timeout` on a channel instead of
//! `thread::sleep`. A timeout means "interval elapsed"; a message or a
//! dropped sender means "stop now", which lets `AutoSaver` shut the thread
//! down without waiting out the interval.

use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use quill_buffer::SharedBuffer;

use crate::event::{EditorEvent, EventBus};
use crate::persistence::Persistence;
use crate::{CoreError, CoreResult};

/// Interval used when nothing else is configured.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);

/// What a single auto-save attempt did.
#[derive(Debug)]
pub enum AutoSaveOutcome {
    /// No file is associated with the buffer; nothing was touched.
    Skipped,
    /// The buffer was written.
    Saved { path: PathBuf, bytes: usize },
    /// The write failed.
    Failed { path: PathBuf, error: CoreError },
}

/// Performs one auto-save attempt.
///
/// The buffer's write lock is held from the path check until the modified
/// flag is cleared, so the file receives exactly one buffer state and a
/// foreground save cannot interleave with it.
pub fn tick(buffer: &SharedBuffer, persistence: &Persistence) -> AutoSaveOutcome {
    let mut guard = buffer.write();
    let Some(path) = guard.file_path().map(|p| p.to_path_buf()) else {
        return AutoSaveOutcome::Skipped;
    };

    let text = guard.disk_text();
    match persistence.store(&path, &text) {
        Ok(()) => {
            guard.mark_saved();
            AutoSaveOutcome::Saved {
                path,
                bytes: text.len(),
            }
        }
        Err(error) => AutoSaveOutcome::Failed { path, error },
    }
}

/// Handle to the running auto-save thread.
///
/// Dropping the handle stops the thread and waits for any in-flight write.
#[derive(Debug)]
pub struct AutoSaver {
    stop: Option<mpsc::Sender<()>>,
    handle: Option<JoinHandle<()>>,
    interval: Duration,
}

impl AutoSaver {
    /// Starts the loop on a dedicated thread.
    pub fn spawn(
        buffer: SharedBuffer,
        persistence: Persistence,
        interval: Duration,
        events: EventBus,
    ) -> CoreResult<Self> {
        let (stop, stop_rx) = mpsc::channel();
        let handle = thread::Builder::new()
            .name("quill-autosave".to_string())
            .spawn(move || run(buffer, persistence, interval, events, stop_rx))?;

        tracing::info!("Auto-save every {:?}", interval);

        Ok(Self {
            stop: Some(stop),
            handle: Some(handle),
            interval,
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Stops the loop and joins the thread.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        // Dropping the sender disconnects the channel and wakes the thread.
        self.stop.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("Auto-save thread panicked");
            }
        }
    }
}

impl Drop for AutoSaver {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run(
    buffer: SharedBuffer,
    persistence: Persistence,
    interval: Duration,
    events: EventBus,
    stop: mpsc::Receiver<()>,
) {
    loop {
        match stop.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }

        match tick(&buffer, &persistence) {
            AutoSaveOutcome::Skipped => {
                tracing::trace!("Auto-save skipped: no file associated");
            }
            AutoSaveOutcome::Saved { path, bytes } => {
                tracing::debug!(path = %path.display(), bytes, "Auto-saved");
                events.emit(EditorEvent::AutoSaved(path));
            }
            AutoSaveOutcome::Failed { path, error } => {
                tracing::error!(path = %path.display(), "Auto-save failed: {}", error);
                events.emit(EditorEvent::AutoSaveFailed {
                    path,
                    error: error.to_string(),
                });
            }
        }
    }

    tracing::debug!("Auto-save loop stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::drain;
    use std::time::Instant;

    #[test]
    fn test_tick_without_path_leaves_buffer_alone() {
        let buffer = SharedBuffer::default();
        buffer.set_text("unsaved");
        let before = buffer.snapshot();

        let outcome = tick(&buffer, &Persistence::default());

        assert!(matches!(outcome, AutoSaveOutcome::Skipped));
        assert!(buffer.is_modified(), "a skipped tick must not count as a save");
        assert_eq!(buffer.snapshot(), before);
    }

    #[test]
    fn test_tick_keeps_crlf_line_endings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dos.txt");
        let buffer = SharedBuffer::default();
        buffer.write().load("a\r\nb\r\n", &path);
        buffer.set_text("a\nb\nc\n");

        assert!(matches!(tick(&buffer, &Persistence::default()), AutoSaveOutcome::Saved { .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\r\nb\r\nc\r\n");
    }

    #[test]
    fn test_tick_writes_current_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        let buffer = SharedBuffer::default();
        buffer.set_text("hello");
        buffer.set_file_path(&path);

        let outcome = tick(&buffer, &Persistence::default());

        match outcome {
            AutoSaveOutcome::Saved { path: p, bytes } => {
                assert_eq!(p, path);
                assert_eq!(bytes, 5);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");
        assert!(!buffer.is_modified());
    }

    #[test]
    fn test_tick_failure_keeps_modified_flag() {
        let dir = tempfile::tempdir().unwrap();
        let buffer = SharedBuffer::default();
        buffer.set_text("pending");
        buffer.set_file_path(dir.path().join("gone").join("a.txt"));

        let outcome = tick(&buffer, &Persistence::in_place());

        assert!(matches!(outcome, AutoSaveOutcome::Failed { error: CoreError::Save { .. }, .. }));
        assert!(buffer.is_modified());
    }

    #[test]
    fn test_concurrent_edits_never_produce_mixed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("race.txt");
        let a = "a".repeat(256 * 1024);
        let b = "b".repeat(256 * 1024);

        let buffer = SharedBuffer::default();
        buffer.set_text(&a);
        buffer.set_file_path(&path);

        let editor_thread = {
            let buffer = buffer.clone();
            let (a, b) = (a.clone(), b.clone());
            thread::spawn(move || {
                for i in 0..100 {
                    buffer.set_text(if i % 2 == 0 { &b } else { &a });
                }
            })
        };

        for persistence in [Persistence::in_place(), Persistence::atomic()] {
            for _ in 0..20 {
                assert!(matches!(tick(&buffer, &persistence), AutoSaveOutcome::Saved { .. }));
                let on_disk = std::fs::read_to_string(&path).unwrap();
                assert!(on_disk == a || on_disk == b, "persisted a mix of two buffer states");
            }
        }

        editor_thread.join().unwrap();
    }

    #[test]
    fn test_loop_saves_on_interval_and_stops() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loop.txt");
        let buffer = SharedBuffer::default();
        buffer.set_text("hello");
        buffer.set_file_path(&path);

        let events = EventBus::new();
        let mut rx = events.subscribe();
        let saver = AutoSaver::spawn(
            buffer.clone(),
            Persistence::default(),
            Duration::from_millis(20),
            events,
        )
        .unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        while !path.exists() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        saver.stop();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");
        assert!(drain(&mut rx).contains(&EditorEvent::AutoSaved(path)));
    }

    #[test]
    fn test_loop_reports_failures_and_keeps_running() {
        let dir = tempfile::tempdir().unwrap();
        let buffer = SharedBuffer::default();
        buffer.set_text("x");
        buffer.set_file_path(dir.path().join("missing").join("x.txt"));

        let events = EventBus::new();
        let mut rx = events.subscribe();
        let saver = AutoSaver::spawn(
            buffer,
            Persistence::default(),
            Duration::from_millis(10),
            events,
        )
        .unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut failures = 0;
        while failures < 2 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(10));
            failures += drain(&mut rx)
                .iter()
                .filter(|e| matches!(e, EditorEvent::AutoSaveFailed { .. }))
                .count();
        }
        saver.stop();

        assert!(failures >= 2, "loop should survive repeated failures");
    }

    #[test]
    fn test_stop_does_not_wait_for_interval() {
        let saver = AutoSaver::spawn(
            SharedBuffer::default(),
            Persistence::default(),
            Duration::from_secs(3600),
            EventBus::new(),
        )
        .unwrap();
        assert_eq!(saver.interval(), Duration::from_secs(3600));

        let started = Instant::now();
        drop(saver);
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
