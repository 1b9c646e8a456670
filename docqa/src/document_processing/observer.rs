// Observers notified around each extraction call

use std::collections::VecDeque;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::error::ExtractionError;
use super::extractors::NO_TEXT_CONTENT;
use super::format::FormatKind;

/// Default number of events kept by [`RecentLog`].
pub const DEFAULT_RECENT_CAPACITY: usize = 1000;

/// Callbacks invoked by [`ExtractionDispatcher`](super::ExtractionDispatcher).
///
/// `on_start` fires once an extractor has been selected, followed by exactly
/// one of `on_success` or `on_failure`. An unsupported extension only
/// produces `on_failure`. All methods default to doing nothing.
pub trait ExtractionObserver: Send + Sync {
    fn on_start(&self, _path: &Path, _kind: FormatKind) {}

    fn on_success(&self, _path: &Path, _kind: FormatKind, _text: &str) {}

    fn on_failure(&self, _path: &Path, _error: &ExtractionError) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ExtractionObserver for NoopObserver {}

/// Emits one `tracing` event per callback.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ExtractionObserver for TracingObserver {
    fn on_start(&self, path: &Path, kind: FormatKind) {
        tracing::info!(path = %path.display(), %kind, "Extracting text");
    }

    fn on_success(&self, path: &Path, kind: FormatKind, text: &str) {
        if text == NO_TEXT_CONTENT {
            tracing::warn!(path = %path.display(), %kind, "No text content found in document");
        } else {
            tracing::info!(
                path = %path.display(),
                %kind,
                chars = text.chars().count(),
                "Successfully extracted text"
            );
        }
    }

    fn on_failure(&self, path: &Path, error: &ExtractionError) {
        tracing::error!(path = %path.display(), %error, "Error extracting text");
    }
}

impl<T: ExtractionObserver + ?Sized> ExtractionObserver for Arc<T> {
    fn on_start(&self, path: &Path, kind: FormatKind) {
        (**self).on_start(path, kind)
    }

    fn on_success(&self, path: &Path, kind: FormatKind, text: &str) {
        (**self).on_success(path, kind, text)
    }

    fn on_failure(&self, path: &Path, error: &ExtractionError) {
        (**self).on_failure(path, error)
    }
}

/// Both observers receive every event, first one first.
impl<A: ExtractionObserver, B: ExtractionObserver> ExtractionObserver for (A, B) {
    fn on_start(&self, path: &Path, kind: FormatKind) {
        self.0.on_start(path, kind);
        self.1.on_start(path, kind);
    }

    fn on_success(&self, path: &Path, kind: FormatKind, text: &str) {
        self.0.on_success(path, kind, text);
        self.1.on_success(path, kind, text);
    }

    fn on_failure(&self, path: &Path, error: &ExtractionError) {
        self.0.on_failure(path, error);
        self.1.on_failure(path, error);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventLevel {
    Info,
    Warn,
    Error,
}

impl fmt::Display for EventLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractionEvent {
    pub timestamp: DateTime<Utc>,
    pub level: EventLevel,
    pub path: PathBuf,
    pub message: String,
}

impl fmt::Display for ExtractionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} [{}]",
            self.timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
            self.level,
            self.message,
            self.path.display()
        )
    }
}

/// Bounded in-memory buffer of the most recent extraction events
///
/// Meant to back a "recent activity" view in the hosting application. When
/// full, the oldest event is dropped.
#[derive(Debug)]
pub struct RecentLog {
    capacity: usize,
    events: Mutex<VecDeque<ExtractionEvent>>,
}

impl RecentLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            events: Mutex::new(VecDeque::with_capacity(capacity.min(DEFAULT_RECENT_CAPACITY))),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Copy of the buffered events, oldest first.
    pub fn snapshot(&self) -> Vec<ExtractionEvent> {
        self.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn push(&self, level: EventLevel, path: &Path, message: String) {
        if self.capacity == 0 {
            return;
        }

        let mut events = self.lock();
        while events.len() >= self.capacity {
            events.pop_front();
        }
        events.push_back(ExtractionEvent {
            timestamp: Utc::now(),
            level,
            path: path.to_path_buf(),
            message,
        });
    }

    // A panic while holding the lock leaves the buffer usable; keep going.
    fn lock(&self) -> MutexGuard<'_, VecDeque<ExtractionEvent>> {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for RecentLog {
    fn default() -> Self {
        Self::new(DEFAULT_RECENT_CAPACITY)
    }
}

impl ExtractionObserver for RecentLog {
    fn on_start(&self, path: &Path, kind: FormatKind) {
        self.push(
            EventLevel::Info,
            path,
            format!("Extracting text from {} file", kind),
        );
    }

    fn on_success(&self, path: &Path, kind: FormatKind, text: &str) {
        if text == NO_TEXT_CONTENT {
            self.push(
                EventLevel::Warn,
                path,
                "No text content found in document".to_string(),
            );
        } else {
            self.push(
                EventLevel::Info,
                path,
                format!("Successfully extracted text from {} file", kind),
            );
        }
    }

    fn on_failure(&self, path: &Path, error: &ExtractionError) {
        self.push(
            EventLevel::Error,
            path,
            format!("Error extracting text: {}", error),
        );
    }
}
