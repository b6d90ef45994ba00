//! User-facing notifications emitted by editing and submission operations.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{info, warn};

/// Severity of a notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Level {
    /// An operation completed.
    Success,
    /// Something worth telling the user that is not a failure.
    Info,
    /// An operation was rejected.
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

/// One notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    /// Severity.
    pub level: Level,
    /// Text shown to the user.
    pub message: String,
}

/// Sink for user-facing notifications.
pub trait Notifier {
    /// Delivers a notification.
    fn notify(&self, level: Level, message: &str);

    /// Delivers a success notification.
    fn success(&self, message: &str) {
        self.notify(Level::Success, message);
    }

    /// Delivers an info notification.
    fn info(&self, message: &str) {
        self.notify(Level::Info, message);
    }

    /// Delivers an error notification.
    fn error(&self, message: &str) {
        self.notify(Level::Error, message);
    }
}

/// Logs notifications through `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, level: Level, message: &str) {
        match level {
            Level::Success | Level::Info => info!(%level, "{message}"),
            Level::Error => warn!(%level, "{message}"),
        }
    }
}

/// Keeps every notification in a shared in-memory log.
///
/// Clones share the log, so a host can keep one handle and give another to
/// the store.
#[derive(Clone, Debug, Default)]
pub struct RecordingNotifier {
    log: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything recorded so far.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Returns the most recent notification.
    #[must_use]
    pub fn last(&self) -> Option<Notification> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Empties the log.
    pub fn clear(&self) {
        self.log.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: Level, message: &str) {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Notification {
                level,
                message: message.to_string(),
            });
    }
}
