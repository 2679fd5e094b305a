//! Transient user-facing notifications.

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use tracing::{error, info, warn};
use ts_rs::TS;

/// Severity of a notification shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Error,
}

/// One transient message for the user.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
}

/// Delivery backend for notifications.
pub trait NotificationSink: Send + Sync {
    fn push(&self, notification: Notification);
}

/// Sink that logs notifications through `tracing`.
#[derive(Debug, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn push(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Info => {
                info!(title = %notification.title, "{}", notification.message)
            }
            NotificationLevel::Error => {
                error!(title = %notification.title, "{}", notification.message)
            }
        }
    }
}

/// Sink that shows desktop notifications.
#[derive(Debug, Default)]
pub struct DesktopSink;

impl NotificationSink for DesktopSink {
    fn push(&self, notification: Notification) {
        let result = notify_rust::Notification::new()
            .summary(&notification.title)
            .body(&notification.message)
            .show();
        if let Err(e) = result {
            warn!("failed to show desktop notification: {}", e);
        }
    }
}

/// Sink that records notifications in memory so the surrounding UI (or
/// a test) can drain them.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<Notification>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all recorded notifications, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.entries.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NotificationSink for MemorySink {
    fn push(&self, notification: Notification) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

/// Handle services use to notify the user.
#[derive(Clone)]
pub struct NotificationService {
    sink: Arc<dyn NotificationSink>,
}

impl NotificationService {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self { sink }
    }

    /// Service backed by the tracing log only.
    pub fn tracing() -> Self {
        Self::new(Arc::new(TracingSink))
    }

    /// Service backed by desktop notifications.
    pub fn desktop() -> Self {
        Self::new(Arc::new(DesktopSink))
    }

    /// Service backed by an in-memory store; returns the store so the
    /// caller can drain it.
    pub fn in_memory() -> (Self, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        (Self::new(sink.clone()), sink)
    }

    pub fn info(&self, title: impl Into<String>, message: impl Into<String>) {
        self.sink.push(Notification {
            level: NotificationLevel::Info,
            title: title.into(),
            message: message.into(),
        });
    }

    pub fn error(&self, title: impl Into<String>, message: impl Into<String>) {
        self.sink.push(Notification {
            level: NotificationLevel::Error,
            title: title.into(),
            message: message.into(),
        });
    }
}
