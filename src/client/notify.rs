//! Transient user notifications, delivered to a caller-owned presentation layer.

use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Loading,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Notification {
            kind,
            message: message.into(),
        }
    }
}

/// Receives notifications. Implementations must not block.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Collects notifications in order. Clones share the same log.
#[derive(Clone, Debug, Default)]
pub struct NotificationLog {
    events: Arc<Mutex<Vec<Notification>>>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Vec<Notification> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn kinds(&self) -> Vec<NotificationKind> {
        self.snapshot().into_iter().map(|n| n.kind).collect()
    }

    pub fn last(&self) -> Option<Notification> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).last().cloned()
    }

    /// Remove and return everything logged so far.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(|e| e.into_inner()))
    }
}

impl Notifier for NotificationLog {
    fn notify(&self, notification: Notification) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notification);
    }
}

/// Writes notifications to the log instead of a UI.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, n: Notification) {
        match n.kind {
            NotificationKind::Loading => tracing::debug!(message = %n.message, "loading"),
            NotificationKind::Success => tracing::info!(message = %n.message, "success"),
            NotificationKind::Warning => tracing::warn!(message = %n.message, "warning"),
            NotificationKind::Error => tracing::error!(message = %n.message, "error"),
        }
    }
}
