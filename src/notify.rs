use std::fmt;
use std::time::Duration;

use crate::error::{ErrorKind, PanelError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
    Warning,
    Info,
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NotificationLevel::Success => "success",
            NotificationLevel::Error => "error",
            NotificationLevel::Warning => "warning",
            NotificationLevel::Info => "info",
        };
        write!(f, "{s}")
    }
}

/// How long a notification stays up when nothing else is configured.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(3000);

/// A non-blocking message for the user (toast/banner).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    /// Time after which the view dismisses the notification.
    pub duration: Duration,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            duration: DEFAULT_DURATION,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Notification for a failed call. Validation problems are warnings,
    /// everything else is an error.
    pub fn from_error(err: &PanelError) -> Self {
        let level = match err.kind() {
            ErrorKind::Validation => NotificationLevel::Warning,
            _ => NotificationLevel::Error,
        };
        Self::new(level, err.to_string())
    }
}

/// Sink for user-facing notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);

    fn success(&self, message: &str) {
        self.notify(Notification::new(NotificationLevel::Success, message));
    }

    fn error(&self, message: &str) {
        self.notify(Notification::new(NotificationLevel::Error, message));
    }

    fn warning(&self, message: &str) {
        self.notify(Notification::new(NotificationLevel::Warning, message));
    }

    fn info(&self, message: &str) {
        self.notify(Notification::new(NotificationLevel::Info, message));
    }
}

/// Notifier that only logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        let text = notification.message.as_str();
        let duration_ms = notification.duration.as_millis() as u64;
        match notification.level {
            NotificationLevel::Error => tracing::error!(text, duration_ms, "notification"),
            NotificationLevel::Warning => tracing::warn!(text, duration_ms, "notification"),
            NotificationLevel::Success | NotificationLevel::Info => {
                tracing::info!(level = %notification.level, text, duration_ms, "notification")
            }
        }
    }
}
