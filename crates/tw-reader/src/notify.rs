//! The single channel for user-visible success and error messages.

use std::collections::VecDeque;
use std::fmt;

/// A message for the reader, kept apart from navigation output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// An operation completed.
    Success(String),
    /// An operation failed.
    Error(String),
}

impl Notification {
    /// Message text.
    pub fn message(&self) -> &str {
        match self {
            Self::Success(msg) | Self::Error(msg) => msg,
        }
    }

    /// Whether this reports a failure.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Pending notifications, oldest first.
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    queue: VecDeque<Notification>,
}

impl Notifications {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a success message.
    pub fn success(&mut self, message: impl Into<String>) {
        self.queue.push_back(Notification::Success(message.into()));
    }

    /// Queue an error message.
    pub fn error(&mut self, message: impl Into<String>) {
        self.queue.push_back(Notification::Error(message.into()));
    }

    /// Number of pending notifications.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Most recent notification.
    pub fn last(&self) -> Option<&Notification> {
        self.queue.back()
    }

    /// Take all pending notifications.
    pub fn drain(&mut self) -> Vec<Notification> {
        self.queue.drain(..).collect()
    }
}
