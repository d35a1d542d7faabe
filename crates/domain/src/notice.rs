//! Notice — a user-visible, dismissible notification.

use serde::Serialize;

use crate::id::NoticeId;
use crate::time::{Timestamp, now};

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A message for the user, such as "Failed to toggle todo".
///
/// The `id` is assigned by whichever notifier accepts the notice; freshly
/// constructed notices carry `NoticeId(0)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub id: NoticeId,
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
    pub created_at: Timestamp,
}

impl Notice {
    #[must_use]
    pub fn new(level: NoticeLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: NoticeId(0),
            level,
            title: title.into(),
            message: message.into(),
            created_at: now(),
        }
    }

    #[must_use]
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, title, message)
    }

    #[must_use]
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, title, message)
    }
}
