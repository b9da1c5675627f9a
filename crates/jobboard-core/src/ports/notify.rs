//! Notification queue port.
//!
//! Side-effect emails (verification links, new-application notices) are
//! submitted here after the triggering mutation commits. The queue is
//! unordered and each notification is attempted at most once; outcome is
//! never awaited or inspected by request handlers.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A queued email notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl Notification {
    pub fn new(
        to: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Notification queue trait.
#[async_trait]
pub trait NotificationQueue: Send + Sync {
    /// Submit a notification for a single background delivery attempt.
    async fn submit(&self, notification: Notification) -> Result<(), NotifyError>;
}

/// Notification queue errors.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Failed to enqueue notification: {0}")]
    Enqueue(String),
}
