//! Notification dispatch for content updates
//!
//! Dispatch returns a future. The caller decides whether to await it or
//! detach it; failures never travel back into the store.

use async_trait::async_trait;
use ft_core::FingerprintRecord;
use thiserror::Error;
use tracing::info;

/// Default subscriber topic
pub const DEFAULT_TOPIC: &str = "everyone";

/// Message broadcast to subscribers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Announcement for a newly recorded fingerprint
    pub fn content_update(record: &FingerprintRecord) -> Self {
        let short_sha: String = record.sha.chars().take(8).collect();
        Self::new(
            format!("{} content update", record.game.display_name()),
            format!("Version {} is live (fingerprint {})", record.version, short_sha),
        )
    }
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification dispatcher unavailable: {0}")]
    Unavailable(String),

    #[error("notification rejected: {0}")]
    Rejected(String),
}

/// Broadcasts notifications to a fixed topic
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: &Notification) -> Result<(), NotifyError>;
}

/// Dispatcher that publishes to the log stream under a topic
#[derive(Debug, Clone)]
pub struct LogNotifier {
    topic: String,
}

impl LogNotifier {
    pub fn new(topic: impl Into<String>) -> Self {
        Self { topic: topic.into() }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }
}

impl Default for LogNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_TOPIC)
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        if self.topic.is_empty() {
            return Err(NotifyError::Rejected("empty topic".to_string()));
        }
        info!(
            topic = %self.topic,
            title = %notification.title,
            "Broadcast notification: {}",
            notification.body
        );
        Ok(())
    }
}
