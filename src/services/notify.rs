use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

/// Severity of a transient user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// Transient message for the host's toast/notification surface
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub at: DateTime<Utc>,
}

/// Fire-and-forget publisher of transient notices
///
/// The engine never waits for acknowledgment; if the host is not draining
/// the channel, excess notices are dropped rather than blocking the deck.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: mpsc::Sender<Notice>,
}

impl Notifier {
    /// Create a notifier and the receiver the host drains
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Notice>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    pub fn info(&self, message: impl Into<String>) {
        self.publish(NoticeLevel::Info, message.into());
    }

    pub fn success(&self, message: impl Into<String>) {
        self.publish(NoticeLevel::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.publish(NoticeLevel::Error, message.into());
    }

    fn publish(&self, level: NoticeLevel, message: String) {
        let notice = Notice {
            level,
            message,
            at: Utc::now(),
        };
        if let Err(e) = self.tx.try_send(notice) {
            tracing::warn!("Dropping notice, host not draining: {}", e);
        }
    }
}
