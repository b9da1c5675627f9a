//! In-memory notification queue.
//!
//! Notifications are handed to a background worker over a bounded channel
//! and delivered through the [`Mailer`] with a single attempt each; a failed
//! attempt is logged and dropped. Queued notifications are lost on restart.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use jobboard_core::ports::{Mailer, Notification, NotificationQueue, NotifyError};

/// In-memory at-most-once notification queue.
pub struct InMemoryNotificationQueue {
    sender: mpsc::Sender<Notification>,
}

impl InMemoryNotificationQueue {
    /// Spawn the delivery worker and return the queue handle.
    pub fn start(mailer: Arc<dyn Mailer>, capacity: usize) -> Self {
        let (sender, mut receiver) = mpsc::channel::<Notification>(capacity.max(1));

        tokio::spawn(async move {
            while let Some(notification) = receiver.recv().await {
                tracing::debug!(mail_to = %notification.to, "Delivering notification");

                if let Err(e) = mailer
                    .send(&notification.to, &notification.subject, &notification.body)
                    .await
                {
                    tracing::warn!(
                        mail_to = %notification.to,
                        error = %e,
                        "Notification delivery failed"
                    );
                }
            }

            tracing::info!("Notification worker shutting down");
        });

        Self { sender }
    }
}

#[async_trait]
impl NotificationQueue for InMemoryNotificationQueue {
    async fn submit(&self, notification: Notification) -> Result<(), NotifyError> {
        self.sender
            .send(notification)
            .await
            .map_err(|e| NotifyError::Enqueue(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::sync::Mutex;

    use jobboard_core::ports::MailError;

    use super::*;

    struct CapturingMailer {
        delivered: mpsc::Sender<(String, String)>,
        fail_first: Mutex<bool>,
    }

    #[async_trait]
    impl Mailer for CapturingMailer {
        async fn send(&self, to: &str, subject: &str, _body: &str) -> Result<(), MailError> {
            let mut fail = self.fail_first.lock().await;
            if *fail {
                *fail = false;
                return Err(MailError::Transport("connection refused".to_owned()));
            }
            drop(fail);

            self.delivered
                .send((to.to_owned(), subject.to_owned()))
                .await
                .map_err(|e| MailError::Transport(e.to_string()))
        }
    }

    #[tokio::test]
    async fn test_submitted_notification_is_delivered() {
        let (tx, mut rx) = mpsc::channel(4);
        let mailer = Arc::new(CapturingMailer {
            delivered: tx,
            fail_first: Mutex::new(false),
        });

        let queue = InMemoryNotificationQueue::start(mailer, 16);
        queue
            .submit(Notification::new("jane@x.com", "Verify your email", "link"))
            .await
            .unwrap();

        let (to, subject) = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(to, "jane@x.com");
        assert_eq!(subject, "Verify your email");
    }

    #[tokio::test]
    async fn test_failed_delivery_does_not_stop_the_worker() {
        let (tx, mut rx) = mpsc::channel(4);
        let mailer = Arc::new(CapturingMailer {
            delivered: tx,
            fail_first: Mutex::new(true),
        });

        let queue = InMemoryNotificationQueue::start(mailer, 16);
        queue
            .submit(Notification::new("first@x.com", "dropped", "-"))
            .await
            .unwrap();
        queue
            .submit(Notification::new("second@x.com", "delivered", "-"))
            .await
            .unwrap();

        // The first attempt fails and is not retried; the second arrives.
        let (to, _) = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(to, "second@x.com");
    }
}
