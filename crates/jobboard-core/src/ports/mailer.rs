//! Mail collaborator port.

use async_trait::async_trait;

/// Outbound mail transport. Delivery is fire-and-forget from the domain's
/// point of view; failures are logged by the caller, never surfaced to the
/// HTTP request that triggered them.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Mail transport error: {0}")]
    Transport(String),
}
