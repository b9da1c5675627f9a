//! Mail transports.

use async_trait::async_trait;

use jobboard_core::ports::{MailError, Mailer};

/// Development transport: writes the message to the log instead of sending
/// it. Swap in an SMTP or provider transport for production.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        tracing::info!(
            mail_to = %to,
            mail_subject = %subject,
            mail_body = %body,
            "Outbound email"
        );
        Ok(())
    }
}
