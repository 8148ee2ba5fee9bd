use async_trait::async_trait;

use super::{Email, NotificationSender, NotifyError};

/// Writes messages to the log instead of delivering them
pub struct LogSender;

#[async_trait]
impl NotificationSender for LogSender {
    async fn send(&self, email: &Email) -> Result<(), NotifyError> {
        tracing::info!(to = %email.to, subject = %email.subject, "Email (not delivered)");
        tracing::debug!(html = %email.html);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
