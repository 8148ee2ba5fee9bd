//! Outgoing notifications.
//!
//! [`NotificationSender`] is the seam between the workflow and the mail
//! provider. Production picks SMTP or the Resend HTTP API from configuration;
//! development logs messages; tests record them with [`MemorySender`].

pub mod log;
pub mod memory;
pub mod messages;
pub mod resend;
pub mod smtp;
pub mod whatsapp;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{MailConfig, MailProvider};

pub use self::log::LogSender;
pub use memory::MemorySender;
pub use resend::ResendSender;
pub use smtp::SmtpSender;

/// A rendered HTML email ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Mail provider not configured: {0}")]
    NotConfigured(&'static str),

    #[error("Email address parse error: {0}")]
    Address(String),

    #[error("Email build error: {0}")]
    Build(String),

    #[error("Mail transport error: {0}")]
    Transport(String),

    #[error("Mail provider rejected message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

#[async_trait]
pub trait NotificationSender: Send + Sync {
    async fn send(&self, email: &Email) -> Result<(), NotifyError>;

    fn name(&self) -> &'static str;
}

/// Build the sender selected by `MAIL_PROVIDER`
pub fn sender_from_config(config: &MailConfig) -> Result<Arc<dyn NotificationSender>, NotifyError> {
    let sender: Arc<dyn NotificationSender> = match config.provider {
        MailProvider::Smtp => Arc::new(SmtpSender::from_config(config)?),
        MailProvider::Resend => Arc::new(ResendSender::from_config(config)?),
        MailProvider::Log => Arc::new(LogSender),
    };
    tracing::info!("Using {} mail sender", sender.name());
    Ok(sender)
}
