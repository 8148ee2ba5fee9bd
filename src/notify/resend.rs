use async_trait::async_trait;
use serde::Serialize;

use super::{Email, NotificationSender, NotifyError};
use crate::config::MailConfig;

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

#[derive(Serialize)]
struct ResendPayload<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

/// Resend HTTP API
pub struct ResendSender {
    client: reqwest::Client,
    api_key: String,
    from: String,
    endpoint: String,
}

impl ResendSender {
    pub fn from_config(config: &MailConfig) -> Result<Self, NotifyError> {
        let api_key = config
            .resend_api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or(NotifyError::NotConfigured("RESEND_API_KEY"))?;

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            from: config.from_address.clone(),
            endpoint: RESEND_ENDPOINT.to_string(),
        })
    }
}

#[async_trait]
impl NotificationSender for ResendSender {
    async fn send(&self, email: &Email) -> Result<(), NotifyError> {
        let payload = ResendPayload {
            from: &self.from,
            to: [&email.to],
            subject: &email.subject,
            html: &email.html,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(to = %email.to, subject = %email.subject, "Email sent via Resend");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "resend"
    }
}
