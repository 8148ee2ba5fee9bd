use std::collections::HashMap;
use std::sync::Arc;

use crate::database::TemplateStore;
use crate::notify::messages::default_template;
use crate::notify::{Email, NotificationSender, NotifyError};
use crate::services::template::{render, TemplateKey};

/// Renders a stored (or built-in) template and hands it to the sender
pub struct Notifier<S: ?Sized> {
    templates: Arc<S>,
    sender: Arc<dyn NotificationSender>,
}

impl<S> Notifier<S>
where
    S: TemplateStore + ?Sized,
{
    pub fn new(templates: Arc<S>, sender: Arc<dyn NotificationSender>) -> Self {
        Self { templates, sender }
    }

    pub async fn compose(&self, key: TemplateKey, to: &str, vars: &HashMap<String, String>) -> Email {
        let stored = match self.templates.get_template(key.as_str()).await {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(template = %key, error = %e, "Template lookup failed, using built-in");
                None
            }
        };

        let (html, subject) = match stored {
            Some(t) => render(&t.html_content, &t.subject, vars),
            None => {
                let fallback = default_template(key);
                render(fallback.html, fallback.subject, vars)
            }
        };

        Email {
            to: to.to_string(),
            subject,
            html,
        }
    }

    pub async fn send(&self, key: TemplateKey, to: &str, vars: &HashMap<String, String>) -> Result<(), NotifyError> {
        let email = self.compose(key, to, vars).await;
        self.sender.send(&email).await?;
        tracing::debug!(template = %key, to, "Notification delivered");
        Ok(())
    }
}
