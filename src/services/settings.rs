//! Admin contact settings resolved through an ordered chain of providers.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::MailConfig;
use crate::database::models::setting::{CONTACT_EMAIL, WHATSAPP_NUMBER};
use crate::database::SettingsStore;

pub const DEFAULT_CONTACT_EMAIL: &str = "admin@projectready4u.com";
pub const DEFAULT_WHATSAPP_NUMBER: &str = "919876543210";

#[async_trait]
pub trait SettingProvider: Send + Sync {
    async fn lookup(&self, key: &str) -> Option<String>;
}

/// `admin_settings` rows. Store failures fall through to the next provider.
pub struct StoreProvider<S: ?Sized> {
    store: Arc<S>,
}

#[async_trait]
impl<S> SettingProvider for StoreProvider<S>
where
    S: SettingsStore + ?Sized,
{
    async fn lookup(&self, key: &str) -> Option<String> {
        match self.store.get_setting(key).await {
            Ok(setting) => setting
                .map(|s| s.setting_value)
                .filter(|v| !v.trim().is_empty()),
            Err(e) => {
                tracing::warn!(key, error = %e, "Settings lookup failed, using fallback");
                None
            }
        }
    }
}

/// Deployment-level values from `ADMIN_CONTACT_EMAIL` / `ADMIN_WHATSAPP_NUMBER`
pub struct ConfigProvider {
    email: Option<String>,
    whatsapp: Option<String>,
}

#[async_trait]
impl SettingProvider for ConfigProvider {
    async fn lookup(&self, key: &str) -> Option<String> {
        match key {
            CONTACT_EMAIL => self.email.clone(),
            WHATSAPP_NUMBER => self.whatsapp.clone(),
            _ => None,
        }
    }
}

pub struct DefaultsProvider;

#[async_trait]
impl SettingProvider for DefaultsProvider {
    async fn lookup(&self, key: &str) -> Option<String> {
        match key {
            CONTACT_EMAIL => Some(DEFAULT_CONTACT_EMAIL.to_string()),
            WHATSAPP_NUMBER => Some(DEFAULT_WHATSAPP_NUMBER.to_string()),
            _ => None,
        }
    }
}

/// Contact details used when notifying the admin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminContact {
    pub email: String,
    pub whatsapp: String,
}

pub struct SettingsChain {
    providers: Vec<Box<dyn SettingProvider>>,
}

impl SettingsChain {
    pub fn new(providers: Vec<Box<dyn SettingProvider>>) -> Self {
        Self { providers }
    }

    /// store, then configuration, then built-in defaults
    pub fn standard<S>(store: Arc<S>, mail: &MailConfig) -> Self
    where
        S: SettingsStore + ?Sized + 'static,
    {
        Self::new(vec![
            Box::new(StoreProvider { store }),
            Box::new(ConfigProvider {
                email: mail.admin_email.clone(),
                whatsapp: mail.admin_whatsapp.clone(),
            }),
            Box::new(DefaultsProvider),
        ])
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        for provider in &self.providers {
            if let Some(value) = provider.lookup(key).await {
                return Some(value);
            }
        }
        None
    }

    pub async fn admin_contact(&self) -> AdminContact {
        AdminContact {
            email: self
                .get(CONTACT_EMAIL)
                .await
                .unwrap_or_else(|| DEFAULT_CONTACT_EMAIL.to_string()),
            whatsapp: self
                .get(WHATSAPP_NUMBER)
                .await
                .unwrap_or_else(|| DEFAULT_WHATSAPP_NUMBER.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;

    fn mail(email: Option<&str>) -> MailConfig {
        MailConfig {
            admin_email: email.map(str::to_string),
            ..MailConfig::default()
        }
    }

    #[tokio::test]
    async fn store_value_wins() {
        let store = Arc::new(MemoryStore::new());
        store
            .upsert_setting(CONTACT_EMAIL, "owner@shop.in", "")
            .await
            .unwrap();
        let chain = SettingsChain::standard(store, &mail(Some("ops@shop.in")));
        assert_eq!(chain.admin_contact().await.email, "owner@shop.in");
    }

    #[tokio::test]
    async fn falls_back_to_config_then_defaults() {
        let store = Arc::new(MemoryStore::new());
        let chain = SettingsChain::standard(store.clone(), &mail(Some("ops@shop.in")));
        let contact = chain.admin_contact().await;
        assert_eq!(contact.email, "ops@shop.in");
        assert_eq!(contact.whatsapp, DEFAULT_WHATSAPP_NUMBER);

        let chain = SettingsChain::standard(store, &mail(None));
        assert_eq!(chain.admin_contact().await.email, DEFAULT_CONTACT_EMAIL);
    }

    #[tokio::test]
    async fn blank_store_value_is_ignored() {
        let store = Arc::new(MemoryStore::new());
        store.upsert_setting(WHATSAPP_NUMBER, "  ", "").await.unwrap();
        let chain = SettingsChain::standard(store, &mail(None));
        assert_eq!(chain.admin_contact().await.whatsapp, DEFAULT_WHATSAPP_NUMBER);
    }
}
