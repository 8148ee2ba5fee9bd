//! Back-office operations: admin accounts and sessions, settings, email templates.

use std::sync::Arc;

use chrono::Utc;
use once_cell::sync::Lazy;
use serde::Serialize;
use uuid::Uuid;

use super::error::WorkflowError;
use super::template::TemplateKey;
use crate::auth::{self, password, Claims, JwtError};
use crate::database::models::{AdminSetting, AdminUser, EmailTemplate};
use crate::database::Store;
use crate::notify::messages::default_template;

/// Verified against when the email is unknown, so both paths pay for one Argon2 run
static DUMMY_HASH: Lazy<String> =
    Lazy::new(|| password::hash_password("unknown-admin-placeholder").unwrap_or_default());

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error(transparent)]
    Token(#[from] JwtError),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),
}

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub token: String,
    pub admin: AdminUser,
    pub expires_in: u64,
}

pub struct AdminService {
    store: Arc<dyn Store>,
    jwt_secret: String,
    jwt_expiry_hours: u64,
}

impl AdminService {
    pub fn new(store: Arc<dyn Store>, jwt_secret: String, jwt_expiry_hours: u64) -> Self {
        Self {
            store,
            jwt_secret,
            jwt_expiry_hours,
        }
    }

    pub async fn create_admin(&self, email: &str, plain_password: &str) -> Result<AdminUser, WorkflowError> {
        let email = email.trim().to_lowercase();
        if !super::is_valid_email(&email) {
            return Err(WorkflowError::validation("email", "Invalid email address"));
        }
        password::check_password_strength(plain_password)
            .map_err(|msg| WorkflowError::validation("password", msg))?;

        if self.store.find_admin_by_email(&email).await?.is_some() {
            return Err(WorkflowError::Conflict(format!("Admin {} already exists", email)));
        }

        let password_hash = password::hash_password(plain_password)
            .map_err(|e| WorkflowError::validation("password", e.to_string()))?;
        let admin = AdminUser {
            id: Uuid::new_v4(),
            email,
            password_hash,
            created_at: Utc::now(),
        };
        self.store.insert_admin(&admin).await?;
        tracing::info!(admin = %admin.email, "Admin account created");
        Ok(admin)
    }

    pub async fn list_admins(&self) -> Result<Vec<AdminUser>, WorkflowError> {
        Ok(self.store.list_admins().await?)
    }

    /// Admins cannot remove themselves, and the last account always stays
    pub async fn delete_admin(&self, id: Uuid, acting_admin: Uuid) -> Result<(), WorkflowError> {
        if id == acting_admin {
            return Err(WorkflowError::Conflict("Admins cannot delete their own account".into()));
        }
        let admins = self.store.list_admins().await?;
        let target = admins
            .iter()
            .find(|a| a.id == id)
            .ok_or(WorkflowError::NotFound("Admin"))?;
        if admins.len() <= 1 {
            return Err(WorkflowError::Conflict("The last admin cannot be deleted".into()));
        }
        self.store.delete_admin(id).await?;
        tracing::info!(admin = %target.email, "Admin account deleted");
        Ok(())
    }

    /// Seeds the configured account when the admin table is empty
    pub async fn ensure_bootstrap_admin(
        &self,
        email: &str,
        plain_password: &str,
    ) -> Result<Option<AdminUser>, WorkflowError> {
        if !self.store.list_admins().await?.is_empty() {
            return Ok(None);
        }
        let admin = self.create_admin(email, plain_password).await?;
        tracing::warn!(admin = %admin.email, "Bootstrap admin created; change its password");
        Ok(Some(admin))
    }

    pub async fn login(&self, email: &str, plain_password: &str) -> Result<Session, LoginError> {
        let email = email.trim().to_lowercase();
        let admin = match self.store.find_admin_by_email(&email).await.map_err(WorkflowError::from)? {
            Some(admin) => admin,
            None => {
                let _ = password::verify_password(plain_password, &DUMMY_HASH);
                tracing::info!(admin = %email, "Admin login failed");
                return Err(LoginError::InvalidCredentials);
            }
        };

        let matches = password::verify_password(plain_password, &admin.password_hash).unwrap_or_else(|e| {
            tracing::error!(admin = %admin.email, error = %e, "Stored password hash is malformed");
            false
        });
        if !matches {
            tracing::info!(admin = %email, "Admin login failed");
            return Err(LoginError::InvalidCredentials);
        }

        let claims = Claims::new(admin.id, admin.email.clone(), self.jwt_expiry_hours);
        let token = auth::generate_jwt(&claims, &self.jwt_secret)?;
        tracing::info!(admin = %admin.email, "Admin logged in");

        Ok(Session {
            token,
            admin,
            expires_in: self.jwt_expiry_hours * 3600,
        })
    }

    pub async fn settings(&self) -> Result<Vec<AdminSetting>, WorkflowError> {
        Ok(self.store.list_settings().await?)
    }

    pub async fn upsert_setting(
        &self,
        key: &str,
        value: &str,
        description: Option<&str>,
    ) -> Result<AdminSetting, WorkflowError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(WorkflowError::validation("key", "Setting key is required"));
        }
        if value.trim().is_empty() {
            return Err(WorkflowError::validation("value", "Setting value is required"));
        }
        let setting = self
            .store
            .upsert_setting(key, value.trim(), description.unwrap_or_default())
            .await?;
        tracing::info!(key, "Setting updated");
        Ok(setting)
    }

    /// Stored templates, with built-in defaults filling in any key that has no row
    pub async fn templates(&self) -> Result<Vec<EmailTemplate>, WorkflowError> {
        let stored = self.store.list_templates().await?;
        let mut all: Vec<EmailTemplate> = TemplateKey::ALL
            .into_iter()
            .map(|key| {
                stored
                    .iter()
                    .find(|t| t.template_key == key.as_str())
                    .cloned()
                    .unwrap_or_else(|| built_in(key))
            })
            .collect();
        all.sort_by(|a, b| a.template_name.cmp(&b.template_name));
        Ok(all)
    }

    pub async fn update_template(&self, key: &str, subject: &str, html: &str) -> Result<EmailTemplate, WorkflowError> {
        let key: TemplateKey = key.parse().map_err(|_| WorkflowError::NotFound("Template"))?;
        if subject.trim().is_empty() {
            return Err(WorkflowError::validation("subject", "Subject is required"));
        }
        if html.trim().is_empty() {
            return Err(WorkflowError::validation("htmlContent", "HTML content is required"));
        }

        let template = EmailTemplate {
            subject: subject.to_string(),
            html_content: html.to_string(),
            updated_at: Utc::now(),
            ..built_in(key)
        };
        let stored = self.store.upsert_template(&template).await?;
        tracing::info!(template = %key, "Email template updated");
        Ok(stored)
    }
}

fn built_in(key: TemplateKey) -> EmailTemplate {
    let fallback = default_template(key);
    EmailTemplate {
        template_key: key.as_str().to_string(),
        template_name: key.display_name().to_string(),
        subject: fallback.subject.to_string(),
        html_content: fallback.html.to_string(),
        description: format!("Variables: {}", key.variables().join(", ")),
        updated_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;

    fn service() -> AdminService {
        AdminService::new(Arc::new(MemoryStore::new()), "test-secret".into(), 1)
    }

    #[tokio::test]
    async fn login_issues_verifiable_token() {
        let svc = service();
        svc.create_admin("Owner@Shop.in", "correct-horse").await.unwrap();

        let session = svc.login("owner@shop.in", "correct-horse").await.unwrap();
        let claims = auth::validate_jwt(&session.token, "test-secret").unwrap();
        assert_eq!(claims.email, "owner@shop.in");
        assert_eq!(session.expires_in, 3600);

        assert!(matches!(
            svc.login("owner@shop.in", "wrong-horse!").await,
            Err(LoginError::InvalidCredentials)
        ));
        assert!(matches!(
            svc.login("nobody@shop.in", "correct-horse").await,
            Err(LoginError::InvalidCredentials)
        ));
    }

    #[test]
    fn placeholder_hash_never_matches() {
        assert!(!DUMMY_HASH.is_empty());
        assert_eq!(password::verify_password("correct-horse", &DUMMY_HASH).ok(), Some(false));
    }

    #[tokio::test]
    async fn delete_guards_self_and_last_admin() {
        let svc = service();
        let owner = svc.create_admin("owner@shop.in", "correct-horse").await.unwrap();
        assert!(matches!(
            svc.delete_admin(owner.id, Uuid::new_v4()).await,
            Err(WorkflowError::Conflict(_))
        ));

        let helper = svc.create_admin("helper@shop.in", "correct-horse").await.unwrap();
        assert!(matches!(
            svc.delete_admin(owner.id, owner.id).await,
            Err(WorkflowError::Conflict(_))
        ));
        assert!(matches!(
            svc.delete_admin(Uuid::new_v4(), owner.id).await,
            Err(WorkflowError::NotFound("Admin"))
        ));

        svc.delete_admin(helper.id, owner.id).await.unwrap();
        let remaining = svc.list_admins().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].email, "owner@shop.in");
    }

    #[tokio::test]
    async fn bootstrap_only_seeds_empty_table() {
        let svc = service();
        let seeded = svc.ensure_bootstrap_admin("root@shop.in", "correct-horse").await.unwrap();
        assert!(seeded.is_some());
        assert!(svc.ensure_bootstrap_admin("other@shop.in", "correct-horse").await.unwrap().is_none());
        assert!(svc.login("root@shop.in", "correct-horse").await.is_ok());
    }

    #[tokio::test]
    async fn duplicate_admin_is_conflict() {
        let svc = service();
        svc.create_admin("a@shop.in", "correct-horse").await.unwrap();
        assert!(matches!(
            svc.create_admin("A@shop.in", "correct-horse").await,
            Err(WorkflowError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn settings_require_key_and_value() {
        let svc = service();
        assert!(svc.upsert_setting("", "x", None).await.is_err());
        assert!(svc.upsert_setting("contact_email", " ", None).await.is_err());
        let s = svc
            .upsert_setting("contact_email", "owner@shop.in", Some("Admin inbox"))
            .await
            .unwrap();
        assert_eq!(s.setting_value, "owner@shop.in");
        assert_eq!(svc.settings().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn templates_list_includes_defaults_and_updates() {
        let svc = service();
        assert_eq!(svc.templates().await.unwrap().len(), 3);

        let updated = svc
            .update_template("project_approved", "Done: {project_title}", "<p>{download_link}</p>")
            .await
            .unwrap();
        assert_eq!(updated.template_name, "Project Approved");

        let all = svc.templates().await.unwrap();
        let approved = all.iter().find(|t| t.template_key == "project_approved").unwrap();
        assert_eq!(approved.subject, "Done: {project_title}");

        assert!(matches!(
            svc.update_template("welcome", "s", "b").await,
            Err(WorkflowError::NotFound("Template"))
        ));
    }
}
