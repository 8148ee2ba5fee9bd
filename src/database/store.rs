//! Storage seams consumed by the services.
//!
//! Every table the workflow touches is reached through one of these traits so
//! the same service code runs against Postgres ([`super::postgres::PgStore`])
//! and the in-memory store used by tests and local development
//! ([`super::memory::MemoryStore`]).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{
    AdminSetting, AdminUser, CustomerFeedback, DownloadLog, EmailTemplate, Project, ProjectRequest,
    RequestStatus,
};

#[async_trait]
pub trait RequestStore: Send + Sync {
    async fn insert_request(&self, request: &ProjectRequest) -> Result<(), DatabaseError>;

    async fn get_request(&self, id: Uuid) -> Result<Option<ProjectRequest>, DatabaseError>;

    /// Newest first
    async fn list_requests(&self, status: Option<RequestStatus>) -> Result<Vec<ProjectRequest>, DatabaseError>;

    /// Requests from `email` created at or after `since`
    async fn count_requests_since(&self, email: &str, since: DateTime<Utc>) -> Result<i64, DatabaseError>;

    /// Sets status, link and expiry together. `None` when the id is unknown.
    async fn mark_approved(
        &self,
        id: Uuid,
        download_link: &str,
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Option<ProjectRequest>, DatabaseError>;

    async fn mark_rejected(&self, id: Uuid, now: DateTime<Utc>) -> Result<Option<ProjectRequest>, DatabaseError>;

    /// Atomic `downloads_count + 1` and `last_downloaded_at = now`
    async fn record_download(&self, id: Uuid, now: DateTime<Utc>) -> Result<(), DatabaseError>;

    async fn insert_download_log(&self, entry: &DownloadLog) -> Result<(), DatabaseError>;

    async fn count_requests_for_project(&self, project_id: Uuid) -> Result<i64, DatabaseError>;
}

#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn get_project(&self, id: Uuid) -> Result<Option<Project>, DatabaseError>;

    async fn find_project_by_slug(&self, slug: &str) -> Result<Option<Project>, DatabaseError>;

    /// Newest first
    async fn list_projects(&self) -> Result<Vec<Project>, DatabaseError>;

    async fn insert_project(&self, project: &Project) -> Result<(), DatabaseError>;

    /// Replaces every editable column; `None` when the id is unknown
    async fn update_project(&self, project: &Project) -> Result<Option<Project>, DatabaseError>;

    /// `true` when a row was removed
    async fn delete_project(&self, id: Uuid) -> Result<bool, DatabaseError>;
}

#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get_setting(&self, key: &str) -> Result<Option<AdminSetting>, DatabaseError>;

    async fn list_settings(&self) -> Result<Vec<AdminSetting>, DatabaseError>;

    async fn upsert_setting(&self, key: &str, value: &str, description: &str) -> Result<AdminSetting, DatabaseError>;
}

#[async_trait]
pub trait TemplateStore: Send + Sync {
    async fn get_template(&self, key: &str) -> Result<Option<EmailTemplate>, DatabaseError>;

    async fn list_templates(&self) -> Result<Vec<EmailTemplate>, DatabaseError>;

    async fn upsert_template(&self, template: &EmailTemplate) -> Result<EmailTemplate, DatabaseError>;
}

#[async_trait]
pub trait FeedbackStore: Send + Sync {
    async fn insert_feedback(&self, feedback: &CustomerFeedback) -> Result<(), DatabaseError>;

    /// Newest first, optionally filtered by approval flag
    async fn list_feedback(&self, approved: Option<bool>) -> Result<Vec<CustomerFeedback>, DatabaseError>;

    async fn set_feedback_approved(&self, id: Uuid, approved: bool) -> Result<Option<CustomerFeedback>, DatabaseError>;

    /// `true` when a row was removed
    async fn delete_feedback(&self, id: Uuid) -> Result<bool, DatabaseError>;
}

#[async_trait]
pub trait AdminStore: Send + Sync {
    async fn find_admin_by_email(&self, email: &str) -> Result<Option<AdminUser>, DatabaseError>;

    async fn insert_admin(&self, admin: &AdminUser) -> Result<(), DatabaseError>;

    /// Oldest first
    async fn list_admins(&self) -> Result<Vec<AdminUser>, DatabaseError>;

    /// `true` when a row was removed
    async fn delete_admin(&self, id: Uuid) -> Result<bool, DatabaseError>;
}

/// Everything the HTTP layer needs, behind one object
#[async_trait]
pub trait Store: RequestStore + CatalogStore + SettingsStore + TemplateStore + FeedbackStore + AdminStore {
    async fn ping(&self) -> Result<(), DatabaseError>;
}
