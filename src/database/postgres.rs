use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::manager::{DatabaseError, DatabaseManager};
use super::models::{
    AdminSetting, AdminUser, CustomerFeedback, DownloadLog, EmailTemplate, Project, ProjectRequest,
    RequestStatus,
};
use super::store::{AdminStore, CatalogStore, FeedbackStore, RequestStore, SettingsStore, Store, TemplateStore};

const REQUEST_COLUMNS: &str = "id, project_id, user_name, user_email, user_phone, college_name, \
     branch, semester, message, status, download_link, download_link_expires_at, \
     downloads_count, last_downloaded_at, created_at, updated_at";

const PROJECT_COLUMNS: &str = "id, title, slug, price, discounted_price, github_repo_link, created_at";

/// Postgres-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl RequestStore for PgStore {
    async fn insert_request(&self, request: &ProjectRequest) -> Result<(), DatabaseError> {
        sqlx::query(&format!(
            "INSERT INTO project_requests ({REQUEST_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)"
        ))
        .bind(request.id)
        .bind(request.project_id)
        .bind(&request.user_name)
        .bind(&request.user_email)
        .bind(&request.user_phone)
        .bind(&request.college_name)
        .bind(&request.branch)
        .bind(&request.semester)
        .bind(&request.message)
        .bind(request.status)
        .bind(&request.download_link)
        .bind(request.download_link_expires_at)
        .bind(request.downloads_count)
        .bind(request.last_downloaded_at)
        .bind(request.created_at)
        .bind(request.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_request(&self, id: Uuid) -> Result<Option<ProjectRequest>, DatabaseError> {
        let row = sqlx::query_as::<_, ProjectRequest>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM project_requests WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_requests(&self, status: Option<RequestStatus>) -> Result<Vec<ProjectRequest>, DatabaseError> {
        let rows = sqlx::query_as::<_, ProjectRequest>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM project_requests \
             WHERE ($1::request_status IS NULL OR status = $1) \
             ORDER BY created_at DESC"
        ))
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn count_requests_since(&self, email: &str, since: DateTime<Utc>) -> Result<i64, DatabaseError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM project_requests WHERE user_email = $1 AND created_at >= $2",
        )
        .bind(email)
        .bind(since)
        .fetch_one(&self.pool)
        .await?;
        Ok(count.0)
    }

    async fn mark_approved(
        &self,
        id: Uuid,
        download_link: &str,
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Option<ProjectRequest>, DatabaseError> {
        let row = sqlx::query_as::<_, ProjectRequest>(&format!(
            "UPDATE project_requests \
             SET status = 'approved', download_link = $2, download_link_expires_at = $3, updated_at = $4 \
             WHERE id = $1 RETURNING {REQUEST_COLUMNS}"
        ))
        .bind(id)
        .bind(download_link)
        .bind(expires_at)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn mark_rejected(&self, id: Uuid, now: DateTime<Utc>) -> Result<Option<ProjectRequest>, DatabaseError> {
        let row = sqlx::query_as::<_, ProjectRequest>(&format!(
            "UPDATE project_requests SET status = 'rejected', updated_at = $2 \
             WHERE id = $1 RETURNING {REQUEST_COLUMNS}"
        ))
        .bind(id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn record_download(&self, id: Uuid, now: DateTime<Utc>) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE project_requests \
             SET downloads_count = downloads_count + 1, last_downloaded_at = $2 \
             WHERE id = $1",
        )
        .bind(id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("project request {}", id)));
        }
        Ok(())
    }

    async fn insert_download_log(&self, entry: &DownloadLog) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO downloads (id, request_id, project_id, user_email, download_at, ip_address, user_agent) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(entry.id)
        .bind(entry.request_id)
        .bind(entry.project_id)
        .bind(&entry.user_email)
        .bind(entry.download_at)
        .bind(&entry.ip_address)
        .bind(&entry.user_agent)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn count_requests_for_project(&self, project_id: Uuid) -> Result<i64, DatabaseError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM project_requests WHERE project_id = $1")
            .bind(project_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl CatalogStore for PgStore {
    async fn get_project(&self, id: Uuid) -> Result<Option<Project>, DatabaseError> {
        let row = sqlx::query_as::<_, Project>(&format!("SELECT {} FROM projects WHERE id = $1", PROJECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_project_by_slug(&self, slug: &str) -> Result<Option<Project>, DatabaseError> {
        let row = sqlx::query_as::<_, Project>(&format!("SELECT {} FROM projects WHERE slug = $1", PROJECT_COLUMNS))
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_projects(&self) -> Result<Vec<Project>, DatabaseError> {
        let rows = sqlx::query_as::<_, Project>(&format!(
            "SELECT {} FROM projects ORDER BY created_at DESC",
            PROJECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn insert_project(&self, project: &Project) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO projects (id, title, slug, price, discounted_price, github_repo_link, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(project.id)
        .bind(&project.title)
        .bind(&project.slug)
        .bind(project.price)
        .bind(project.discounted_price)
        .bind(&project.github_repo_link)
        .bind(project.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_project(&self, project: &Project) -> Result<Option<Project>, DatabaseError> {
        let row = sqlx::query_as::<_, Project>(&format!(
            "UPDATE projects SET title = $2, slug = $3, price = $4, discounted_price = $5, github_repo_link = $6 \
             WHERE id = $1 RETURNING {}",
            PROJECT_COLUMNS
        ))
        .bind(project.id)
        .bind(&project.title)
        .bind(&project.slug)
        .bind(project.price)
        .bind(project.discounted_price)
        .bind(&project.github_repo_link)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete_project(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl SettingsStore for PgStore {
    async fn get_setting(&self, key: &str) -> Result<Option<AdminSetting>, DatabaseError> {
        let row = sqlx::query_as::<_, AdminSetting>(
            "SELECT setting_key, setting_value, description, updated_at FROM admin_settings WHERE setting_key = $1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_settings(&self) -> Result<Vec<AdminSetting>, DatabaseError> {
        let rows = sqlx::query_as::<_, AdminSetting>(
            "SELECT setting_key, setting_value, description, updated_at FROM admin_settings ORDER BY setting_key",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn upsert_setting(&self, key: &str, value: &str, description: &str) -> Result<AdminSetting, DatabaseError> {
        let row = sqlx::query_as::<_, AdminSetting>(
            "INSERT INTO admin_settings (setting_key, setting_value, description, updated_at) \
             VALUES ($1, $2, $3, now()) \
             ON CONFLICT (setting_key) DO UPDATE \
             SET setting_value = EXCLUDED.setting_value, description = EXCLUDED.description, updated_at = now() \
             RETURNING setting_key, setting_value, description, updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}

#[async_trait]
impl TemplateStore for PgStore {
    async fn get_template(&self, key: &str) -> Result<Option<EmailTemplate>, DatabaseError> {
        let row = sqlx::query_as::<_, EmailTemplate>(
            "SELECT template_key, template_name, subject, html_content, description, updated_at \
             FROM email_templates WHERE template_key = $1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_templates(&self) -> Result<Vec<EmailTemplate>, DatabaseError> {
        let rows = sqlx::query_as::<_, EmailTemplate>(
            "SELECT template_key, template_name, subject, html_content, description, updated_at \
             FROM email_templates ORDER BY template_name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn upsert_template(&self, template: &EmailTemplate) -> Result<EmailTemplate, DatabaseError> {
        let row = sqlx::query_as::<_, EmailTemplate>(
            "INSERT INTO email_templates (template_key, template_name, subject, html_content, description, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (template_key) DO UPDATE \
             SET subject = EXCLUDED.subject, html_content = EXCLUDED.html_content, updated_at = EXCLUDED.updated_at \
             RETURNING template_key, template_name, subject, html_content, description, updated_at",
        )
        .bind(&template.template_key)
        .bind(&template.template_name)
        .bind(&template.subject)
        .bind(&template.html_content)
        .bind(&template.description)
        .bind(template.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}

#[async_trait]
impl FeedbackStore for PgStore {
    async fn insert_feedback(&self, feedback: &CustomerFeedback) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO customer_feedback (id, name, email, rating, description, approved, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(feedback.id)
        .bind(&feedback.name)
        .bind(&feedback.email)
        .bind(feedback.rating)
        .bind(&feedback.description)
        .bind(feedback.approved)
        .bind(feedback.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_feedback(&self, approved: Option<bool>) -> Result<Vec<CustomerFeedback>, DatabaseError> {
        let rows = sqlx::query_as::<_, CustomerFeedback>(
            "SELECT id, name, email, rating, description, approved, created_at FROM customer_feedback \
             WHERE ($1::boolean IS NULL OR approved = $1) ORDER BY created_at DESC",
        )
        .bind(approved)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn set_feedback_approved(&self, id: Uuid, approved: bool) -> Result<Option<CustomerFeedback>, DatabaseError> {
        let row = sqlx::query_as::<_, CustomerFeedback>(
            "UPDATE customer_feedback SET approved = $2 WHERE id = $1 \
             RETURNING id, name, email, rating, description, approved, created_at",
        )
        .bind(id)
        .bind(approved)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete_feedback(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM customer_feedback WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl AdminStore for PgStore {
    async fn find_admin_by_email(&self, email: &str) -> Result<Option<AdminUser>, DatabaseError> {
        let row = sqlx::query_as::<_, AdminUser>(
            "SELECT id, email, password_hash, created_at FROM admin_users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert_admin(&self, admin: &AdminUser) -> Result<(), DatabaseError> {
        sqlx::query("INSERT INTO admin_users (id, email, password_hash, created_at) VALUES ($1, $2, $3, $4)")
            .bind(admin.id)
            .bind(&admin.email)
            .bind(&admin.password_hash)
            .bind(admin.created_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_admins(&self) -> Result<Vec<AdminUser>, DatabaseError> {
        let rows = sqlx::query_as::<_, AdminUser>(
            "SELECT id, email, password_hash, created_at FROM admin_users ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn delete_admin(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM admin_users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
