use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{
    AdminSetting, AdminUser, CustomerFeedback, DownloadLog, EmailTemplate, Project, ProjectRequest,
    RequestStatus,
};
use super::store::{AdminStore, CatalogStore, FeedbackStore, RequestStore, SettingsStore, Store, TemplateStore};

#[derive(Default)]
struct Tables {
    projects: HashMap<Uuid, Project>,
    requests: HashMap<Uuid, ProjectRequest>,
    downloads: Vec<DownloadLog>,
    settings: HashMap<String, AdminSetting>,
    templates: HashMap<String, EmailTemplate>,
    feedback: HashMap<Uuid, CustomerFeedback>,
    admins: HashMap<String, AdminUser>,
}

/// In-process store for tests and for development runs without `DATABASE_URL`.
///
/// All tables sit behind a single lock, so every trait method is atomic with
/// respect to the others.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed_project(&self, project: Project) {
        self.tables.write().await.projects.insert(project.id, project);
    }

    /// Insert a request as-is, bypassing validation (timestamps included)
    pub async fn seed_request(&self, request: ProjectRequest) {
        self.tables.write().await.requests.insert(request.id, request);
    }

    pub async fn downloads(&self) -> Vec<DownloadLog> {
        self.tables.read().await.downloads.clone()
    }
}

#[async_trait]
impl RequestStore for MemoryStore {
    async fn insert_request(&self, request: &ProjectRequest) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.projects.contains_key(&request.project_id) {
            return Err(DatabaseError::QueryError(format!(
                "project {} does not exist",
                request.project_id
            )));
        }
        tables.requests.insert(request.id, request.clone());
        Ok(())
    }

    async fn get_request(&self, id: Uuid) -> Result<Option<ProjectRequest>, DatabaseError> {
        Ok(self.tables.read().await.requests.get(&id).cloned())
    }

    async fn list_requests(&self, status: Option<RequestStatus>) -> Result<Vec<ProjectRequest>, DatabaseError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<ProjectRequest> = tables
            .requests
            .values()
            .filter(|r| status.map_or(true, |s| r.status == s))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn count_requests_since(&self, email: &str, since: DateTime<Utc>) -> Result<i64, DatabaseError> {
        let tables = self.tables.read().await;
        let count = tables
            .requests
            .values()
            .filter(|r| r.user_email == email && r.created_at >= since)
            .count();
        Ok(count as i64)
    }

    async fn mark_approved(
        &self,
        id: Uuid,
        download_link: &str,
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Option<ProjectRequest>, DatabaseError> {
        let mut tables = self.tables.write().await;
        Ok(tables.requests.get_mut(&id).map(|r| {
            r.status = RequestStatus::Approved;
            r.download_link = Some(download_link.to_string());
            r.download_link_expires_at = Some(expires_at);
            r.updated_at = now;
            r.clone()
        }))
    }

    async fn mark_rejected(&self, id: Uuid, now: DateTime<Utc>) -> Result<Option<ProjectRequest>, DatabaseError> {
        let mut tables = self.tables.write().await;
        Ok(tables.requests.get_mut(&id).map(|r| {
            r.status = RequestStatus::Rejected;
            r.updated_at = now;
            r.clone()
        }))
    }

    async fn record_download(&self, id: Uuid, now: DateTime<Utc>) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        let request = tables
            .requests
            .get_mut(&id)
            .ok_or_else(|| DatabaseError::NotFound(format!("project request {}", id)))?;
        request.downloads_count += 1;
        request.last_downloaded_at = Some(now);
        Ok(())
    }

    async fn insert_download_log(&self, entry: &DownloadLog) -> Result<(), DatabaseError> {
        self.tables.write().await.downloads.push(entry.clone());
        Ok(())
    }

    async fn count_requests_for_project(&self, project_id: Uuid) -> Result<i64, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.requests.values().filter(|r| r.project_id == project_id).count() as i64)
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn get_project(&self, id: Uuid) -> Result<Option<Project>, DatabaseError> {
        Ok(self.tables.read().await.projects.get(&id).cloned())
    }

    async fn find_project_by_slug(&self, slug: &str) -> Result<Option<Project>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.projects.values().find(|p| p.slug == slug).cloned())
    }

    async fn list_projects(&self) -> Result<Vec<Project>, DatabaseError> {
        let mut rows: Vec<Project> = self.tables.read().await.projects.values().cloned().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn insert_project(&self, project: &Project) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.projects.values().any(|p| p.slug == project.slug) {
            return Err(DatabaseError::QueryError(format!(
                "project slug {} already exists",
                project.slug
            )));
        }
        tables.projects.insert(project.id, project.clone());
        Ok(())
    }

    async fn update_project(&self, project: &Project) -> Result<Option<Project>, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables
            .projects
            .values()
            .any(|p| p.slug == project.slug && p.id != project.id)
        {
            return Err(DatabaseError::QueryError(format!(
                "project slug {} already exists",
                project.slug
            )));
        }
        Ok(tables.projects.get_mut(&project.id).map(|existing| {
            *existing = Project {
                created_at: existing.created_at,
                ..project.clone()
            };
            existing.clone()
        }))
    }

    async fn delete_project(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.requests.values().any(|r| r.project_id == id) {
            return Err(DatabaseError::QueryError(format!("project {} has requests", id)));
        }
        Ok(tables.projects.remove(&id).is_some())
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn get_setting(&self, key: &str) -> Result<Option<AdminSetting>, DatabaseError> {
        Ok(self.tables.read().await.settings.get(key).cloned())
    }

    async fn list_settings(&self) -> Result<Vec<AdminSetting>, DatabaseError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<AdminSetting> = tables.settings.values().cloned().collect();
        rows.sort_by(|a, b| a.setting_key.cmp(&b.setting_key));
        Ok(rows)
    }

    async fn upsert_setting(&self, key: &str, value: &str, description: &str) -> Result<AdminSetting, DatabaseError> {
        let setting = AdminSetting {
            setting_key: key.to_string(),
            setting_value: value.to_string(),
            description: description.to_string(),
            updated_at: Utc::now(),
        };
        self.tables
            .write()
            .await
            .settings
            .insert(key.to_string(), setting.clone());
        Ok(setting)
    }
}

#[async_trait]
impl TemplateStore for MemoryStore {
    async fn get_template(&self, key: &str) -> Result<Option<EmailTemplate>, DatabaseError> {
        Ok(self.tables.read().await.templates.get(key).cloned())
    }

    async fn list_templates(&self) -> Result<Vec<EmailTemplate>, DatabaseError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<EmailTemplate> = tables.templates.values().cloned().collect();
        rows.sort_by(|a, b| a.template_name.cmp(&b.template_name));
        Ok(rows)
    }

    async fn upsert_template(&self, template: &EmailTemplate) -> Result<EmailTemplate, DatabaseError> {
        let mut tables = self.tables.write().await;
        let stored = match tables.templates.get(&template.template_key) {
            // name and description are fixed once the row exists
            Some(existing) => EmailTemplate {
                subject: template.subject.clone(),
                html_content: template.html_content.clone(),
                updated_at: template.updated_at,
                ..existing.clone()
            },
            None => template.clone(),
        };
        tables
            .templates
            .insert(stored.template_key.clone(), stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl FeedbackStore for MemoryStore {
    async fn insert_feedback(&self, feedback: &CustomerFeedback) -> Result<(), DatabaseError> {
        self.tables
            .write()
            .await
            .feedback
            .insert(feedback.id, feedback.clone());
        Ok(())
    }

    async fn list_feedback(&self, approved: Option<bool>) -> Result<Vec<CustomerFeedback>, DatabaseError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<CustomerFeedback> = tables
            .feedback
            .values()
            .filter(|f| approved.map_or(true, |a| f.approved == a))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn set_feedback_approved(&self, id: Uuid, approved: bool) -> Result<Option<CustomerFeedback>, DatabaseError> {
        let mut tables = self.tables.write().await;
        Ok(tables.feedback.get_mut(&id).map(|f| {
            f.approved = approved;
            f.clone()
        }))
    }

    async fn delete_feedback(&self, id: Uuid) -> Result<bool, DatabaseError> {
        Ok(self.tables.write().await.feedback.remove(&id).is_some())
    }
}

#[async_trait]
impl AdminStore for MemoryStore {
    async fn find_admin_by_email(&self, email: &str) -> Result<Option<AdminUser>, DatabaseError> {
        Ok(self.tables.read().await.admins.get(email).cloned())
    }

    async fn insert_admin(&self, admin: &AdminUser) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.admins.contains_key(&admin.email) {
            return Err(DatabaseError::QueryError(format!(
                "admin {} already exists",
                admin.email
            )));
        }
        tables.admins.insert(admin.email.clone(), admin.clone());
        Ok(())
    }

    async fn list_admins(&self) -> Result<Vec<AdminUser>, DatabaseError> {
        let mut rows: Vec<AdminUser> = self.tables.read().await.admins.values().cloned().collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(rows)
    }

    async fn delete_admin(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let mut tables = self.tables.write().await;
        let before = tables.admins.len();
        tables.admins.retain(|_, admin| admin.id != id);
        Ok(tables.admins.len() < before)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::NewProjectRequest;
    use chrono::Duration;
    use rust_decimal::Decimal;
    use std::sync::Arc;

    fn project() -> Project {
        Project {
            id: Uuid::new_v4(),
            title: "Library Manager".into(),
            slug: "library-manager".into(),
            price: Decimal::from(999),
            discounted_price: None,
            github_repo_link: None,
            created_at: Utc::now(),
        }
    }

    fn request_for(project_id: Uuid, email: &str, created_at: DateTime<Utc>) -> ProjectRequest {
        ProjectRequest::pending(
            NewProjectRequest {
                project_id,
                user_name: "Alice".into(),
                user_email: email.into(),
                user_phone: "9876543210".into(),
                college_name: "City College".into(),
                branch: None,
                semester: None,
                message: None,
            },
            created_at,
        )
    }

    #[tokio::test]
    async fn insert_requires_existing_project() {
        let store = MemoryStore::new();
        let orphan = request_for(Uuid::new_v4(), "a@b.co", Utc::now());
        assert!(store.insert_request(&orphan).await.is_err());
    }

    #[tokio::test]
    async fn counts_only_inside_window() {
        let store = MemoryStore::new();
        let p = project();
        store.seed_project(p.clone()).await;

        let now = Utc::now();
        store.seed_request(request_for(p.id, "a@b.co", now - Duration::hours(25))).await;
        store.seed_request(request_for(p.id, "a@b.co", now - Duration::hours(1))).await;
        store.seed_request(request_for(p.id, "other@b.co", now)).await;

        let count = store
            .count_requests_since("a@b.co", now - Duration::hours(24))
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn concurrent_downloads_are_all_counted() {
        let store = Arc::new(MemoryStore::new());
        let p = project();
        store.seed_project(p.clone()).await;
        let req = request_for(p.id, "a@b.co", Utc::now());
        let id = req.id;
        store.seed_request(req).await;

        let tasks: Vec<_> = (0..10)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.record_download(id, Utc::now()).await })
            })
            .collect();
        for task in futures::future::join_all(tasks).await {
            task.unwrap().unwrap();
        }

        let stored = store.get_request(id).await.unwrap().unwrap();
        assert_eq!(stored.downloads_count, 10);
        assert!(stored.last_downloaded_at.is_some());
    }

    #[tokio::test]
    async fn lists_newest_first_with_filter() {
        let store = MemoryStore::new();
        let p = project();
        store.seed_project(p.clone()).await;
        let now = Utc::now();
        let older = request_for(p.id, "a@b.co", now - Duration::hours(2));
        let newer = request_for(p.id, "c@d.co", now);
        store.seed_request(older.clone()).await;
        store.seed_request(newer.clone()).await;
        store.mark_rejected(older.id, now).await.unwrap();

        let all = store.list_requests(None).await.unwrap();
        assert_eq!(all[0].id, newer.id);

        let pending = store.list_requests(Some(RequestStatus::Pending)).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, newer.id);
    }
}
