//! Project catalog maintenance for the back office.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use super::error::WorkflowError;
use super::repo_link;
use crate::database::models::Project;
use crate::database::Store;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectInput {
    pub title: String,
    pub slug: Option<String>,
    pub price: Decimal,
    pub discounted_price: Option<Decimal>,
    pub github_repo_link: Option<String>,
}

pub struct CatalogService {
    store: Arc<dyn Store>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Project>, WorkflowError> {
        Ok(self.store.list_projects().await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Project, WorkflowError> {
        self.store.get_project(id).await?.ok_or(WorkflowError::NotFound("Project"))
    }

    pub async fn create(&self, input: ProjectInput) -> Result<Project, WorkflowError> {
        let project = validate(input, Uuid::new_v4())?;
        self.ensure_slug_free(&project.slug, project.id).await?;
        self.store.insert_project(&project).await?;
        tracing::info!(project_id = %project.id, slug = %project.slug, "Project created");
        Ok(project)
    }

    /// Replaces every editable field; `created_at` is kept
    pub async fn update(&self, id: Uuid, input: ProjectInput) -> Result<Project, WorkflowError> {
        let project = validate(input, id)?;
        self.ensure_slug_free(&project.slug, id).await?;
        let updated = self
            .store
            .update_project(&project)
            .await?
            .ok_or(WorkflowError::NotFound("Project"))?;
        tracing::info!(project_id = %id, slug = %updated.slug, "Project updated");
        Ok(updated)
    }

    /// Projects with request history stay, so download logs keep their target
    pub async fn delete(&self, id: Uuid) -> Result<(), WorkflowError> {
        if self.store.get_project(id).await?.is_none() {
            return Err(WorkflowError::NotFound("Project"));
        }
        let requests = self.store.count_requests_for_project(id).await?;
        if requests > 0 {
            return Err(WorkflowError::Conflict(format!(
                "Project has {} request(s) and cannot be deleted",
                requests
            )));
        }
        self.store.delete_project(id).await?;
        tracing::info!(project_id = %id, "Project deleted");
        Ok(())
    }

    async fn ensure_slug_free(&self, slug: &str, id: Uuid) -> Result<(), WorkflowError> {
        match self.store.find_project_by_slug(slug).await? {
            Some(existing) if existing.id != id => {
                Err(WorkflowError::Conflict(format!("Slug {} is already in use", slug)))
            }
            _ => Ok(()),
        }
    }
}

fn validate(input: ProjectInput, id: Uuid) -> Result<Project, WorkflowError> {
    let title = input.title.trim();
    if title.is_empty() {
        return Err(WorkflowError::validation("title", "Title is required"));
    }

    let slug = match input.slug.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => slugify(raw),
        _ => slugify(title),
    };
    if slug.is_empty() {
        return Err(WorkflowError::validation("slug", "Slug must contain letters or digits"));
    }

    if input.price < Decimal::ZERO {
        return Err(WorkflowError::validation("price", "Price cannot be negative"));
    }
    if input.discounted_price.is_some_and(|d| d < Decimal::ZERO) {
        return Err(WorkflowError::validation("discountedPrice", "Discounted price cannot be negative"));
    }

    let github_repo_link = match input.github_repo_link.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(link) if repo_link::is_github_link(link) => {
            repo_link::resolve(link).map_err(|e| WorkflowError::validation("githubRepoLink", e.to_string()))?;
            Some(link.to_string())
        }
        Some(link) => Some(
            repo_link::web_link(link)
                .ok_or_else(|| WorkflowError::validation("githubRepoLink", "Repository link must be an http(s) URL"))?,
        ),
    };

    Ok(Project {
        id,
        title: title.to_string(),
        slug,
        price: input.price,
        discounted_price: input.discounted_price,
        github_repo_link,
        created_at: Utc::now(),
    })
}

/// Lowercase ASCII alphanumerics joined by single dashes
pub fn slugify(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{NewProjectRequest, ProjectRequest};
    use crate::database::{MemoryStore, RequestStore};

    fn input(title: &str, slug: Option<&str>) -> ProjectInput {
        ProjectInput {
            title: title.into(),
            slug: slug.map(Into::into),
            price: Decimal::from(1999),
            ..Default::default()
        }
    }

    #[test]
    fn slugs_collapse_punctuation() {
        assert_eq!(slugify("Smart Parking  System (IoT)"), "smart-parking-system-iot");
        assert_eq!(slugify("--Hello__World--"), "hello-world");
        assert_eq!(slugify("ಕನ್ನಡ"), "");
    }

    #[tokio::test]
    async fn create_derives_slug_and_rejects_duplicates() {
        let svc = CatalogService::new(Arc::new(MemoryStore::new()));
        let created = svc.create(input("Smart Parking", None)).await.unwrap();
        assert_eq!(created.slug, "smart-parking");

        assert!(matches!(
            svc.create(input("Other", Some("Smart Parking"))).await,
            Err(WorkflowError::Conflict(_))
        ));
        assert!(matches!(
            svc.create(input("  ", None)).await,
            Err(WorkflowError::Validation { field: "title", .. })
        ));
    }

    #[tokio::test]
    async fn links_and_prices_are_validated() {
        let svc = CatalogService::new(Arc::new(MemoryStore::new()));
        let mut bad = input("Widget", None);
        bad.github_repo_link = Some("see drive".into());
        assert!(matches!(
            svc.create(bad).await,
            Err(WorkflowError::Validation { field: "githubRepoLink", .. })
        ));

        let mut negative = input("Widget", None);
        negative.discounted_price = Some(Decimal::from(-1));
        assert!(matches!(
            svc.create(negative).await,
            Err(WorkflowError::Validation { field: "discountedPrice", .. })
        ));

        let mut ok = input("Widget", None);
        ok.github_repo_link = Some(" git@github.com:acme/widget.git ".into());
        let created = svc.create(ok).await.unwrap();
        assert_eq!(created.github_repo_link.as_deref(), Some("git@github.com:acme/widget.git"));
    }

    #[tokio::test]
    async fn update_keeps_created_at_and_own_slug() {
        let svc = CatalogService::new(Arc::new(MemoryStore::new()));
        let created = svc.create(input("Widget", None)).await.unwrap();

        let mut change = input("Widget Pro", Some("widget"));
        change.discounted_price = Some(Decimal::from(999));
        let updated = svc.update(created.id, change).await.unwrap();
        assert_eq!(updated.title, "Widget Pro");
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.effective_price(), Decimal::from(999));

        assert!(matches!(
            svc.update(Uuid::new_v4(), input("Ghost", None)).await,
            Err(WorkflowError::NotFound("Project"))
        ));
    }

    #[tokio::test]
    async fn projects_with_requests_cannot_be_deleted() {
        let store = Arc::new(MemoryStore::new());
        let svc = CatalogService::new(store.clone());
        let kept = svc.create(input("Kept", None)).await.unwrap();
        let spare = svc.create(input("Spare", None)).await.unwrap();

        store
            .insert_request(&ProjectRequest::pending(
                NewProjectRequest {
                    project_id: kept.id,
                    user_name: "Asha".into(),
                    user_email: "asha@college.edu".into(),
                    user_phone: "9876543210".into(),
                    college_name: "RVCE".into(),
                    branch: None,
                    semester: None,
                    message: None,
                },
                Utc::now(),
            ))
            .await
            .unwrap();

        assert!(matches!(svc.delete(kept.id).await, Err(WorkflowError::Conflict(_))));
        svc.delete(spare.id).await.unwrap();
        assert!(matches!(svc.delete(spare.id).await, Err(WorkflowError::NotFound("Project"))));
        assert_eq!(svc.list().await.unwrap().len(), 1);
    }
}
