//! The request lifecycle: create, approve, reject, download.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::effects::best_effort;
use super::error::WorkflowError;
use super::notifier::Notifier;
use super::repo_link;
use super::settings::SettingsChain;
use super::template::TemplateKey;
use crate::config::{AppConfig, WorkflowConfig};
use crate::database::models::{DownloadLog, NewProjectRequest, ProjectRequest, RequestStatus};
use crate::database::Store;
use crate::notify::{messages, whatsapp, NotificationSender};

const FALLBACK_PROJECT_TITLE: &str = "your project";

/// Raw submission from the storefront form
#[derive(Debug, Clone, Default)]
pub struct CreateRequestInput {
    pub project_id: Option<Uuid>,
    pub project_title: Option<String>,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub college: String,
    pub branch: Option<String>,
    pub semester: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatedRequest {
    pub request: ProjectRequest,
    /// Deep link for the admin to open a chat with the requester; prepared, never sent
    pub whatsapp_link: String,
}

/// Caller details recorded in the download log
#[derive(Debug, Clone)]
pub struct DownloadContext {
    pub ip_address: String,
    pub user_agent: String,
}

/// One row per distinct requester email
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequesterSummary {
    pub email: String,
    pub name: String,
    pub phone: String,
    pub college: String,
    pub total_requests: usize,
    pub approved_requests: usize,
    pub last_request_at: DateTime<Utc>,
}

pub struct RequestService {
    store: Arc<dyn Store>,
    notifier: Notifier<dyn Store>,
    settings: SettingsChain,
    workflow: WorkflowConfig,
    site_url: String,
}

impl RequestService {
    pub fn new(store: Arc<dyn Store>, sender: Arc<dyn NotificationSender>, config: &AppConfig) -> Self {
        Self {
            notifier: Notifier::new(store.clone(), sender),
            settings: SettingsChain::standard(store.clone(), &config.mail),
            store,
            workflow: config.workflow.clone(),
            site_url: config.server.site_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn create(&self, input: CreateRequestInput) -> Result<CreatedRequest, WorkflowError> {
        self.create_at(input, Utc::now()).await
    }

    pub async fn create_at(&self, input: CreateRequestInput, now: DateTime<Utc>) -> Result<CreatedRequest, WorkflowError> {
        let new = validate(input.clone())?;

        let window_start = now - Duration::hours(self.workflow.rate_limit_window_hours);
        let recent = self
            .store
            .count_requests_since(&new.user_email, window_start)
            .await?;
        if recent >= self.workflow.rate_limit_max_requests {
            tracing::info!(email = %new.user_email, recent, "Request rate limit hit");
            return Err(WorkflowError::RateLimited);
        }

        let project = self
            .store
            .get_project(new.project_id)
            .await?
            .ok_or_else(|| WorkflowError::validation("projectId", "Project not found"))?;

        let request = ProjectRequest::pending(new, now);
        self.store.insert_request(&request).await?;
        tracing::info!(request_id = %request.id, project_id = %project.id, "Project request created");

        let title = input
            .project_title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| project.title.clone());
        let contact = self.settings.admin_contact().await;

        let whatsapp_link = whatsapp::deep_link(
            &contact.whatsapp,
            &whatsapp::request_message(&title, &request.user_name, &request.user_email, &request.user_phone),
        );
        tracing::info!(request_id = %request.id, %whatsapp_link, "Admin WhatsApp link prepared");

        let confirmation = messages::requester_confirmation_vars(
            &title,
            &request,
            project.effective_price(),
            &contact.whatsapp,
        );
        best_effort(
            "requester confirmation email",
            self.notifier
                .send(TemplateKey::RequesterConfirmation, &request.user_email, &confirmation),
        )
        .await;

        let admin_link = format!("{}/admin/requests", self.site_url);
        let alert = messages::admin_notification_vars(&title, &request, &whatsapp_link, &admin_link);
        best_effort(
            "admin notification email",
            self.notifier
                .send(TemplateKey::AdminNotification, &contact.email, &alert),
        )
        .await;

        Ok(CreatedRequest {
            request,
            whatsapp_link,
        })
    }

    pub async fn approve(
        &self,
        request_id: Uuid,
        download_link: &str,
        project_title: Option<&str>,
    ) -> Result<ProjectRequest, WorkflowError> {
        let link = download_link.trim();
        if link.is_empty() {
            return Err(WorkflowError::validation("repoLink", "Download link is required"));
        }
        let link = if repo_link::is_github_link(link) {
            repo_link::resolve(link)?;
            link.to_string()
        } else {
            repo_link::web_link(link)
                .ok_or_else(|| WorkflowError::validation("repoLink", "Download link must be an http(s) URL"))?
        };

        let existing = self
            .store
            .get_request(request_id)
            .await?
            .ok_or(WorkflowError::NotFound("Request"))?;
        if existing.status == RequestStatus::Rejected {
            return Err(WorkflowError::Conflict(
                "Request has been rejected and cannot be approved".to_string(),
            ));
        }

        let now = Utc::now();
        let expires_at = now + Duration::days(self.workflow.download_link_ttl_days);
        let approved = self
            .store
            .mark_approved(request_id, &link, expires_at, now)
            .await?
            .ok_or(WorkflowError::NotFound("Request"))?;
        tracing::info!(request_id = %request_id, %expires_at, "Project request approved");

        let title = match project_title.map(str::trim).filter(|t| !t.is_empty()) {
            Some(t) => t.to_string(),
            None => self.project_title(approved.project_id).await,
        };
        let contact = self.settings.admin_contact().await;
        let download_url = format!("{}/api/download?requestId={}", self.site_url, approved.id);
        let vars = messages::project_approved_vars(&title, &download_url, &contact.whatsapp);
        best_effort(
            "approval email",
            self.notifier
                .send(TemplateKey::ProjectApproved, &approved.user_email, &vars),
        )
        .await;

        Ok(approved)
    }

    pub async fn reject(&self, request_id: Uuid) -> Result<ProjectRequest, WorkflowError> {
        let existing = self
            .store
            .get_request(request_id)
            .await?
            .ok_or(WorkflowError::NotFound("Request"))?;

        match existing.status {
            RequestStatus::Rejected => Ok(existing),
            RequestStatus::Approved => Err(WorkflowError::Conflict(
                "Request has already been approved".to_string(),
            )),
            RequestStatus::Pending => {
                let rejected = self
                    .store
                    .mark_rejected(request_id, Utc::now())
                    .await?
                    .ok_or(WorkflowError::NotFound("Request"))?;
                tracing::info!(request_id = %request_id, "Project request rejected");
                Ok(rejected)
            }
        }
    }

    /// Resolve where a download should redirect to, recording the access
    pub async fn download(&self, request_id: Uuid, ctx: DownloadContext) -> Result<String, WorkflowError> {
        let request = self
            .store
            .get_request(request_id)
            .await?
            .ok_or(WorkflowError::NotFound("Request"))?;

        if request.status != RequestStatus::Approved {
            return Err(WorkflowError::Forbidden("Request not approved".to_string()));
        }

        let now = Utc::now();
        if request.is_link_expired(now) {
            return Err(WorkflowError::Forbidden("Download link has expired".to_string()));
        }

        let link = match request.download_link.clone().filter(|l| !l.trim().is_empty()) {
            Some(link) => link,
            None => self
                .store
                .get_project(request.project_id)
                .await?
                .and_then(|p| p.github_repo_link)
                .filter(|l| !l.trim().is_empty())
                .ok_or(WorkflowError::NotFound("Download link"))?,
        };

        let target = if repo_link::is_github_link(&link) {
            repo_link::resolve(&link)?
        } else {
            repo_link::web_link(&link).ok_or_else(|| repo_link::LinkError(link.clone()))?
        };

        let entry = DownloadLog {
            id: Uuid::new_v4(),
            request_id: request.id,
            project_id: request.project_id,
            user_email: request.user_email.clone(),
            download_at: now,
            ip_address: ctx.ip_address,
            user_agent: ctx.user_agent,
        };
        best_effort("download log", self.store.insert_download_log(&entry)).await;
        best_effort("download counter", self.store.record_download(request.id, now)).await;

        tracing::info!(request_id = %request.id, "Download redirect issued");
        Ok(target)
    }

    pub async fn get(&self, request_id: Uuid) -> Result<ProjectRequest, WorkflowError> {
        self.store
            .get_request(request_id)
            .await?
            .ok_or(WorkflowError::NotFound("Request"))
    }

    pub async fn list(&self, status: Option<RequestStatus>) -> Result<Vec<ProjectRequest>, WorkflowError> {
        Ok(self.store.list_requests(status).await?)
    }

    /// Requesters grouped by email, most recent first
    pub async fn requesters(&self) -> Result<Vec<RequesterSummary>, WorkflowError> {
        let requests = self.store.list_requests(None).await?;
        Ok(summarize_requesters(&requests))
    }

    async fn project_title(&self, project_id: Uuid) -> String {
        best_effort("project title lookup", self.store.get_project(project_id))
            .await
            .flatten()
            .map(|p| p.title)
            .unwrap_or_else(|| FALLBACK_PROJECT_TITLE.to_string())
    }
}

fn validate(input: CreateRequestInput) -> Result<NewProjectRequest, WorkflowError> {
    let full_name = input.full_name.trim();
    if full_name.is_empty() {
        return Err(WorkflowError::validation("fullName", "Full name is required"));
    }

    let email = input.email.trim();
    if !super::is_valid_email(email) {
        return Err(WorkflowError::validation("email", "Invalid email address"));
    }

    let phone: String = input.phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if phone.len() != 10 {
        return Err(WorkflowError::validation("phone", "Phone number must be 10 digits"));
    }

    let college = input.college.trim();
    if college.is_empty() {
        return Err(WorkflowError::validation("college", "College name is required"));
    }

    let project_id = input
        .project_id
        .ok_or_else(|| WorkflowError::validation("projectId", "Project is required"))?;

    Ok(NewProjectRequest {
        project_id,
        user_name: full_name.to_string(),
        user_email: email.to_lowercase(),
        user_phone: phone,
        college_name: college.to_string(),
        branch: non_blank(input.branch),
        semester: non_blank(input.semester),
        message: non_blank(input.message),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// `requests` must be newest first; the first row seen per email supplies the contact details
fn summarize_requesters(requests: &[ProjectRequest]) -> Vec<RequesterSummary> {
    let mut order: Vec<String> = Vec::new();
    let mut by_email: HashMap<String, RequesterSummary> = HashMap::new();

    for r in requests {
        let summary = by_email.entry(r.user_email.clone()).or_insert_with(|| {
            order.push(r.user_email.clone());
            RequesterSummary {
                email: r.user_email.clone(),
                name: r.user_name.clone(),
                phone: r.user_phone.clone(),
                college: r.college_name.clone(),
                total_requests: 0,
                approved_requests: 0,
                last_request_at: r.created_at,
            }
        });
        summary.total_requests += 1;
        if r.status == RequestStatus::Approved {
            summary.approved_requests += 1;
        }
        if r.created_at > summary.last_request_at {
            summary.last_request_at = r.created_at;
        }
    }

    order
        .into_iter()
        .filter_map(|email| by_email.remove(&email))
        .collect()
}
