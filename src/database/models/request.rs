use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Lifecycle state of a project request. `approved` and `rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "request_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(RequestStatus::Pending),
            "approved" => Ok(RequestStatus::Approved),
            "rejected" => Ok(RequestStatus::Rejected),
            other => Err(format!("unknown request status '{}'", other)),
        }
    }
}

/// One request by one person for one project (`project_requests` row)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ProjectRequest {
    pub id: Uuid,
    pub project_id: Uuid,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: String,
    pub college_name: String,
    pub branch: Option<String>,
    pub semester: Option<String>,
    pub message: Option<String>,
    pub status: RequestStatus,
    pub download_link: Option<String>,
    pub download_link_expires_at: Option<DateTime<Utc>>,
    pub downloads_count: i32,
    pub last_downloaded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectRequest {
    /// Build a fresh pending request; id and timestamps are assigned here, not by the store
    pub fn pending(new: NewProjectRequest, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id: new.project_id,
            user_name: new.user_name,
            user_email: new.user_email,
            user_phone: new.user_phone,
            college_name: new.college_name,
            branch: new.branch,
            semester: new.semester,
            message: new.message,
            status: RequestStatus::Pending,
            download_link: None,
            download_link_expires_at: None,
            downloads_count: 0,
            last_downloaded_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_link_expired(&self, now: DateTime<Utc>) -> bool {
        matches!(self.download_link_expires_at, Some(expires_at) if now > expires_at)
    }
}

/// Validated input for a new request
#[derive(Debug, Clone)]
pub struct NewProjectRequest {
    pub project_id: Uuid,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: String,
    pub college_name: String,
    pub branch: Option<String>,
    pub semester: Option<String>,
    pub message: Option<String>,
}
