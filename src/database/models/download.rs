use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Access-log row written on every successful download
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DownloadLog {
    pub id: Uuid,
    pub request_id: Uuid,
    pub project_id: Uuid,
    pub user_email: String,
    pub download_at: DateTime<Utc>,
    pub ip_address: String,
    pub user_agent: String,
}
