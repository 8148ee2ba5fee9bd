use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmailTemplate {
    pub template_key: String,
    pub template_name: String,
    pub subject: String,
    pub html_content: String,
    pub description: String,
    pub updated_at: DateTime<Utc>,
}
