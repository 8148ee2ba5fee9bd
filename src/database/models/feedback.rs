use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CustomerFeedback {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub rating: i16,
    pub description: String,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}
