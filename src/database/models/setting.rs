use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const CONTACT_EMAIL: &str = "contact_email";
pub const WHATSAPP_NUMBER: &str = "whatsapp_number";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AdminSetting {
    pub setting_key: String,
    pub setting_value: String,
    pub description: String,
    pub updated_at: DateTime<Utc>,
}
