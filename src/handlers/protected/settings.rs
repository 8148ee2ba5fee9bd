// handlers/protected/settings.rs - GET/POST /api/admin/settings

use axum::extract::{rejection::JsonRejection, State};
use axum::Json;
use serde::Deserialize;

use crate::database::models::AdminSetting;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SettingBody {
    pub key: String,
    pub value: String,
    pub description: Option<String>,
}

pub async fn settings_list(State(state): State<AppState>) -> ApiResult<Vec<AdminSetting>> {
    Ok(ApiResponse::success(state.admin.settings().await?))
}

/// Upsert by key; `contact_email` and `whatsapp_number` feed request notifications
pub async fn settings_upsert(
    State(state): State<AppState>,
    payload: Result<Json<SettingBody>, JsonRejection>,
) -> ApiResult<AdminSetting> {
    let Json(body) = payload?;
    let setting = state
        .admin
        .upsert_setting(&body.key, &body.value, body.description.as_deref())
        .await?;
    Ok(ApiResponse::success(setting).message("Setting saved"))
}
