// handlers/protected/templates.rs - GET /api/admin/templates, PUT /api/admin/templates/:key

use axum::extract::{rejection::JsonRejection, Path, State};
use axum::Json;
use serde::Deserialize;

use crate::database::models::EmailTemplate;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateBody {
    pub subject: String,
    pub html_content: String,
}

pub async fn templates_list(State(state): State<AppState>) -> ApiResult<Vec<EmailTemplate>> {
    Ok(ApiResponse::success(state.admin.templates().await?))
}

pub async fn template_update(
    State(state): State<AppState>,
    Path(key): Path<String>,
    payload: Result<Json<TemplateBody>, JsonRejection>,
) -> ApiResult<EmailTemplate> {
    let Json(body) = payload?;
    let template = state
        .admin
        .update_template(&key, &body.subject, &body.html_content)
        .await?;
    Ok(ApiResponse::success(template).message("Template updated"))
}
