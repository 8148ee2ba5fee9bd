// handlers/public/requests.rs - POST /api/requests handler

use axum::extract::{rejection::JsonRejection, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{CreateRequestInput, CreatedRequest};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateRequestBody {
    pub project_id: String,
    pub project_title: Option<String>,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub college: String,
    pub branch: Option<String>,
    pub semester: Option<String>,
    pub message: Option<String>,
}

impl From<CreateRequestBody> for CreateRequestInput {
    fn from(body: CreateRequestBody) -> Self {
        Self {
            project_id: Uuid::parse_str(body.project_id.trim()).ok(),
            project_title: body.project_title,
            full_name: body.full_name,
            email: body.email,
            phone: body.phone,
            college: body.college,
            branch: body.branch,
            semester: body.semester,
            message: body.message,
        }
    }
}

/**
 * POST /api/requests - Submit a project request
 *
 * Input: `{projectId, projectTitle?, fullName, email, phone, college, branch?, semester?, message?}`
 *
 * 201 with the pending request; 400 on validation, 429 when the email has
 * hit the rolling request limit. Confirmation and admin emails are sent on
 * a best-effort basis.
 */
pub async fn request_create(
    State(state): State<AppState>,
    payload: Result<Json<CreateRequestBody>, JsonRejection>,
) -> ApiResult<CreatedRequest> {
    let Json(body) = payload?;
    let created = state.requests.create(body.into()).await.map_err(ApiError::from)?;

    Ok(ApiResponse::created(created)
        .message("Request submitted successfully. We will contact you shortly."))
}
