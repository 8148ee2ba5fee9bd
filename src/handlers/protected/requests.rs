// handlers/protected/requests.rs - Admin request management
//
// GET  /api/admin/requests[?status=]
// GET  /api/admin/requests/:id
// POST /api/approve
// POST /api/admin/requests/:id/reject
// GET  /api/admin/users

use axum::extract::{rejection::JsonRejection, Path, Query, State};
use axum::{Extension, Json};
use serde::Deserialize;

use super::parse_id;
use crate::database::models::{ProjectRequest, RequestStatus};
use crate::error::ApiError;
use crate::middleware::{AdminSession, ApiResponse, ApiResult};
use crate::services::RequesterSummary;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RequestListQuery {
    pub status: Option<String>,
}

pub async fn requests_list(
    State(state): State<AppState>,
    Query(query): Query<RequestListQuery>,
) -> ApiResult<Vec<ProjectRequest>> {
    let status = match query.status.as_deref().map(str::trim) {
        None | Some("") | Some("all") => None,
        Some(raw) => Some(
            raw.parse::<RequestStatus>()
                .map_err(|msg| ApiError::invalid_field("status", msg))?,
        ),
    };

    let requests = state.requests.list(status).await?;
    Ok(ApiResponse::success(requests))
}

pub async fn request_get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<ProjectRequest> {
    let id = parse_id(&id, "Request")?;
    let request = state.requests.get(id).await?;
    Ok(ApiResponse::success(request))
}

/// Requester details sent by the admin UI are ignored; the stored request is authoritative
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApproveBody {
    pub request_id: String,
    pub project_title: Option<String>,
    pub repo_link: String,
}

/**
 * POST /api/approve - Approve a request and email the download link
 *
 * Input: `{requestId, repoLink, projectTitle?}`
 *
 * `repoLink` may be any URL; GitHub links must resolve to an archive. The
 * email points at `/api/download` so the stored link can change later.
 */
pub async fn request_approve(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminSession>,
    payload: Result<Json<ApproveBody>, JsonRejection>,
) -> ApiResult<ProjectRequest> {
    let Json(body) = payload?;
    if body.request_id.trim().is_empty() {
        return Err(ApiError::invalid_field("requestId", "Request ID is required"));
    }
    let id = parse_id(&body.request_id, "Request")?;

    let approved = state
        .requests
        .approve(id, &body.repo_link, body.project_title.as_deref())
        .await?;
    tracing::info!(request_id = %id, admin = %admin.email, "Approval recorded");

    Ok(ApiResponse::success(approved).message("Request approved and email sent"))
}

pub async fn request_reject(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminSession>,
    Path(id): Path<String>,
) -> ApiResult<ProjectRequest> {
    let id = parse_id(&id, "Request")?;
    let rejected = state.requests.reject(id).await?;
    tracing::info!(request_id = %id, admin = %admin.email, "Rejection recorded");
    Ok(ApiResponse::success(rejected).message("Request rejected"))
}

pub async fn users_list(State(state): State<AppState>) -> ApiResult<Vec<RequesterSummary>> {
    let users = state.requests.requesters().await?;
    Ok(ApiResponse::success(users))
}
