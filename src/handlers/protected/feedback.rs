// handlers/protected/feedback.rs - Feedback moderation
//
// GET    /api/admin/feedback[?approved=]
// PATCH  /api/admin/feedback/:id   {approved}
// DELETE /api/admin/feedback/:id

use axum::extract::{rejection::JsonRejection, Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use super::parse_id;
use crate::database::models::CustomerFeedback;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FeedbackListQuery {
    pub approved: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackPatch {
    pub approved: bool,
}

pub async fn feedback_list_all(
    State(state): State<AppState>,
    Query(query): Query<FeedbackListQuery>,
) -> ApiResult<Vec<CustomerFeedback>> {
    Ok(ApiResponse::success(state.feedback.list(query.approved).await?))
}

pub async fn feedback_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<FeedbackPatch>, JsonRejection>,
) -> ApiResult<CustomerFeedback> {
    let id = parse_id(&id, "Feedback")?;
    let Json(patch) = payload?;
    let feedback = state.feedback.set_approved(id, patch.approved).await?;
    Ok(ApiResponse::success(feedback))
}

pub async fn feedback_delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Value> {
    let id = parse_id(&id, "Feedback")?;
    state.feedback.delete(id).await?;
    Ok(ApiResponse::success(json!({ "id": id, "deleted": true })))
}
