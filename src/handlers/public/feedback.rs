// handlers/public/feedback.rs - POST/GET /api/feedback handlers

use axum::extract::{rejection::JsonRejection, State};
use axum::Json;

use crate::database::models::CustomerFeedback;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::FeedbackInput;
use crate::state::AppState;

/// POST /api/feedback - Submit a testimonial; stored unapproved
pub async fn feedback_create(
    State(state): State<AppState>,
    payload: Result<Json<FeedbackInput>, JsonRejection>,
) -> ApiResult<CustomerFeedback> {
    let Json(input) = payload?;
    let feedback = state.feedback.submit(input).await.map_err(ApiError::from)?;
    Ok(ApiResponse::created(feedback).message("Thank you for your feedback!"))
}

/// GET /api/feedback - Approved testimonials only
pub async fn feedback_list(State(state): State<AppState>) -> ApiResult<Vec<CustomerFeedback>> {
    let feedback = state.feedback.list(Some(true)).await.map_err(ApiError::from)?;
    Ok(ApiResponse::success(feedback))
}
