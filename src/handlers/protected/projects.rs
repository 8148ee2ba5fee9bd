// handlers/protected/projects.rs - Project catalog maintenance
//
// GET    /api/admin/projects
// POST   /api/admin/projects        {title, slug?, price, discountedPrice?, githubRepoLink?}
// GET    /api/admin/projects/:id
// PUT    /api/admin/projects/:id    same body as POST
// DELETE /api/admin/projects/:id    409 while requests reference it

use axum::extract::{rejection::JsonRejection, Path, State};
use axum::Json;
use serde_json::{json, Value};

use super::parse_id;
use crate::database::models::Project;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::ProjectInput;
use crate::state::AppState;

pub async fn projects_list(State(state): State<AppState>) -> ApiResult<Vec<Project>> {
    Ok(ApiResponse::success(state.catalog.list().await?))
}

pub async fn project_create(
    State(state): State<AppState>,
    payload: Result<Json<ProjectInput>, JsonRejection>,
) -> ApiResult<Project> {
    let Json(input) = payload?;
    let project = state.catalog.create(input).await?;
    Ok(ApiResponse::created(project).message("Project created"))
}

pub async fn project_get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Project> {
    let id = parse_id(&id, "Project")?;
    Ok(ApiResponse::success(state.catalog.get(id).await?))
}

pub async fn project_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ProjectInput>, JsonRejection>,
) -> ApiResult<Project> {
    let id = parse_id(&id, "Project")?;
    let Json(input) = payload?;
    let project = state.catalog.update(id, input).await?;
    Ok(ApiResponse::success(project).message("Project updated"))
}

pub async fn project_delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Value> {
    let id = parse_id(&id, "Project")?;
    state.catalog.delete(id).await?;
    Ok(ApiResponse::success(json!({ "id": id, "deleted": true })))
}
