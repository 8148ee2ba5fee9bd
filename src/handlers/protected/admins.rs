// handlers/protected/admins.rs - Admin account management
//
// GET    /api/admin/admins
// POST   /api/admin/admins       {email, password}
// DELETE /api/admin/admins/:id   never the caller, never the last account

use axum::extract::{rejection::JsonRejection, Path, State};
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use super::parse_id;
use crate::database::models::AdminUser;
use crate::middleware::{AdminSession, ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewAdminBody {
    pub email: String,
    pub password: String,
}

pub async fn admins_list(State(state): State<AppState>) -> ApiResult<Vec<AdminUser>> {
    Ok(ApiResponse::success(state.admin.list_admins().await?))
}

pub async fn admin_create(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    payload: Result<Json<NewAdminBody>, JsonRejection>,
) -> ApiResult<AdminUser> {
    let Json(body) = payload?;
    let admin = state.admin.create_admin(&body.email, &body.password).await?;
    tracing::info!(admin = %admin.email, by = %session.email, "Admin added");
    Ok(ApiResponse::created(admin).message("Admin created"))
}

pub async fn admin_delete(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let id = parse_id(&id, "Admin")?;
    state.admin.delete_admin(id, session.admin_id).await?;
    Ok(ApiResponse::success(json!({ "id": id, "deleted": true })))
}
