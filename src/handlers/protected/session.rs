// handlers/protected/session.rs - GET /api/auth/whoami, POST /api/auth/logout

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Extension,
};
use serde_json::{json, Value};

use crate::middleware::auth::clear_session_cookie;
use crate::middleware::{AdminSession, ApiResponse, ApiResult};
use crate::state::AppState;

pub async fn session_whoami(Extension(admin): Extension<AdminSession>) -> ApiResult<Value> {
    Ok(ApiResponse::success(json!({
        "id": admin.admin_id,
        "email": admin.email,
        "issuedAt": admin.issued_at,
        "expiresAt": admin.expires_at,
    })))
}

/// Tokens are stateless; logging out only drops the cookie
pub async fn session_logout(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminSession>,
) -> Response {
    tracing::info!(admin = %admin.email, "Admin logged out");
    (
        [(header::SET_COOKIE, clear_session_cookie(state.config.security.require_https))],
        ApiResponse::success(json!({ "loggedOut": true })),
    )
        .into_response()
}
