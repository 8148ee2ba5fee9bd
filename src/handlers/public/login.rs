// handlers/public/login.rs - POST /api/auth/login handler

use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::database::models::AdminUser;
use crate::error::ApiError;
use crate::middleware::auth::session_cookie;
use crate::middleware::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub admin: AdminUser,
    pub expires_in: u64,
}

/**
 * POST /api/auth/login - Exchange admin credentials for a session
 *
 * Input: `{email, password}`
 *
 * Returns the signed token in the body and sets it as the HttpOnly
 * `admin_session` cookie. Unknown email and wrong password both yield 401.
 */
pub async fn login_post(
    State(state): State<AppState>,
    payload: Result<Json<LoginBody>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = payload?;
    if body.email.trim().is_empty() || body.password.is_empty() {
        return Err(ApiError::bad_request("Email and password are required"));
    }

    let session = state.admin.login(&body.email, &body.password).await?;

    let cookie = session_cookie(
        &session.token,
        session.expires_in,
        state.config.security.require_https,
    );
    let data = LoginResponse {
        token: session.token,
        admin: session.admin,
        expires_in: session.expires_in,
    };

    Ok((
        [(header::SET_COOKIE, cookie)],
        ApiResponse::success(data).message("Logged in"),
    )
        .into_response())
}
