use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    middleware::from_fn_with_state,
    response::{IntoResponse, Json},
    routing::{delete, get, patch, post, put},
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::handlers::{protected, public};
use crate::middleware::admin_auth_middleware;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.security);

    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes())
        // Admin
        .merge(admin_routes(state.clone()))
        // Global middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/api/requests", post(public::request_create))
        .route("/api/download", get(public::download_get))
        .route(
            "/api/feedback",
            get(public::feedback_list).post(public::feedback_create),
        )
        .route("/api/auth/login", post(public::login_post))
}

fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Session
        .route("/api/auth/whoami", get(protected::session_whoami))
        .route("/api/auth/logout", post(protected::session_logout))
        // Request lifecycle
        .route("/api/approve", post(protected::request_approve))
        .route("/api/admin/requests", get(protected::requests_list))
        .route("/api/admin/requests/:id", get(protected::request_get))
        .route("/api/admin/requests/:id/reject", post(protected::request_reject))
        .route("/api/admin/users", get(protected::users_list))
        // Back office
        .route(
            "/api/admin/settings",
            get(protected::settings_list).post(protected::settings_upsert),
        )
        .route("/api/admin/templates", get(protected::templates_list))
        .route("/api/admin/templates/:key", put(protected::template_update))
        .route(
            "/api/admin/projects",
            get(protected::projects_list).post(protected::project_create),
        )
        .route(
            "/api/admin/projects/:id",
            get(protected::project_get)
                .put(protected::project_update)
                .delete(protected::project_delete),
        )
        .route(
            "/api/admin/admins",
            get(protected::admins_list).post(protected::admin_create),
        )
        .route("/api/admin/admins/:id", delete(protected::admin_delete))
        .route("/api/admin/feedback", get(protected::feedback_list_all))
        .route(
            "/api/admin/feedback/:id",
            patch(protected::feedback_update).delete(protected::feedback_delete),
        )
        .route_layer(from_fn_with_state(state, admin_auth_middleware))
}

/// Configured origins with credentials, or permissive when none are set
fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Project Ready API",
            "version": version,
            "description": "Request, approval and download workflow for academic project bundles",
            "endpoints": {
                "requests": "POST /api/requests (public)",
                "download": "GET /api/download?requestId= (public)",
                "feedback": "GET|POST /api/feedback (public)",
                "login": "POST /api/auth/login (public)",
                "approve": "POST /api/approve (admin)",
                "admin": "/api/admin/* (admin)",
            }
        }
    }))
}

async fn health(axum::extract::State(state): axum::extract::State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}
