// handlers/protected/mod.rs - Admin handlers (session required)
//
// Every route in this tier sits behind `admin_auth_middleware`, which puts an
// `AdminSession` into the request extensions.

pub mod admins;
pub mod feedback;
pub mod projects;
pub mod requests;
pub mod session;
pub mod settings;
pub mod templates;

use uuid::Uuid;

use crate::error::ApiError;

pub use admins::{admin_create, admin_delete, admins_list};
pub use feedback::{feedback_delete, feedback_list_all, feedback_update};
pub use projects::{project_create, project_delete, project_get, project_update, projects_list};
pub use requests::{request_approve, request_get, request_reject, requests_list, users_list};
pub use session::{session_logout, session_whoami};
pub use settings::{settings_list, settings_upsert};
pub use templates::{template_update, templates_list};

/// Path ids that are not UUIDs cannot name a row
fn parse_id(raw: &str, what: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ApiError::not_found(format!("{} not found", what)))
}
