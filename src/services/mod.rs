pub mod admin_service;
pub mod catalog_service;
pub mod effects;
pub mod error;
pub mod feedback_service;
pub mod notifier;
pub mod repo_link;
pub mod request_service;
pub mod settings;
pub mod template;

use once_cell::sync::Lazy;
use regex::Regex;

pub use admin_service::{AdminService, LoginError, Session};
pub use catalog_service::{CatalogService, ProjectInput};
pub use error::WorkflowError;
pub use feedback_service::{FeedbackInput, FeedbackService};
pub use request_service::{CreateRequestInput, CreatedRequest, DownloadContext, RequestService, RequesterSummary};

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex"));

/// `local@domain.tld` with no whitespace
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("alice@example.com"));
        assert!(is_valid_email("a.b+tag@mail.college.edu.in"));
        assert!(!is_valid_email("alice@example"));
        assert!(!is_valid_email("alice example@x.com"));
        assert!(!is_valid_email("@x.com"));
    }
}
