use thiserror::Error;

use super::repo_link::LinkError;
use crate::database::DatabaseError;

/// Failures of the request workflow and the back-office operations around it
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("{message}")]
    Validation { field: &'static str, message: String },

    #[error("Too many requests. Please try again later.")]
    RateLimited,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Forbidden(String),

    #[error(transparent)]
    InvalidLink(#[from] LinkError),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

impl WorkflowError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        WorkflowError::Validation {
            field,
            message: message.into(),
        }
    }
}
