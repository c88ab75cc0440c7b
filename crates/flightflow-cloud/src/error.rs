//! Cloud provider error types

use thiserror::Error;

/// Cloud provider errors
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Resource not declared: {0}")]
    ResourceNotDeclared(String),

    #[error("Resource '{resource}' failed to {operation}: {message}")]
    ResourceFailed {
        resource: String,
        operation: &'static str,
        message: String,
    },

    #[error("Invalid resource state: {0}")]
    InvalidState(String),

    #[error("State file error: {0}")]
    StateError(String),

    #[error("Lock acquisition failed: {0}")]
    LockError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CloudError>;
