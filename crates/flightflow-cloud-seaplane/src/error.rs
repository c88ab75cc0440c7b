//! Seaplane provider error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeaplaneError {
    #[error("Authentication with Seaplane failed: {0}")]
    Authentication(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unable to remove formation {formation}: {reason}")]
    DeleteFailed { formation: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] flightflow_core::FlowError),

    #[error("Cloud error: {0}")]
    Cloud(#[from] flightflow_cloud::CloudError),
}

impl SeaplaneError {
    /// Whether the error aborts the run without trusting any partial state
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SeaplaneError::Authentication(_)
                | SeaplaneError::InvalidRequest(_)
                | SeaplaneError::Http(_)
                | SeaplaneError::Json(_)
                | SeaplaneError::Config(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SeaplaneError>;
