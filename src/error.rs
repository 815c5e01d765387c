//! Error types for advsearch
//!
//! Validation and empty-criteria failures are recoverable: the user fixes a
//! field and retries. Everything else comes from the outside world.

use thiserror::Error;

use crate::query::ValidationResult;

/// Main error type for advsearch operations
#[derive(Error, Debug)]
pub enum AdvSearchError {
    #[error("Please check input errors: {0}")]
    Validation(ValidationResult),

    #[error("Please enter search criteria")]
    EmptyCriteria,

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Navigation error: {0}")]
    Navigation(String),

    #[error("Every {action} strategy failed: {}", .attempts.join("; "))]
    AllStrategiesFailed {
        action: String,
        attempts: Vec<String>,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("GUI error: {0}")]
    Gui(String),
}

/// Result type alias for advsearch operations
pub type Result<T> = std::result::Result<T, AdvSearchError>;

impl AdvSearchError {
    /// Check if this error is recoverable (the user can correct the form and retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AdvSearchError::Validation(_) | AdvSearchError::EmptyCriteria
        )
    }
}
