//! Client error types

use shared::ErrorCategory;
use shared::FormError;
use shared::models::TransitionError;
use shared::row::RowError;
use shared::rules::QuotaViolation;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Request never completed (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with a non-success HTTP status
    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    /// Endpoint answered `success: false`
    #[error("Endpoint error: {0}")]
    Endpoint(String),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Form failed local validation
    #[error(transparent)]
    Form(#[from] FormError),

    /// Submission quota exhausted
    #[error(transparent)]
    Quota(#[from] QuotaViolation),

    /// Status change not allowed from the current state
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Sheet no longer matches its column table
    #[error("Sheet layout error: {0}")]
    Schema(#[from] RowError),

    /// A file upload failed under the abort policy
    #[error("Upload of '{file_name}' failed: {message}")]
    Upload { file_name: String, message: String },

    /// An earlier step was written before a later one failed
    #[error("Partial write: {completed}; then {message}")]
    PartialWrite { completed: String, message: String },

    /// Missing or malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading a local file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Category used when reporting the error to the user
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Http(_) | Self::Status { .. } => ErrorCategory::Network,
            Self::Endpoint(_) | Self::InvalidResponse(_) | Self::Serialization(_) => {
                ErrorCategory::Endpoint
            }
            Self::Validation(_)
            | Self::Form(_)
            | Self::Quota(_)
            | Self::Transition(_)
            | Self::NotFound(_)
            | Self::Config(_)
            | Self::Io(_) => ErrorCategory::Validation,
            Self::Upload { .. } | Self::PartialWrite { .. } => ErrorCategory::PartialFailure,
            Self::Schema(_) => ErrorCategory::Schema,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
