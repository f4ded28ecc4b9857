//! Error category classification

use serde::{Deserialize, Serialize};

/// Where a failure originated, which decides how it is reported.
///
/// Every category is recoverable: the caller surfaces the error and the user
/// retries the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Endpoint unreachable, timed out, or answered with an HTTP error
    Network,
    /// Endpoint answered `success: false` or an unreadable body
    Endpoint,
    /// Local check failed (required field, quota, transition)
    Validation,
    /// Part of a multi-step operation completed before a later step failed
    PartialFailure,
    /// Sheet layout no longer matches the column table
    Schema,
}

impl ErrorCategory {
    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Endpoint => "endpoint",
            Self::Validation => "validation",
            Self::PartialFailure => "partial_failure",
            Self::Schema => "schema",
        }
    }

    /// Whether the user can fix the input and resubmit
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::Validation)
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
