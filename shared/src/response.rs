//! Endpoint response envelope
//!
//! Every action answers with the same loose JSON object:
//! ```json
//! { "success": true, "data": [[...], ...], "error": null }
//! ```
//! Uploads add `fileUrl`. Any field may be missing, so all are optional.

use serde::{Deserialize, Serialize};

/// Response body of the sheet endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

impl<T> SheetResponse<T> {
    /// Failure reason reported by the endpoint, if any
    pub fn failure_reason(&self) -> String {
        self.error
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| "endpoint reported failure without a reason".to_string())
    }

    /// Split into data or the endpoint's failure reason
    pub fn into_result(self) -> Result<Self, String> {
        if self.success {
            Ok(self)
        } else {
            Err(self.failure_reason())
        }
    }
}
