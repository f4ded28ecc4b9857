//! Document sharing by email

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A named link included in a share email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedDocument {
    pub name: String,
    pub url: String,
}

/// Request to email document links to a recipient
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct EmailShare {
    #[validate(email(message = "recipient email is not valid"))]
    pub recipient_email: String,
    #[validate(length(min = 1, message = "subject is required"))]
    pub subject: String,
    #[serde(default)]
    pub message: String,
    #[validate(length(min = 1, message = "at least one document is required"))]
    pub documents: Vec<SharedDocument>,
}

impl EmailShare {
    pub fn new(recipient_email: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            recipient_email: recipient_email.into(),
            subject: subject.into(),
            ..Default::default()
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add a document; blank links are left out
    pub fn with_document(mut self, name: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        if !url.trim().is_empty() {
            self.documents.push(SharedDocument {
                name: name.into(),
                url,
            });
        }
        self
    }
}
