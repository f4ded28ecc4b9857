//! Error types shared by every workflow
//!
//! - [`ErrorCategory`]: the four-way failure taxonomy plus schema drift
//! - [`FormError`]: local validation of user-entered forms

mod category;

pub use category::ErrorCategory;

use thiserror::Error;

/// A submitted form failed local validation
#[derive(Debug, Error)]
pub enum FormError {
    /// Field-level rule violations
    #[error("invalid form: {0}")]
    Fields(#[from] validator::ValidationErrors),

    /// Field holds text no supported date shape matches
    #[error("{field}: '{value}' is not a recognised date")]
    BadDate { field: &'static str, value: String },

    /// Return time precedes departure
    #[error("arrival {arrival} is before departure {departure}")]
    ArrivalBeforeDeparture { departure: String, arrival: String },
}
