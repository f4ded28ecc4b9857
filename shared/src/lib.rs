//! Shared types for the HR sheet client
//!
//! Record types for every sheet tab, the positional row mapper, date
//! normalization, and the business rules (submission quota, joining
//! eligibility) as pure functions.

pub mod dates;
pub mod error;
pub mod models;
pub mod response;
pub mod row;
pub mod rules;
pub mod util;

// Re-exports
pub use error::{ErrorCategory, FormError};
pub use response::SheetResponse;
pub use row::{Column, HeaderCheck, RawRow, RowError, SheetEntry, SheetRow, WriteRow};
