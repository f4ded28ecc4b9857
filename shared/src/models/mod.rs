//! Data models
//!
//! One record type per sheet tab. Each declares its column table with
//! [`sheet_columns!`](crate::sheet_columns) and maps through
//! [`SheetRow`](crate::row::SheetRow) / [`WriteRow`](crate::row::WriteRow).

pub mod employee;
pub mod enquiry;
pub mod gate_pass;
pub mod joining;

// Re-exports
pub use employee::*;
pub use enquiry::*;
pub use gate_pass::*;
pub use joining::*;
