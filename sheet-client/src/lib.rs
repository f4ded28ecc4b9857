//! Sheet Client - HR workflows over a spreadsheet endpoint
//!
//! Reads and writes sheet tabs through the [`SheetApi`] seam: over HTTP with
//! [`NetworkSheetClient`], or in process with [`MemorySheets`]. The
//! workflows in [`services`] combine those calls with the rules in `shared`.

mod audit;
pub mod clock;
pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod memory;
pub mod services;
pub mod share;
pub mod upload;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ClientConfig, SheetNames, SheetRef, UploadFailurePolicy};
pub use context::SheetContext;
pub use error::{ClientError, ClientResult};
pub use http::{NetworkSheetClient, SheetApi};
pub use memory::{MemorySheets, SheetCall};
pub use services::{GatePassAdmin, GatePassDesk, JoiningDesk, JoiningOutcome};
pub use share::{EmailShare, SharedDocument};
pub use upload::FileUpload;
