//! Workflows over the sheet endpoint

pub mod directory;
pub mod gate_pass;
pub mod gate_pass_request;
pub mod joining;

pub use directory::{employee_directory, hod_names};
pub use gate_pass::GatePassAdmin;
pub use gate_pass_request::GatePassDesk;
pub use joining::{JoiningDesk, JoiningOutcome};
