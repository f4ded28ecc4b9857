//! Business rules as pure functions over full record lists

pub mod eligibility;
pub mod quota;

pub use eligibility::ready_to_join;
pub use quota::{QuotaPolicy, QuotaUsage, QuotaViolation};
