//! Audit events
//!
//! Business actions (approvals, rejections, submissions) are logged under
//! the `audit` target so a subscriber can route them to their own file.

/// Record an audit event.
///
/// ```ignore
/// audit_log!("hr-admin", "gate_pass.approve", "Gate Pass#7");
/// audit_log!("hr-admin", "joining.submit", "ENQ-21", "EMP-013");
/// ```
macro_rules! audit_log {
    ($actor:expr, $action:expr, $resource:expr) => {
        tracing::info!(
            target: "audit",
            actor = %$actor,
            action = $action,
            resource = %$resource,
            timestamp = %chrono::Local::now().to_rfc3339(),
            "AUDIT"
        );
    };
    ($actor:expr, $action:expr, $resource:expr, $details:expr) => {
        tracing::info!(
            target: "audit",
            actor = %$actor,
            action = $action,
            resource = %$resource,
            details = %$details,
            timestamp = %chrono::Local::now().to_rfc3339(),
            "AUDIT"
        );
    };
}

pub(crate) use audit_log;
