//! Identifier helpers
//!
//! Identifiers are assigned client-side from what the sheet already holds.
//! Two clients submitting at the same moment can pick the same value; the
//! sheet has no uniqueness constraint to stop them.

/// Next gate pass serial: largest integer serial plus one.
///
/// Serials that are not plain integers are ignored; an empty sheet starts at 1.
/// A serial of `u64::MAX` has no successor and is skipped with a warning.
pub fn next_serial<'a>(existing: impl IntoIterator<Item = &'a str>) -> u64 {
    existing
        .into_iter()
        .filter_map(|s| s.trim().parse::<u64>().ok())
        .filter(|&serial| {
            if serial == u64::MAX {
                tracing::warn!(serial, "Ignoring serial with no successor");
                return false;
            }
            true
        })
        .max()
        .map_or(1, |max| max + 1)
}

/// Next prefixed identifier such as `EMP-013`.
///
/// Only identifiers carrying `prefix` count; the numeric part is padded to
/// at least three digits.
pub fn next_prefixed_id<'a>(prefix: &str, existing: impl IntoIterator<Item = &'a str>) -> String {
    let next = next_serial(existing.into_iter().filter_map(|id| {
        id.trim()
            .strip_prefix(prefix)
            .map(|rest| rest.trim_start_matches('-'))
    }));
    format!("{prefix}-{next:03}")
}
