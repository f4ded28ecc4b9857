//! Reference lists: employee directory and HOD names

use std::collections::HashSet;

use shared::models::{EmployeeDirectory, EmployeeDirectoryEntry, HodEntry};

use crate::ClientResult;
use crate::context::SheetContext;

/// Load the employee directory from the roster sheet
pub async fn employee_directory(ctx: &SheetContext) -> ClientResult<EmployeeDirectory> {
    let entries = ctx
        .load::<EmployeeDirectoryEntry>(&ctx.config.sheets.roster)
        .await?;
    Ok(EmployeeDirectory::from_entries(entries))
}

/// HOD names in sheet order, without duplicates.
///
/// Falls back to the configured names when the sheet cannot be read or
/// holds no names.
pub async fn hod_names(ctx: &SheetContext) -> Vec<String> {
    let sheet = &ctx.config.sheets.hod;
    match ctx.load::<HodEntry>(sheet).await {
        Ok(entries) => {
            let mut seen = HashSet::new();
            let names: Vec<String> = entries
                .into_iter()
                .map(|e| e.record.name)
                .filter(|name| seen.insert(name.clone()))
                .collect();
            if names.is_empty() {
                tracing::warn!(sheet = %sheet.name, "HOD sheet is empty, using fallback names");
                ctx.config.hod_fallback.clone()
            } else {
                names
            }
        }
        Err(e) => {
            tracing::warn!(sheet = %sheet.name, error = %e, "Failed to load HOD names, using fallback names");
            ctx.config.hod_fallback.clone()
        }
    }
}
