//! Gate pass approval
//!
//! The admin picks one pending request and approves or rejects it. The
//! decision is checked against a fresh read of the sheet, so a request
//! another admin already settled is refused instead of overwritten.

use shared::models::{Decision, GatePassBoard, GatePassColumn, GatePassRecord};
use shared::row::{Column, SheetEntry};

use crate::audit::audit_log;
use crate::context::SheetContext;
use crate::{ClientError, ClientResult};

/// Admin view over the gate pass sheet
#[derive(Debug)]
pub struct GatePassAdmin {
    ctx: SheetContext,
    selected: Option<String>,
}

impl GatePassAdmin {
    pub fn new(ctx: SheetContext) -> Self {
        Self {
            ctx,
            selected: None,
        }
    }

    /// All requests grouped by status
    pub async fn board(&self) -> ClientResult<GatePassBoard> {
        let entries = self.load().await?;
        Ok(GatePassBoard::from_entries(entries))
    }

    /// Select a request by serial number
    pub fn select(&mut self, serial_no: impl Into<String>) {
        self.selected = Some(serial_no.into().trim().to_string());
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub async fn approve(&mut self) -> ClientResult<SheetEntry<GatePassRecord>> {
        self.decide(Decision::Approve).await
    }

    pub async fn reject(&mut self) -> ClientResult<SheetEntry<GatePassRecord>> {
        self.decide(Decision::Reject).await
    }

    /// Apply `decision` to the selected request and rewrite its status cell.
    ///
    /// The selection survives a failure so the admin can retry.
    async fn decide(&mut self, decision: Decision) -> ClientResult<SheetEntry<GatePassRecord>> {
        let serial_no = self
            .selected
            .clone()
            .ok_or_else(|| ClientError::Validation("no gate pass selected".into()))?;

        let mut entry = self
            .load()
            .await?
            .into_iter()
            .find(|e| e.record.serial_no == serial_no)
            .ok_or_else(|| ClientError::NotFound(format!("gate pass #{serial_no}")))?;

        let status = entry.record.status.apply(decision)?;
        let sheet = &self.ctx.config.sheets.gate_pass.name;
        self.ctx
            .api
            .update_cell(
                sheet,
                entry.row_number,
                GatePassColumn::Status.number(),
                status.as_str(),
            )
            .await?;

        entry.record.status = status;
        tracing::info!(serial_no = %serial_no, row = entry.row_number, %status, "Gate pass status updated");
        let action = match decision {
            Decision::Approve => "gate_pass.approve",
            Decision::Reject => "gate_pass.reject",
        };
        audit_log!(
            self.ctx.config.operator,
            action,
            format!("{sheet}#{serial_no}"),
            entry.record.employee_name
        );
        self.selected = None;
        Ok(entry)
    }

    async fn load(&self) -> ClientResult<Vec<SheetEntry<GatePassRecord>>> {
        self.ctx
            .load::<GatePassRecord>(&self.ctx.config.sheets.gate_pass)
            .await
    }
}
