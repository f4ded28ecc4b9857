//! Gate pass requests raised by an employee
//!
//! Quota gates are re-checked against a fresh read of the sheet right before
//! the insert; the cached usage only drives what the employee is shown.

use shared::models::{
    EmployeeDirectoryEntry, GatePassRecord, GatePassRequestForm,
};
use shared::row::{SheetEntry, WriteRow};
use shared::rules::QuotaUsage;
use shared::util::next_serial;

use crate::audit::audit_log;
use crate::context::SheetContext;
use crate::services::directory::employee_directory;
use crate::upload::{FileUpload, upload_all};
use crate::{ClientError, ClientResult};

/// Request desk bound to one employee
#[derive(Debug)]
pub struct GatePassDesk {
    ctx: SheetContext,
    employee: EmployeeDirectoryEntry,
    usage: QuotaUsage,
}

impl GatePassDesk {
    /// Look the employee up in the roster and load their usage
    pub async fn for_employee(ctx: SheetContext, name: &str) -> ClientResult<Self> {
        let directory = employee_directory(&ctx).await?;
        let employee = directory
            .get(name)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(format!("employee '{}'", name.trim())))?;

        let mut desk = Self {
            ctx,
            employee,
            usage: QuotaUsage::default(),
        };
        desk.refresh().await?;
        Ok(desk)
    }

    pub fn employee(&self) -> &EmployeeDirectoryEntry {
        &self.employee
    }

    /// Usage as of the last load or submission
    pub fn usage(&self) -> QuotaUsage {
        self.usage
    }

    pub fn remaining(&self) -> usize {
        self.ctx.config.quota.remaining(&self.usage)
    }

    /// Reload usage from the sheet
    pub async fn refresh(&mut self) -> ClientResult<QuotaUsage> {
        let entries = self.load().await?;
        self.usage = self.usage_in(&entries);
        Ok(self.usage)
    }

    /// This employee's requests, in sheet order
    pub async fn history(&self) -> ClientResult<Vec<SheetEntry<GatePassRecord>>> {
        Ok(self
            .load()
            .await?
            .into_iter()
            .filter(|e| e.record.belongs_to(&self.employee))
            .collect())
    }

    /// Validate, re-check quota, upload the optional image and append the row.
    ///
    /// Usage is bumped only once the insert has succeeded.
    pub async fn submit(
        &mut self,
        form: &GatePassRequestForm,
        image: Option<FileUpload>,
    ) -> ClientResult<GatePassRecord> {
        let request = form.check()?;

        let entries = self.load().await?;
        let usage = self.usage_in(&entries);
        self.ctx.config.quota.check(&usage)?;

        let serial_no = next_serial(entries.iter().map(|e| e.record.serial_no.as_str()));

        let image_url = match image {
            Some(file) => {
                let file = file.renamed(&format!("gate_pass_{serial_no}"));
                upload_all(
                    self.ctx.api.as_ref(),
                    vec![((), file)],
                    &self.ctx.config.upload_folder_id,
                    self.ctx.config.upload_failure_policy,
                )
                .await?
                .pop()
                .map(|(_, url)| url)
                .unwrap_or_default()
            }
            None => String::new(),
        };

        let record = GatePassRecord::new_request(serial_no, &self.employee, &request, image_url);
        let sheet = &self.ctx.config.sheets.gate_pass.name;
        self.ctx.api.insert(sheet, &record.to_row()).await?;

        let mut usage = usage;
        usage.record(request.departure.date(), self.ctx.clock.today());
        self.usage = usage;

        tracing::info!(serial_no, employee = %self.employee.name, "Gate pass requested");
        audit_log!(
            self.employee.name,
            "gate_pass.request",
            format!("{sheet}#{serial_no}"),
            record.visit_place
        );
        Ok(record)
    }

    fn usage_in(&self, entries: &[SheetEntry<GatePassRecord>]) -> QuotaUsage {
        QuotaUsage::for_employee(
            entries.iter().map(|e| &e.record),
            &self.employee,
            self.ctx.clock.today(),
        )
    }

    async fn load(&self) -> ClientResult<Vec<SheetEntry<GatePassRecord>>> {
        self.ctx
            .load::<GatePassRecord>(&self.ctx.config.sheets.gate_pass)
            .await
    }
}
