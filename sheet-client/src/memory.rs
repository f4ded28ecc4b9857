//! In-memory sheet endpoint
//!
//! Behaves like the deployed script closely enough to drive whole workflows
//! offline: sheets are grids of cells, inserts append, cell updates address
//! 1-based positions. Every call is recorded, and individual actions can be
//! made to fail.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;
use serde_json::Value;
use shared::RawRow;

use crate::http::SheetApi;
use crate::share::EmailShare;
use crate::upload::FileUpload;
use crate::{ClientError, ClientResult};

/// Endpoint action names, as sent in the `action` field
pub mod action {
    pub const FETCH: &str = "fetch";
    pub const INSERT: &str = "insert";
    pub const UPDATE_CELL: &str = "updateCell";
    pub const UPLOAD_FILE: &str = "uploadFile";
    pub const SHARE_VIA_EMAIL: &str = "shareViaEmail";
}

/// One recorded endpoint call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetCall {
    Fetch {
        sheet: String,
    },
    Insert {
        sheet: String,
        row: Vec<String>,
    },
    UpdateCell {
        sheet: String,
        row: usize,
        column: usize,
        value: String,
    },
    UploadFile {
        file_name: String,
        folder_id: String,
    },
    ShareViaEmail {
        recipient_email: String,
        documents: usize,
    },
}

impl SheetCall {
    pub fn action(&self) -> &'static str {
        match self {
            Self::Fetch { .. } => action::FETCH,
            Self::Insert { .. } => action::INSERT,
            Self::UpdateCell { .. } => action::UPDATE_CELL,
            Self::UploadFile { .. } => action::UPLOAD_FILE,
            Self::ShareViaEmail { .. } => action::SHARE_VIA_EMAIL,
        }
    }

    pub fn is_write(&self) -> bool {
        !matches!(self, Self::Fetch { .. })
    }
}

/// [`SheetApi`] backed by in-process grids
#[derive(Debug, Default)]
pub struct MemorySheets {
    sheets: DashMap<String, Vec<RawRow>>,
    calls: Mutex<Vec<SheetCall>>,
    failing_actions: DashMap<&'static str, String>,
    failing_uploads: DashMap<String, String>,
    uploads: AtomicUsize,
}

impl MemorySheets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a sheet with text rows
    pub fn with_sheet<I, R, S>(self, name: &str, rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(|cell| Value::String(cell.into())).collect())
            .collect();
        self.put_sheet(name, rows);
        self
    }

    /// Replace a sheet with raw cells
    pub fn put_sheet(&self, name: &str, rows: Vec<RawRow>) {
        self.sheets.insert(name.to_string(), rows);
    }

    /// Make every call of `action` fail with `message`
    pub fn fail_action(&self, action: &'static str, message: impl Into<String>) {
        self.failing_actions.insert(action, message.into());
    }

    /// Make uploads of `file_name` fail with `message`
    pub fn fail_upload(&self, file_name: impl Into<String>, message: impl Into<String>) {
        self.failing_uploads.insert(file_name.into(), message.into());
    }

    /// Current contents of a sheet
    pub fn rows(&self, name: &str) -> Vec<RawRow> {
        self.sheets
            .get(name)
            .map(|rows| rows.clone())
            .unwrap_or_default()
    }

    /// Text of one cell; `row` and `column` are 1-based
    pub fn cell(&self, name: &str, row: usize, column: usize) -> Option<String> {
        let sheet = self.sheets.get(name)?;
        let cell = sheet.get(row.checked_sub(1)?)?.get(column.checked_sub(1)?)?;
        Some(shared::row::cell_to_string(cell))
    }

    pub fn calls(&self) -> Vec<SheetCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self, action: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.action() == action)
            .count()
    }

    pub fn write_count(&self) -> usize {
        self.calls.lock().iter().filter(|c| c.is_write()).count()
    }

    fn record(&self, call: SheetCall) -> ClientResult<()> {
        let action = call.action();
        self.calls.lock().push(call);
        match self.failing_actions.get(action) {
            Some(message) => Err(ClientError::Endpoint(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SheetApi for MemorySheets {
    async fn fetch(&self, sheet: &str) -> ClientResult<Vec<RawRow>> {
        self.record(SheetCall::Fetch {
            sheet: sheet.to_string(),
        })?;
        self.sheets
            .get(sheet)
            .map(|rows| rows.clone())
            .ok_or_else(|| ClientError::Endpoint(format!("Sheet not found: {sheet}")))
    }

    async fn insert(&self, sheet: &str, row: &[String]) -> ClientResult<()> {
        self.record(SheetCall::Insert {
            sheet: sheet.to_string(),
            row: row.to_vec(),
        })?;
        self.sheets
            .entry(sheet.to_string())
            .or_default()
            .push(row.iter().cloned().map(Value::String).collect());
        Ok(())
    }

    async fn update_cell(
        &self,
        sheet: &str,
        row: usize,
        column: usize,
        value: &str,
    ) -> ClientResult<()> {
        self.record(SheetCall::UpdateCell {
            sheet: sheet.to_string(),
            row,
            column,
            value: value.to_string(),
        })?;
        let mut rows = self
            .sheets
            .get_mut(sheet)
            .ok_or_else(|| ClientError::Endpoint(format!("Sheet not found: {sheet}")))?;
        let cells = row
            .checked_sub(1)
            .and_then(|r| rows.get_mut(r))
            .ok_or_else(|| ClientError::Endpoint(format!("Row {row} out of range")))?;
        let index = column
            .checked_sub(1)
            .ok_or_else(|| ClientError::Endpoint("Column 0 out of range".into()))?;
        if cells.len() <= index {
            cells.resize(index + 1, Value::String(String::new()));
        }
        cells[index] = Value::String(value.to_string());
        Ok(())
    }

    async fn upload_file(&self, file: &FileUpload, folder_id: &str) -> ClientResult<String> {
        self.record(SheetCall::UploadFile {
            file_name: file.file_name.clone(),
            folder_id: folder_id.to_string(),
        })?;
        if let Some(message) = self.failing_uploads.get(&file.file_name) {
            return Err(ClientError::Endpoint(message.clone()));
        }
        let id = self.uploads.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("https://drive.example/file/{id}/{}", file.file_name))
    }

    async fn share_via_email(&self, share: &EmailShare) -> ClientResult<()> {
        self.record(SheetCall::ShareViaEmail {
            recipient_email: share.recipient_email.clone(),
            documents: share.documents.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_update() {
        let sheets = MemorySheets::new().with_sheet("Tab", [vec!["A", "B"]]);
        sheets.insert("Tab", &["1".into(), "x".into()]).await.unwrap();
        sheets.update_cell("Tab", 2, 4, "late").await.unwrap();

        assert_eq!(sheets.cell("Tab", 2, 1).as_deref(), Some("1"));
        assert_eq!(sheets.cell("Tab", 2, 4).as_deref(), Some("late"));
        assert!(sheets.update_cell("Tab", 9, 1, "x").await.is_err());
        assert_eq!(sheets.call_count(action::UPDATE_CELL), 2);
        assert_eq!(sheets.write_count(), 3);
    }

    #[tokio::test]
    async fn test_failures_are_recorded() {
        let sheets = MemorySheets::new();
        assert!(matches!(
            sheets.fetch("Missing").await,
            Err(ClientError::Endpoint(_))
        ));

        sheets.fail_action(action::INSERT, "quota exceeded");
        let err = sheets.insert("Tab", &[]).await.unwrap_err();
        assert_eq!(err.to_string(), "Endpoint error: quota exceeded");
        assert!(sheets.rows("Tab").is_empty());
        assert_eq!(sheets.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_upload_links_are_unique() {
        let sheets = MemorySheets::new();
        let file = FileUpload::new("a.png", vec![]);
        let first = sheets.upload_file(&file, "f").await.unwrap();
        let second = sheets.upload_file(&file, "f").await.unwrap();
        assert_ne!(first, second);

        sheets.fail_upload("a.png", "disk full");
        assert!(sheets.upload_file(&file, "f").await.is_err());
    }
}
