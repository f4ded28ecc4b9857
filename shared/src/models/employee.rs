//! Employee Model
//!
//! Directory entries are read from the roster sheet, which is the joining
//! sheet this client appends new employees to, so the directory borrows
//! [`JoiningColumn`] positions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::joining::JoiningColumn;
use crate::row::{RowError, RowReader, SheetEntry, SheetRow};

/// Names offered when the HOD sheet is empty or unreachable
pub const DEFAULT_HOD_NAMES: [&str; 5] = [
    "Ramesh Verma",
    "Sunita Nair",
    "Anil Joshi",
    "Deepa Menon",
    "Vikram Singh",
];

/// Employee directory entry (read-only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDirectoryEntry {
    pub id: String,
    pub name: String,
    pub department: String,
    pub whatsapp_number: String,
}

impl SheetRow for EmployeeDirectoryEntry {
    type Column = JoiningColumn;

    fn read(row: &RowReader<'_, JoiningColumn>) -> Result<Self, RowError> {
        Ok(Self {
            id: row.trimmed(JoiningColumn::EmployeeId),
            name: row.required(JoiningColumn::CandidateName)?,
            department: row.trimmed(JoiningColumn::Department),
            whatsapp_number: row.trimmed(JoiningColumn::MobileNo),
        })
    }
}

/// Directory keyed by employee name.
///
/// Names are not unique in the roster; on a collision the later row wins.
#[derive(Debug, Clone, Default)]
pub struct EmployeeDirectory {
    by_name: HashMap<String, EmployeeDirectoryEntry>,
}

impl EmployeeDirectory {
    pub fn from_entries(entries: impl IntoIterator<Item = SheetEntry<EmployeeDirectoryEntry>>) -> Self {
        let mut by_name = HashMap::new();
        for SheetEntry { row_number, record } in entries {
            if let Some(previous) = by_name.insert(record.name.clone(), record) {
                tracing::warn!(
                    name = %previous.name,
                    row = row_number,
                    replaced_id = %previous.id,
                    "Duplicate employee name in roster, keeping later row"
                );
            }
        }
        Self { by_name }
    }

    pub fn get(&self, name: &str) -> Option<&EmployeeDirectoryEntry> {
        self.by_name.get(name.trim())
    }

    /// Names in alphabetical order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.by_name.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

crate::sheet_columns! {
    /// Columns of the HOD reference sheet
    pub enum HodColumn [1] {
        Name = 0 => "HOD Name",
    }
}

/// One HOD reference row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HodEntry {
    pub name: String,
}

impl SheetRow for HodEntry {
    type Column = HodColumn;

    fn read(row: &RowReader<'_, HodColumn>) -> Result<Self, RowError> {
        Ok(Self {
            name: row.required(HodColumn::Name)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::validate_layout;

    fn entry(row_number: usize, id: &str, name: &str) -> SheetEntry<EmployeeDirectoryEntry> {
        SheetEntry {
            row_number,
            record: EmployeeDirectoryEntry {
                id: id.into(),
                name: name.into(),
                department: "Accounts".into(),
                whatsapp_number: String::new(),
            },
        }
    }

    #[test]
    fn test_hod_layout_is_valid() {
        assert_eq!(validate_layout::<HodColumn>(), Ok(()));
    }

    #[test]
    fn test_directory_lookup_by_name() {
        let directory =
            EmployeeDirectory::from_entries(vec![entry(2, "EMP-001", "Asha"), entry(3, "EMP-002", "Ravi")]);
        assert_eq!(directory.get(" Ravi ").unwrap().id, "EMP-002");
        assert!(directory.get("Nobody").is_none());
        assert_eq!(directory.names(), vec!["Asha", "Ravi"]);
    }

    #[test]
    fn test_duplicate_names_keep_later_row() {
        let directory =
            EmployeeDirectory::from_entries(vec![entry(2, "EMP-001", "Asha"), entry(9, "EMP-014", "Asha")]);
        assert_eq!(directory.len(), 1);
        assert_eq!(directory.get("Asha").unwrap().id, "EMP-014");
    }
}
