//! Gate Pass Model

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

use super::employee::EmployeeDirectoryEntry;
use crate::dates;
use crate::error::FormError;
use crate::row::{RowError, RowReader, RowWriter, SheetEntry, SheetRow, WriteRow};

crate::sheet_columns! {
    /// Columns of the gate pass sheet
    pub enum GatePassColumn [12] {
        SerialNo = 0 => "Serial No",
        EmployeeId = 1 => "Employee ID",
        EmployeeName = 2 => "Employee Name",
        Department = 3 => "Department",
        VisitPlace = 4 => "Visit Place",
        VisitReason = 5 => "Visit Reason",
        DepartureTime = 6 => "Departure Time",
        ArrivalTime = 7 => "Arrival Time",
        HodName = 8 => "HOD Name",
        WhatsappNumber = 9 => "WhatsApp Number",
        GatePassImage = 10 => "Gate Pass Image",
        Status = 11 => "Status",
    }
}

/// Approval state of a gate pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatePassStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// Admin decision on a pending gate pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Approve,
    Reject,
}

/// Decision applied to a gate pass that is no longer pending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot {decision} a gate pass that is already {from}")]
pub struct TransitionError {
    pub from: GatePassStatus,
    pub decision: Decision,
}

impl GatePassStatus {
    /// Text written to the status cell
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// `Pending → Approved | Rejected`; terminal states accept nothing.
    pub fn apply(self, decision: Decision) -> Result<Self, TransitionError> {
        match (self, decision) {
            (Self::Pending, Decision::Approve) => Ok(Self::Approved),
            (Self::Pending, Decision::Reject) => Ok(Self::Rejected),
            (from, decision) => Err(TransitionError { from, decision }),
        }
    }
}

impl fmt::Display for GatePassStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GatePassStatus {
    type Err = String;

    /// Case-insensitive; an empty cell is a request nobody has acted on yet.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        })
    }
}

/// One gate pass row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatePassRecord {
    pub serial_no: String,
    pub employee_id: String,
    pub employee_name: String,
    pub department: String,
    pub visit_place: String,
    pub visit_reason: String,
    /// `dd/mm/yy hh:mm:ss`
    pub departure_time: String,
    /// `dd/mm/yy hh:mm:ss`
    pub arrival_time: String,
    pub hod_name: String,
    pub whatsapp_number: String,
    pub gate_pass_image_url: String,
    pub status: GatePassStatus,
}

impl GatePassRecord {
    /// Build a new pending request for `employee`.
    pub fn new_request(
        serial_no: u64,
        employee: &EmployeeDirectoryEntry,
        request: &CheckedGatePassRequest,
        image_url: String,
    ) -> Self {
        Self {
            serial_no: serial_no.to_string(),
            employee_id: employee.id.clone(),
            employee_name: employee.name.clone(),
            department: employee.department.clone(),
            visit_place: request.visit_place.clone(),
            visit_reason: request.visit_reason.clone(),
            departure_time: dates::format_sheet_datetime(request.departure),
            arrival_time: dates::format_sheet_datetime(request.arrival),
            hod_name: request.hod_name.clone(),
            whatsapp_number: employee.whatsapp_number.clone(),
            gate_pass_image_url: image_url,
            status: GatePassStatus::Pending,
        }
    }

    /// Matched by employee id, or by name when the directory has no id
    pub fn belongs_to(&self, employee: &EmployeeDirectoryEntry) -> bool {
        if employee.id.is_empty() {
            self.employee_name == employee.name
        } else {
            self.employee_id == employee.id
        }
    }

    pub fn departure(&self) -> Option<NaiveDateTime> {
        dates::parse_datetime(&self.departure_time)
    }
}

impl SheetRow for GatePassRecord {
    type Column = GatePassColumn;

    fn read(row: &RowReader<'_, GatePassColumn>) -> Result<Self, RowError> {
        let status_cell = row.get(GatePassColumn::Status);
        let status = status_cell
            .parse()
            .map_err(|value| RowError::InvalidValue {
                column: "Status",
                value,
            })?;

        Ok(Self {
            serial_no: row.required(GatePassColumn::SerialNo)?,
            employee_id: row.trimmed(GatePassColumn::EmployeeId),
            employee_name: row.trimmed(GatePassColumn::EmployeeName),
            department: row.get(GatePassColumn::Department),
            visit_place: row.get(GatePassColumn::VisitPlace),
            visit_reason: row.get(GatePassColumn::VisitReason),
            departure_time: row.trimmed(GatePassColumn::DepartureTime),
            arrival_time: row.trimmed(GatePassColumn::ArrivalTime),
            hod_name: row.get(GatePassColumn::HodName),
            whatsapp_number: row.get(GatePassColumn::WhatsappNumber),
            gate_pass_image_url: row.get(GatePassColumn::GatePassImage),
            status,
        })
    }
}

impl WriteRow for GatePassRecord {
    fn write(&self, row: &mut RowWriter<GatePassColumn>) {
        row.set(GatePassColumn::SerialNo, &self.serial_no)
            .set(GatePassColumn::EmployeeId, &self.employee_id)
            .set(GatePassColumn::EmployeeName, &self.employee_name)
            .set(GatePassColumn::Department, &self.department)
            .set(GatePassColumn::VisitPlace, &self.visit_place)
            .set(GatePassColumn::VisitReason, &self.visit_reason)
            .set(GatePassColumn::DepartureTime, &self.departure_time)
            .set(GatePassColumn::ArrivalTime, &self.arrival_time)
            .set(GatePassColumn::HodName, &self.hod_name)
            .set(GatePassColumn::WhatsappNumber, &self.whatsapp_number)
            .set(GatePassColumn::GatePassImage, &self.gate_pass_image_url)
            .set(GatePassColumn::Status, self.status.as_str());
    }
}

/// Gate passes grouped by status, in sheet order
#[derive(Debug, Clone, Default, Serialize)]
pub struct GatePassBoard {
    pub pending: Vec<SheetEntry<GatePassRecord>>,
    pub approved: Vec<SheetEntry<GatePassRecord>>,
    pub rejected: Vec<SheetEntry<GatePassRecord>>,
}

impl GatePassBoard {
    pub fn from_entries(entries: impl IntoIterator<Item = SheetEntry<GatePassRecord>>) -> Self {
        let mut board = Self::default();
        for entry in entries {
            match entry.record.status {
                GatePassStatus::Pending => board.pending.push(entry),
                GatePassStatus::Approved => board.approved.push(entry),
                GatePassStatus::Rejected => board.rejected.push(entry),
            }
        }
        board
    }

    pub fn tab(&self, status: GatePassStatus) -> &[SheetEntry<GatePassRecord>] {
        match status {
            GatePassStatus::Pending => &self.pending,
            GatePassStatus::Approved => &self.approved,
            GatePassStatus::Rejected => &self.rejected,
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len() + self.approved.len() + self.rejected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Gate pass request as entered by an employee
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct GatePassRequestForm {
    #[validate(length(min = 1, message = "visit place is required"))]
    pub visit_place: String,
    #[validate(length(min = 1, message = "visit reason is required"))]
    pub visit_reason: String,
    /// datetime-local value, e.g. `2024-03-05T14:30`
    #[validate(length(min = 1, message = "departure time is required"))]
    pub departure_time: String,
    #[validate(length(min = 1, message = "arrival time is required"))]
    pub arrival_time: String,
    #[validate(length(min = 1, message = "HOD name is required"))]
    pub hod_name: String,
}

/// A request form whose fields passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedGatePassRequest {
    pub visit_place: String,
    pub visit_reason: String,
    pub departure: NaiveDateTime,
    pub arrival: NaiveDateTime,
    pub hod_name: String,
}

impl GatePassRequestForm {
    /// Validate required fields and the departure/arrival pair.
    pub fn check(&self) -> Result<CheckedGatePassRequest, FormError> {
        let trimmed = Self {
            visit_place: self.visit_place.trim().to_string(),
            visit_reason: self.visit_reason.trim().to_string(),
            departure_time: self.departure_time.trim().to_string(),
            arrival_time: self.arrival_time.trim().to_string(),
            hod_name: self.hod_name.trim().to_string(),
        };
        trimmed.validate()?;

        let departure =
            dates::parse_datetime(&trimmed.departure_time).ok_or_else(|| FormError::BadDate {
                field: "departure_time",
                value: trimmed.departure_time.clone(),
            })?;
        let arrival =
            dates::parse_datetime(&trimmed.arrival_time).ok_or_else(|| FormError::BadDate {
                field: "arrival_time",
                value: trimmed.arrival_time.clone(),
            })?;
        if arrival < departure {
            return Err(FormError::ArrivalBeforeDeparture {
                departure: trimmed.departure_time,
                arrival: trimmed.arrival_time,
            });
        }

        Ok(CheckedGatePassRequest {
            visit_place: trimmed.visit_place,
            visit_reason: trimmed.visit_reason,
            departure,
            arrival,
            hod_name: trimmed.hod_name,
        })
    }
}
