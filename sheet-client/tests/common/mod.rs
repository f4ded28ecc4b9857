// Shared fixtures for workflow tests

#![allow(dead_code)]

use std::sync::Arc;

use shared::models::{
    EnquiryColumn, FollowUpColumn, GatePassColumn, GatePassRecord, GatePassStatus, HodColumn,
    JoiningColumn, JoiningRecord,
};
use shared::row::{Column, WriteRow};
use sheet_client::{ClientConfig, FixedClock, MemorySheets, SheetContext};

pub const GATE_PASS: &str = "Gate Pass";
pub const JOINING: &str = "JOINING";
pub const ENQUIRY: &str = "ENQUIRY";
pub const FOLLOW_UP: &str = "Follow - Up";
pub const HOD: &str = "Master";

pub fn header<C: Column>() -> Vec<String> {
    let mut row = vec![String::new(); C::WIDTH];
    for column in C::ALL {
        row[column.index()] = column.header().to_string();
    }
    row
}

pub fn employee(id: &str, name: &str, department: &str) -> Vec<String> {
    JoiningRecord {
        employee_id: id.into(),
        candidate_name: name.into(),
        department: department.into(),
        mobile_no: "9800000000".into(),
        status: "Active".into(),
        ..Default::default()
    }
    .to_row()
}

pub fn gate_pass(serial: &str, id: &str, name: &str, departure: &str, status: GatePassStatus) -> Vec<String> {
    GatePassRecord {
        serial_no: serial.into(),
        employee_id: id.into(),
        employee_name: name.into(),
        department: "Stores".into(),
        visit_place: "Bank".into(),
        visit_reason: "KYC".into(),
        departure_time: departure.into(),
        arrival_time: departure.into(),
        hod_name: "Sunita Nair".into(),
        whatsapp_number: "9800000000".into(),
        gate_pass_image_url: String::new(),
        status,
    }
    .to_row()
}

pub fn enquiry(no: &str, name: &str, actual: &str, joining: &str) -> Vec<String> {
    let mut row = vec![String::new(); EnquiryColumn::WIDTH];
    let mut set = |column: EnquiryColumn, value: &str| row[column.index()] = value.to_string();
    set(EnquiryColumn::Timestamp, "01/02/24 10:00:00");
    set(EnquiryColumn::IndentNo, "IND-1");
    set(EnquiryColumn::CandidateEnquiryNo, no);
    set(EnquiryColumn::ApplyingForPost, "Accountant");
    set(EnquiryColumn::Department, "Finance");
    set(EnquiryColumn::CandidateName, name);
    set(EnquiryColumn::CandidateDob, "1996-11-23");
    set(EnquiryColumn::CandidatePhone, "9811111111");
    set(EnquiryColumn::CandidateEmail, "candidate@example.com");
    set(EnquiryColumn::CandidatePhoto, "https://drive.example/enquiry-photo");
    set(EnquiryColumn::PresentAddress, "12 Lake Road");
    set(EnquiryColumn::ActualDate, actual);
    set(EnquiryColumn::JoiningDate, joining);
    row
}

pub fn follow_up(no: &str, status: &str) -> Vec<String> {
    let mut row = vec![String::new(); FollowUpColumn::WIDTH];
    row[FollowUpColumn::Timestamp.index()] = "05/02/24 11:00:00".into();
    row[FollowUpColumn::EnquiryNo.index()] = no.into();
    row[FollowUpColumn::Status.index()] = status.into();
    row
}

/// Roster with two employees and an empty gate pass sheet
pub fn staffed_sheets() -> MemorySheets {
    MemorySheets::new()
        .with_sheet(
            JOINING,
            vec![
                header::<JoiningColumn>(),
                employee("EMP-007", "Kavya Rao", "Stores"),
                employee("EMP-012", "Arjun Das", "Finance"),
            ],
        )
        .with_sheet(GATE_PASS, vec![header::<GatePassColumn>()])
        .with_sheet(HOD, vec![header::<HodColumn>()])
}

pub fn context(sheets: &Arc<MemorySheets>, config: ClientConfig) -> SheetContext {
    SheetContext::new(sheets.clone(), config.with_upload_folder("folder-1"))
        .with_clock(FixedClock::on(2024, 3, 15).expect("valid date"))
}

pub fn default_context(sheets: &Arc<MemorySheets>) -> SheetContext {
    context(sheets, ClientConfig::new("memory://sheets"))
}
