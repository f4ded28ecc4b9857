//! Plain-text output

use std::fmt::Write;

use shared::models::{EnquiryCandidate, GatePassBoard, GatePassRecord, GatePassStatus};
use shared::row::SheetEntry;
use shared::rules::{QuotaPolicy, QuotaUsage};
use sheet_client::JoiningOutcome;

const STATUSES: [GatePassStatus; 3] = [
    GatePassStatus::Pending,
    GatePassStatus::Approved,
    GatePassStatus::Rejected,
];

pub fn board(board: &GatePassBoard, only: Option<GatePassStatus>) -> String {
    let mut out = String::new();
    for status in STATUSES.into_iter().filter(|s| only.is_none_or(|o| o == *s)) {
        let entries = board.tab(status);
        let _ = writeln!(out, "{status} ({})", entries.len());
        for entry in entries {
            let _ = writeln!(out, "  {}", gate_pass_line(&entry.record));
        }
    }
    out
}

pub fn gate_pass_line(record: &GatePassRecord) -> String {
    format!(
        "#{:<5} {:<20} {:<14} {} -> {}  {} ({})  HOD: {}",
        record.serial_no,
        record.employee_name,
        record.department,
        record.departure_time,
        record.arrival_time,
        record.visit_place,
        record.visit_reason,
        record.hod_name,
    )
}

pub fn quota(name: &str, usage: &QuotaUsage, policy: &QuotaPolicy) -> String {
    let today = if usage.today > 0 {
        "already requested today"
    } else {
        "available today"
    };
    format!(
        "{name}: {} of {} used this month, {} remaining; {today}",
        usage.this_month,
        policy.monthly_limit,
        policy.remaining(usage),
    )
}

pub fn queue(entries: &[SheetEntry<EnquiryCandidate>]) -> String {
    if entries.is_empty() {
        return "No candidates waiting to join\n".to_string();
    }
    let mut out = String::new();
    for SheetEntry { record, .. } in entries {
        let _ = writeln!(
            out,
            "{:<10} {:<22} {:<18} {:<14} {}",
            record.candidate_enquiry_no,
            record.candidate_name,
            record.applying_for_post,
            record.department,
            record.candidate_phone,
        );
    }
    out
}

pub fn joining(outcome: &JoiningOutcome) -> String {
    format!(
        "{} joined as {} on {} (enquiry row {})",
        outcome.record.candidate_name,
        outcome.employee_id,
        outcome.record.date_of_joining,
        outcome.enquiry_row,
    )
}

pub fn names(names: &[String]) -> String {
    names.iter().fold(String::new(), |mut out, name| {
        let _ = writeln!(out, "{name}");
        out
    })
}
