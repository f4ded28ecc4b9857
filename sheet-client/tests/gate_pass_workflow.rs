mod common;

use std::sync::Arc;

use common::*;
use shared::ErrorCategory;
use shared::models::{GatePassColumn, GatePassRequestForm, GatePassStatus};
use shared::row::{Column, HeaderCheck};
use shared::rules::{QuotaPolicy, QuotaViolation};
use sheet_client::memory::action;
use sheet_client::{
    ClientConfig, ClientError, FileUpload, GatePassAdmin, GatePassDesk, MemorySheets, SheetApi,
    SheetCall, SheetRef, UploadFailurePolicy,
};

fn form() -> GatePassRequestForm {
    GatePassRequestForm {
        visit_place: "Bank".into(),
        visit_reason: "KYC update".into(),
        departure_time: "2024-03-15T14:30".into(),
        arrival_time: "2024-03-15T16:00".into(),
        hod_name: "Sunita Nair".into(),
    }
}

fn sheets_with_passes(passes: Vec<Vec<String>>) -> Arc<MemorySheets> {
    let sheets = staffed_sheets();
    let mut rows = vec![header::<GatePassColumn>()];
    rows.extend(passes);
    Arc::new(sheets.with_sheet(GATE_PASS, rows))
}

// ========== Admin ==========

#[tokio::test]
async fn test_approve_rewrites_status_cell() {
    let sheets = sheets_with_passes(vec![
        gate_pass("1", "EMP-007", "Kavya Rao", "14/03/24 10:00:00", GatePassStatus::Approved),
        gate_pass("2", "EMP-012", "Arjun Das", "15/03/24 10:00:00", GatePassStatus::Pending),
    ]);
    let mut admin = GatePassAdmin::new(default_context(&sheets));

    let board = admin.board().await.unwrap();
    assert_eq!(board.pending.len(), 1);
    assert_eq!(board.approved.len(), 1);

    admin.select("2");
    let entry = admin.approve().await.unwrap();

    assert_eq!(entry.row_number, 3);
    assert_eq!(entry.record.status, GatePassStatus::Approved);
    assert!(admin.selected().is_none());
    assert!(sheets.calls().contains(&SheetCall::UpdateCell {
        sheet: GATE_PASS.into(),
        row: 3,
        column: GatePassColumn::Status.number(),
        value: "Approved".into(),
    }));
    assert_eq!(sheets.cell(GATE_PASS, 3, 12).as_deref(), Some("Approved"));
}

#[tokio::test]
async fn test_reject_pending() {
    let sheets = sheets_with_passes(vec![gate_pass(
        "9",
        "EMP-007",
        "Kavya Rao",
        "15/03/24 10:00:00",
        GatePassStatus::Pending,
    )]);
    let mut admin = GatePassAdmin::new(default_context(&sheets));
    admin.select(" 9 ");
    let entry = admin.reject().await.unwrap();
    assert_eq!(entry.record.status, GatePassStatus::Rejected);
    assert_eq!(sheets.cell(GATE_PASS, 2, 12).as_deref(), Some("Rejected"));
}

#[tokio::test]
async fn test_decision_without_selection_makes_no_calls() {
    let sheets = sheets_with_passes(vec![]);
    let mut admin = GatePassAdmin::new(default_context(&sheets));

    let err = admin.approve().await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    assert!(sheets.calls().is_empty());
}

#[tokio::test]
async fn test_terminal_status_is_not_overwritten() {
    let sheets = sheets_with_passes(vec![gate_pass(
        "4",
        "EMP-007",
        "Kavya Rao",
        "15/03/24 10:00:00",
        GatePassStatus::Pending,
    )]);
    let mut admin = GatePassAdmin::new(default_context(&sheets));
    admin.board().await.unwrap();
    admin.select("4");

    // Another admin settles the request in the meantime
    sheets.update_cell(GATE_PASS, 2, 12, "Rejected").await.unwrap();
    let before = sheets.call_count(action::UPDATE_CELL);

    let err = admin.approve().await.unwrap_err();
    assert!(matches!(err, ClientError::Transition(_)));
    assert_eq!(err.category(), ErrorCategory::Validation);
    assert_eq!(sheets.call_count(action::UPDATE_CELL), before);
    assert_eq!(sheets.cell(GATE_PASS, 2, 12).as_deref(), Some("Rejected"));
    assert_eq!(admin.selected(), Some("4"));
}

#[tokio::test]
async fn test_unknown_serial_is_not_found() {
    let sheets = sheets_with_passes(vec![]);
    let mut admin = GatePassAdmin::new(default_context(&sheets));
    admin.select("77");
    assert!(matches!(admin.reject().await, Err(ClientError::NotFound(_))));
    assert_eq!(sheets.write_count(), 0);
}

#[tokio::test]
async fn test_failed_update_keeps_selection() {
    let sheets = sheets_with_passes(vec![gate_pass(
        "1",
        "EMP-007",
        "Kavya Rao",
        "15/03/24 10:00:00",
        GatePassStatus::Pending,
    )]);
    sheets.fail_action(action::UPDATE_CELL, "Service invoked too many times");
    let mut admin = GatePassAdmin::new(default_context(&sheets));
    admin.select("1");

    let err = admin.approve().await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Endpoint);
    assert_eq!(admin.selected(), Some("1"));
}

#[tokio::test]
async fn test_header_row_offset() {
    let sheets = Arc::new(staffed_sheets().with_sheet(
        GATE_PASS,
        vec![
            vec!["Gate pass register".to_string()],
            header::<GatePassColumn>(),
            gate_pass("3", "EMP-007", "Kavya Rao", "15/03/24 10:00:00", GatePassStatus::Pending),
        ],
    ));
    let mut config = ClientConfig::new("memory://sheets");
    config.sheets.gate_pass = SheetRef::new(GATE_PASS).with_header_row(1);
    let mut admin = GatePassAdmin::new(context(&sheets, config));

    admin.select("3");
    let entry = admin.approve().await.unwrap();
    assert_eq!(entry.row_number, 3);
    assert_eq!(sheets.cell(GATE_PASS, 3, 12).as_deref(), Some("Approved"));
}

#[tokio::test]
async fn test_strict_headers_reject_moved_columns() {
    let mut moved = header::<GatePassColumn>();
    moved.swap(10, 11);
    let sheets = Arc::new(staffed_sheets().with_sheet(GATE_PASS, vec![moved, vec!["1".to_string()]]));

    let lenient = GatePassAdmin::new(default_context(&sheets));
    assert!(lenient.board().await.is_ok());

    let strict = GatePassAdmin::new(context(
        &sheets,
        ClientConfig::new("memory://sheets").with_header_check(HeaderCheck::Strict),
    ));
    let err = strict.board().await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Schema);
}

// ========== Requests ==========

#[tokio::test]
async fn test_unknown_employee() {
    let sheets = sheets_with_passes(vec![]);
    let err = GatePassDesk::for_employee(default_context(&sheets), "Nobody")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
}

#[tokio::test]
async fn test_submit_appends_pending_row() {
    let sheets = sheets_with_passes(vec![
        gate_pass("4", "EMP-012", "Arjun Das", "15/03/24 09:00:00", GatePassStatus::Pending),
        gate_pass("11", "EMP-012", "Arjun Das", "01/02/24 09:00:00", GatePassStatus::Approved),
    ]);
    let mut desk = GatePassDesk::for_employee(default_context(&sheets), "Kavya Rao")
        .await
        .unwrap();
    assert_eq!(desk.usage().this_month, 0);
    assert_eq!(desk.remaining(), 3);

    let record = desk.submit(&form(), None).await.unwrap();

    assert_eq!(record.serial_no, "12");
    assert_eq!(record.employee_id, "EMP-007");
    assert_eq!(record.department, "Stores");
    assert_eq!(record.departure_time, "15/03/24 14:30:00");
    assert_eq!(record.arrival_time, "15/03/24 16:00:00");
    assert_eq!(record.status, GatePassStatus::Pending);

    let rows = sheets.rows(GATE_PASS);
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[3][11], "Pending");
    assert_eq!(desk.usage().today, 1);
    assert_eq!(desk.usage().this_month, 1);
    assert_eq!(desk.history().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_second_request_same_day_is_blocked() {
    let sheets = sheets_with_passes(vec![gate_pass(
        "1",
        "EMP-007",
        "Kavya Rao",
        "15/03/24 08:00:00",
        GatePassStatus::Rejected,
    )]);
    let mut desk = GatePassDesk::for_employee(default_context(&sheets), "Kavya Rao")
        .await
        .unwrap();

    let err = desk.submit(&form(), None).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Quota(QuotaViolation::DailyLimitReached)
    ));
    assert_eq!(sheets.call_count(action::INSERT), 0);
}

#[tokio::test]
async fn test_monthly_limit() {
    let passes = ["02/03/24 10:00:00", "06/03/24 10:00:00", "11/03/24 10:00:00"]
        .iter()
        .enumerate()
        .map(|(i, departure)| {
            gate_pass(&(i + 1).to_string(), "EMP-007", "Kavya Rao", departure, GatePassStatus::Approved)
        })
        .collect();
    let sheets = sheets_with_passes(passes);
    let mut desk = GatePassDesk::for_employee(default_context(&sheets), "Kavya Rao")
        .await
        .unwrap();
    assert_eq!(desk.remaining(), 0);

    let err = desk.submit(&form(), None).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Quota(QuotaViolation::MonthlyLimitReached { used: 3, limit: 3 })
    ));

    let mut generous = GatePassDesk::for_employee(
        context(&sheets, ClientConfig::new("memory://sheets").with_quota(QuotaPolicy::new(5))),
        "Kavya Rao",
    )
    .await
    .unwrap();
    assert!(generous.submit(&form(), None).await.is_ok());
}

#[tokio::test]
async fn test_quota_is_rechecked_against_fresh_rows() {
    let sheets = sheets_with_passes(vec![]);
    let mut desk = GatePassDesk::for_employee(default_context(&sheets), "Kavya Rao")
        .await
        .unwrap();
    assert_eq!(desk.usage().today, 0);

    // A second session submits first
    let row = gate_pass("1", "EMP-007", "Kavya Rao", "15/03/24 09:00:00", GatePassStatus::Pending);
    sheets.insert(GATE_PASS, &row).await.unwrap();

    let err = desk.submit(&form(), None).await.unwrap_err();
    assert!(matches!(err, ClientError::Quota(_)));
    assert_eq!(sheets.rows(GATE_PASS).len(), 2);
}

#[tokio::test]
async fn test_failed_insert_leaves_usage_unchanged() {
    let sheets = sheets_with_passes(vec![]);
    sheets.fail_action(action::INSERT, "Lock timeout");
    let mut desk = GatePassDesk::for_employee(default_context(&sheets), "Kavya Rao")
        .await
        .unwrap();

    let err = desk.submit(&form(), None).await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Endpoint);
    assert_eq!(desk.usage().today, 0);
    assert_eq!(desk.usage().this_month, 0);
}

#[tokio::test]
async fn test_invalid_form_makes_no_calls() {
    let sheets = sheets_with_passes(vec![]);
    let mut desk = GatePassDesk::for_employee(default_context(&sheets), "Kavya Rao")
        .await
        .unwrap();
    let before = sheets.calls().len();

    let mut inverted = form();
    inverted.arrival_time = "2024-03-15T09:00".into();
    let err = desk.submit(&inverted, None).await.unwrap_err();
    assert!(matches!(err, ClientError::Form(_)));
    assert_eq!(sheets.calls().len(), before);
}

#[tokio::test]
async fn test_image_upload_is_linked() {
    let sheets = sheets_with_passes(vec![]);
    let mut desk = GatePassDesk::for_employee(default_context(&sheets), "Kavya Rao")
        .await
        .unwrap();

    let image = FileUpload::new("IMG_001.png", b"png".to_vec());
    let record = desk.submit(&form(), Some(image)).await.unwrap();

    assert!(record.gate_pass_image_url.ends_with("/gate_pass_1.png"));
    assert!(sheets.calls().contains(&SheetCall::UploadFile {
        file_name: "gate_pass_1.png".into(),
        folder_id: "folder-1".into(),
    }));
}

#[tokio::test]
async fn test_image_upload_failure_policy() {
    let sheets = sheets_with_passes(vec![]);
    sheets.fail_upload("gate_pass_1.png", "Drive quota exceeded");

    let mut degrade = GatePassDesk::for_employee(default_context(&sheets), "Kavya Rao")
        .await
        .unwrap();
    let image = FileUpload::new("pass.png", b"png".to_vec());
    let record = degrade.submit(&form(), Some(image.clone())).await.unwrap();
    assert_eq!(record.gate_pass_image_url, "");
    assert_eq!(sheets.call_count(action::INSERT), 1);

    let mut abort = GatePassDesk::for_employee(
        context(
            &sheets,
            ClientConfig::new("memory://sheets")
                .with_upload_failure_policy(UploadFailurePolicy::Abort),
        ),
        "Arjun Das",
    )
    .await
    .unwrap();
    // Next serial is 2 now; make that upload fail too
    sheets.fail_upload("gate_pass_2.png", "Drive quota exceeded");
    let err = abort.submit(&form(), Some(image)).await.unwrap_err();
    assert!(matches!(err, ClientError::Upload { .. }));
    assert_eq!(err.category(), ErrorCategory::PartialFailure);
    assert_eq!(sheets.call_count(action::INSERT), 1);
}
