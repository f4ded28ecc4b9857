//! Command dispatch

use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::{GatePassRequestForm, GatePassStatus, JoiningForm};
use sheet_client::services::hod_names;
use sheet_client::{FileUpload, GatePassAdmin, GatePassDesk, JoiningDesk, SheetContext};

use crate::cli::{Command, GatePassCommand, JoiningCommand};
use crate::render;

/// Run one command and return what should be printed
pub async fn execute(ctx: SheetContext, command: Command, json: bool) -> anyhow::Result<String> {
    match command {
        Command::GatePass { command } => gate_pass(ctx, command, json).await,
        Command::Joining { command } => joining(ctx, command, json).await,
        Command::Hods => {
            let names = hod_names(&ctx).await;
            output(json, &names, || render::names(&names))
        }
        Command::Share {
            employee_id,
            to,
            message,
        } => {
            let share = JoiningDesk::new(ctx)
                .share_employee_documents(&employee_id, &to, &message)
                .await?;
            output(json, &share, || {
                format!("Shared {} document(s) with {}", share.documents.len(), to)
            })
        }
    }
}

async fn gate_pass(ctx: SheetContext, command: GatePassCommand, json: bool) -> anyhow::Result<String> {
    match command {
        GatePassCommand::List { status } => {
            let board = GatePassAdmin::new(ctx).board().await?;
            let only = status.map(GatePassStatus::from);
            match only {
                Some(status) if json => Ok(serde_json::to_string_pretty(board.tab(status))?),
                _ => output(json, &board, || render::board(&board, only)),
            }
        }
        GatePassCommand::Approve { serial_no } => {
            let mut admin = GatePassAdmin::new(ctx);
            admin.select(serial_no);
            let entry = admin.approve().await?;
            output(json, &entry, || {
                format!("Approved {}", render::gate_pass_line(&entry.record))
            })
        }
        GatePassCommand::Reject { serial_no } => {
            let mut admin = GatePassAdmin::new(ctx);
            admin.select(serial_no);
            let entry = admin.reject().await?;
            output(json, &entry, || {
                format!("Rejected {}", render::gate_pass_line(&entry.record))
            })
        }
        GatePassCommand::Request {
            employee,
            form,
            image,
        } => {
            let form: GatePassRequestForm = read_json(&form).await?;
            let image = match image {
                Some(path) => Some(FileUpload::from_path(&path).await?),
                None => None,
            };
            let mut desk = GatePassDesk::for_employee(ctx, &employee).await?;
            let record = desk.submit(&form, image).await?;
            output(json, &record, || {
                format!(
                    "Requested {}\n{} gate pass(es) left this month",
                    render::gate_pass_line(&record),
                    desk.remaining()
                )
            })
        }
        GatePassCommand::Quota { employee } => {
            let policy = ctx.config.quota;
            let desk = GatePassDesk::for_employee(ctx, &employee).await?;
            let usage = desk.usage();
            output(json, &usage, || {
                render::quota(&desk.employee().name, &usage, &policy)
            })
        }
    }
}

async fn joining(ctx: SheetContext, command: JoiningCommand, json: bool) -> anyhow::Result<String> {
    let desk = JoiningDesk::new(ctx);
    match command {
        JoiningCommand::Queue => {
            let queue = desk.queue().await?;
            output(json, &queue, || render::queue(&queue))
        }
        JoiningCommand::Submit {
            enquiry_no,
            form,
            documents,
        } => {
            let form: JoiningForm = read_json(&form).await?;
            let mut files = Vec::with_capacity(documents.len());
            for (doc, path) in documents {
                files.push((doc, FileUpload::from_path(&path).await?));
            }
            let outcome = desk.submit(&enquiry_no, &form, files).await?;
            output(json, &outcome, || render::joining(&outcome))
        }
    }
}

/// Read a form from a JSON file
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid form in {}", path.display()))
}

fn output<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> anyhow::Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(text())
    }
}
