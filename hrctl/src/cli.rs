//! Command-line definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use shared::models::{GatePassStatus, JoiningDocument};

#[derive(Debug, Parser)]
#[command(name = "hrctl")]
#[command(version, about = "Gate passes and employee joining over the HR sheet endpoint")]
pub struct Cli {
    /// Sheet endpoint URL; overrides HR_SHEET_ENDPOINT
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Name recorded in audit events
    #[arg(long, global = true, env = "HR_OPERATOR")]
    pub operator: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    /// Log filter, e.g. `debug` or `sheet_client=trace`
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log as JSON lines
    #[arg(long, global = true, default_value_t = false)]
    pub log_json: bool,

    /// Also write daily rotating log files here
    #[arg(long, global = true, env = "HR_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Gate pass requests and approvals
    GatePass {
        #[command(subcommand)]
        command: GatePassCommand,
    },
    /// Employee joining
    Joining {
        #[command(subcommand)]
        command: JoiningCommand,
    },
    /// List HOD names
    Hods,
    /// Email an employee's uploaded documents
    Share {
        #[arg(long)]
        employee_id: String,
        #[arg(long)]
        to: String,
        #[arg(long, default_value = "")]
        message: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum GatePassCommand {
    /// Show requests, grouped by status
    List {
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },
    /// Approve a pending request
    Approve { serial_no: String },
    /// Reject a pending request
    Reject { serial_no: String },
    /// Raise a request for an employee
    Request {
        #[arg(long)]
        employee: String,
        /// JSON file with visit_place, visit_reason, departure_time, arrival_time, hod_name
        #[arg(long)]
        form: PathBuf,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Show an employee's remaining allowance
    Quota {
        #[arg(long)]
        employee: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum JoiningCommand {
    /// Candidates ready to join
    Queue,
    /// Onboard a candidate from the queue
    Submit {
        enquiry_no: String,
        /// JSON file with the joining form fields
        #[arg(long)]
        form: PathBuf,
        /// Document to upload, as `<kind>=<path>`; kinds: aadhar, pan, photo, passbook, qualification
        #[arg(long = "doc", value_parser = parse_document)]
        documents: Vec<(JoiningDocument, PathBuf)>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Pending,
    Approved,
    Rejected,
}

impl From<StatusArg> for GatePassStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Pending => Self::Pending,
            StatusArg::Approved => Self::Approved,
            StatusArg::Rejected => Self::Rejected,
        }
    }
}

fn parse_document(value: &str) -> Result<(JoiningDocument, PathBuf), String> {
    let (kind, path) = value
        .split_once('=')
        .ok_or_else(|| format!("expected <kind>=<path>, got '{value}'"))?;
    if path.trim().is_empty() {
        return Err(format!("missing path for '{kind}'"));
    }
    Ok((kind.parse()?, PathBuf::from(path.trim())))
}
