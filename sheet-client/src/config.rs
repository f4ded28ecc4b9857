//! Client configuration

use std::str::FromStr;

use shared::models::DEFAULT_HOD_NAMES;
use shared::row::HeaderCheck;
use shared::rules::QuotaPolicy;

use crate::{ClientError, ClientResult};

/// What to do when one of several concurrent uploads fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadFailurePolicy {
    /// Store an empty link for the failed file and carry on
    #[default]
    DegradeToEmpty,
    /// Fail the whole submission once every upload has settled
    Abort,
}

impl FromStr for UploadFailurePolicy {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "degrade" | "degrade_to_empty" => Ok(Self::DegradeToEmpty),
            "abort" => Ok(Self::Abort),
            other => Err(ClientError::Config(format!(
                "unknown upload failure policy '{other}' (expected 'degrade' or 'abort')"
            ))),
        }
    }
}

/// A sheet tab and the row holding its headers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRef {
    pub name: String,
    /// 0-based index of the header row; data starts on the next row
    pub header_row: usize,
}

impl SheetRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            header_row: 0,
        }
    }

    pub fn with_header_row(mut self, header_row: usize) -> Self {
        self.header_row = header_row;
        self
    }
}

/// Tabs the workflows read and write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetNames {
    pub gate_pass: SheetRef,
    /// Employee directory source
    pub roster: SheetRef,
    pub hod: SheetRef,
    pub enquiry: SheetRef,
    pub follow_up: SheetRef,
    /// New employees are appended here
    pub joining: SheetRef,
}

impl Default for SheetNames {
    fn default() -> Self {
        Self {
            gate_pass: SheetRef::new("Gate Pass"),
            roster: SheetRef::new("JOINING"),
            hod: SheetRef::new("Master"),
            enquiry: SheetRef::new("ENQUIRY"),
            follow_up: SheetRef::new("Follow - Up"),
            joining: SheetRef::new("JOINING"),
        }
    }
}

/// Client configuration for the sheet endpoint
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Deployed script URL
    pub endpoint_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    pub sheets: SheetNames,

    /// Drive folder uploads are stored in
    pub upload_folder_id: String,

    pub upload_failure_policy: UploadFailurePolicy,

    pub quota: QuotaPolicy,

    pub header_check: HeaderCheck,

    /// HOD names used when the reference sheet yields none
    pub hod_fallback: Vec<String>,

    /// Prefix of generated employee ids
    pub employee_id_prefix: String,

    /// Name recorded in audit events for admin actions
    pub operator: String,
}

impl ClientConfig {
    /// Create a configuration with defaults for everything but the endpoint
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            timeout: 30,
            sheets: SheetNames::default(),
            upload_folder_id: String::new(),
            upload_failure_policy: UploadFailurePolicy::default(),
            quota: QuotaPolicy::default(),
            header_check: HeaderCheck::default(),
            hod_fallback: DEFAULT_HOD_NAMES.iter().map(|s| s.to_string()).collect(),
            employee_id_prefix: "EMP".to_string(),
            operator: "hr-admin".to_string(),
        }
    }

    /// Load configuration from environment variables
    ///
    /// `HR_SHEET_ENDPOINT` is required; everything else falls back to the
    /// defaults of [`ClientConfig::new`].
    pub fn from_env() -> ClientResult<Self> {
        Self::from_env_with_endpoint(None)
    }

    /// Like [`ClientConfig::from_env`], with `endpoint` taking precedence
    /// over `HR_SHEET_ENDPOINT`
    pub fn from_env_with_endpoint(endpoint: Option<String>) -> ClientResult<Self> {
        let endpoint = endpoint
            .filter(|e| !e.trim().is_empty())
            .or_else(|| env_var("HR_SHEET_ENDPOINT"))
            .ok_or_else(|| ClientError::Config("HR_SHEET_ENDPOINT must be set".into()))?;
        let mut config = Self::new(endpoint);

        if let Some(timeout) = env_var("HR_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            config.timeout = timeout;
        }
        if let Some(folder) = env_var("HR_UPLOAD_FOLDER_ID") {
            config.upload_folder_id = folder;
        }
        if let Some(policy) = env_var("HR_UPLOAD_FAILURE_POLICY") {
            config.upload_failure_policy = policy.parse()?;
        }
        if let Some(limit) = env_var("HR_MONTHLY_LIMIT").and_then(|v| v.parse().ok()) {
            config.quota = QuotaPolicy::new(limit);
        }
        if let Some(strict) = env_var("HR_STRICT_HEADERS") {
            config.header_check = header_check_from_flag(&strict);
        }
        if let Some(prefix) = env_var("HR_EMPLOYEE_ID_PREFIX") {
            config.employee_id_prefix = prefix;
        }
        if let Some(operator) = env_var("HR_OPERATOR") {
            config.operator = operator;
        }
        if let Some(names) = env_var("HR_HOD_FALLBACK") {
            config.hod_fallback = names
                .split(',')
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(String::from)
                .collect();
        }

        let sheets = &mut config.sheets;
        for (key, sheet) in [
            ("GATE_PASS", &mut sheets.gate_pass),
            ("ROSTER", &mut sheets.roster),
            ("HOD", &mut sheets.hod),
            ("ENQUIRY", &mut sheets.enquiry),
            ("FOLLOW_UP", &mut sheets.follow_up),
            ("JOINING", &mut sheets.joining),
        ] {
            if let Some(name) = env_var(&format!("HR_SHEET_{key}")) {
                sheet.name = name;
            }
            if let Some(row) = env_var(&format!("HR_SHEET_{key}_HEADER_ROW")).and_then(|v| v.parse().ok()) {
                sheet.header_row = row;
            }
        }

        Ok(config)
    }

    /// Set the endpoint URL
    pub fn with_endpoint(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = endpoint_url.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    pub fn with_sheets(mut self, sheets: SheetNames) -> Self {
        self.sheets = sheets;
        self
    }

    pub fn with_upload_folder(mut self, folder_id: impl Into<String>) -> Self {
        self.upload_folder_id = folder_id.into();
        self
    }

    pub fn with_upload_failure_policy(mut self, policy: UploadFailurePolicy) -> Self {
        self.upload_failure_policy = policy;
        self
    }

    pub fn with_quota(mut self, quota: QuotaPolicy) -> Self {
        self.quota = quota;
        self
    }

    pub fn with_header_check(mut self, check: HeaderCheck) -> Self {
        self.header_check = check;
        self
    }

    pub fn with_hod_fallback(mut self, names: Vec<String>) -> Self {
        self.hod_fallback = names;
        self
    }

    pub fn with_operator(mut self, operator: impl Into<String>) -> Self {
        self.operator = operator.into();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080/exec")
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// `1`, `true` or `yes` in any case turn strict header checking on
fn header_check_from_flag(value: &str) -> HeaderCheck {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => HeaderCheck::Strict,
        _ => HeaderCheck::Lenient,
    }
}
