//! Sheet endpoint transport
//!
//! The endpoint is a deployed spreadsheet script: reads are
//! `GET ?sheet=<name>&action=fetch`, every write is a urlencoded `POST`
//! carrying an `action` field. All of them answer with a
//! [`SheetResponse`] envelope.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::{RawRow, SheetResponse};

use crate::share::EmailShare;
use crate::upload::FileUpload;
use crate::{ClientConfig, ClientError, ClientResult};

type FormFields = Vec<(&'static str, String)>;

/// Operations the sheet endpoint offers
#[async_trait]
pub trait SheetApi: Send + Sync {
    /// Every row of `sheet`, header rows included
    async fn fetch(&self, sheet: &str) -> ClientResult<Vec<RawRow>>;

    /// Append one row
    async fn insert(&self, sheet: &str, row: &[String]) -> ClientResult<()>;

    /// Overwrite one cell; `row` and `column` are 1-based
    async fn update_cell(
        &self,
        sheet: &str,
        row: usize,
        column: usize,
        value: &str,
    ) -> ClientResult<()>;

    /// Store a file in `folder_id` and return its shareable link
    async fn upload_file(&self, file: &FileUpload, folder_id: &str) -> ClientResult<String>;

    /// Ask the endpoint to email document links
    async fn share_via_email(&self, share: &EmailShare) -> ClientResult<()>;
}

/// [`SheetApi`] over HTTP
#[derive(Debug, Clone)]
pub struct NetworkSheetClient {
    client: Client,
    endpoint_url: String,
}

impl NetworkSheetClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        if config.endpoint_url.trim().is_empty() {
            return Err(ClientError::Config("endpoint URL is empty".into()));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            endpoint_url: config.endpoint_url.trim().to_string(),
        })
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> ClientResult<SheetResponse<T>> {
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        let envelope: SheetResponse<T> = serde_json::from_str(&text)
            .map_err(|e| ClientError::InvalidResponse(format!("{e}: {}", preview(&text))))?;
        envelope.into_result().map_err(ClientError::Endpoint)
    }

    async fn post<T: DeserializeOwned>(&self, form: FormFields) -> ClientResult<SheetResponse<T>> {
        let action = form
            .iter()
            .find(|(key, _)| *key == "action")
            .map(|(_, v)| v.clone())
            .unwrap_or_default();
        tracing::debug!(%action, "POST sheet endpoint");
        let response = self
            .client
            .post(&self.endpoint_url)
            .form(&form)
            .send()
            .await?;
        Self::handle_response(response).await
    }
}

#[async_trait]
impl SheetApi for NetworkSheetClient {
    async fn fetch(&self, sheet: &str) -> ClientResult<Vec<RawRow>> {
        tracing::debug!(sheet, "GET sheet endpoint");
        let response = self
            .client
            .get(&self.endpoint_url)
            .query(&[("sheet", sheet), ("action", "fetch")])
            .send()
            .await?;
        let envelope: SheetResponse<Vec<RawRow>> = Self::handle_response(response).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    async fn insert(&self, sheet: &str, row: &[String]) -> ClientResult<()> {
        self.post::<serde_json::Value>(insert_form(sheet, row)?).await?;
        Ok(())
    }

    async fn update_cell(
        &self,
        sheet: &str,
        row: usize,
        column: usize,
        value: &str,
    ) -> ClientResult<()> {
        self.post::<serde_json::Value>(update_cell_form(sheet, row, column, value)?)
            .await?;
        Ok(())
    }

    async fn upload_file(&self, file: &FileUpload, folder_id: &str) -> ClientResult<String> {
        let envelope = self
            .post::<serde_json::Value>(upload_form(file, folder_id))
            .await?;
        envelope
            .file_url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| ClientError::InvalidResponse("upload response has no fileUrl".into()))
    }

    async fn share_via_email(&self, share: &EmailShare) -> ClientResult<()> {
        self.post::<serde_json::Value>(share_form(share)?).await?;
        Ok(())
    }
}

fn insert_form(sheet: &str, row: &[String]) -> ClientResult<FormFields> {
    Ok(vec![
        ("action", "insert".to_string()),
        ("sheetName", sheet.to_string()),
        ("rowData", serde_json::to_string(row)?),
    ])
}

fn update_cell_form(
    sheet: &str,
    row: usize,
    column: usize,
    value: &str,
) -> ClientResult<FormFields> {
    if row == 0 || column == 0 {
        return Err(ClientError::Validation(format!(
            "cell ({row}, {column}) is not a 1-based position"
        )));
    }
    Ok(vec![
        ("action", "updateCell".to_string()),
        ("sheetName", sheet.to_string()),
        ("rowIndex", row.to_string()),
        ("columnIndex", column.to_string()),
        ("value", value.to_string()),
    ])
}

fn upload_form(file: &FileUpload, folder_id: &str) -> FormFields {
    vec![
        ("action", "uploadFile".to_string()),
        ("base64Data", file.data_url()),
        ("fileName", file.file_name.clone()),
        ("mimeType", file.mime_type.clone()),
        ("folderId", folder_id.to_string()),
    ]
}

fn share_form(share: &EmailShare) -> ClientResult<FormFields> {
    Ok(vec![
        ("action", "shareViaEmail".to_string()),
        ("recipientEmail", share.recipient_email.clone()),
        ("subject", share.subject.clone()),
        ("message", share.message.clone()),
        ("documents", serde_json::to_string(&share.documents)?),
    ])
}

fn preview(body: &str) -> String {
    const LIMIT: usize = 120;
    match body.char_indices().nth(LIMIT) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
