//! File uploads
//!
//! Files travel to the endpoint as base64 data URLs, one request per file.
//! A submission with several files uploads them concurrently and only
//! proceeds once every upload has settled.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use futures::future::join_all;

use crate::config::UploadFailurePolicy;
use crate::http::SheetApi;
use crate::{ClientError, ClientResult};

/// A file ready to be sent to the endpoint
#[derive(Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileUpload")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl FileUpload {
    /// MIME type is guessed from the file name
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            file_name,
            mime_type,
            bytes,
        }
    }

    pub async fn from_path(path: impl AsRef<Path>) -> ClientResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| ClientError::Validation(format!("'{}' is not a file", path.display())))?;
        Ok(Self::new(file_name, bytes))
    }

    /// Keep the extension, replace the stem
    pub fn renamed(mut self, stem: &str) -> Self {
        self.file_name = match Path::new(&self.file_name).extension() {
            Some(ext) => format!("{stem}.{}", ext.to_string_lossy()),
            None => stem.to_string(),
        };
        self
    }

    /// `data:<mime>;base64,<payload>`
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }
}

/// Upload every file concurrently and pair each key with its link.
///
/// Under [`UploadFailurePolicy::DegradeToEmpty`] a failed file yields an empty
/// link; under [`UploadFailurePolicy::Abort`] the first failure is returned
/// once all uploads have finished.
pub async fn upload_all<K>(
    api: &dyn SheetApi,
    files: Vec<(K, FileUpload)>,
    folder_id: &str,
    policy: UploadFailurePolicy,
) -> ClientResult<Vec<(K, String)>> {
    let (keys, files): (Vec<K>, Vec<FileUpload>) = files.into_iter().unzip();
    let results = join_all(files.iter().map(|file| api.upload_file(file, folder_id))).await;

    let mut links = Vec::with_capacity(keys.len());
    let mut first_failure = None;
    for ((key, file), result) in keys.into_iter().zip(&files).zip(results) {
        match result {
            Ok(url) => {
                tracing::debug!(file = %file.file_name, "Uploaded file");
                links.push((key, url));
            }
            Err(e) => {
                tracing::warn!(file = %file.file_name, error = %e, ?policy, "File upload failed");
                if first_failure.is_none() {
                    first_failure = Some(ClientError::Upload {
                        file_name: file.file_name.clone(),
                        message: e.to_string(),
                    });
                }
                links.push((key, String::new()));
            }
        }
    }

    match (policy, first_failure) {
        (UploadFailurePolicy::Abort, Some(err)) => Err(err),
        _ => Ok(links),
    }
}
