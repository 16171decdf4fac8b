//! Upload intake: validates a multipart upload and stages it on disk for the
//! duration of one extraction.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;
use crate::extraction::document::{extract_file, DocumentFormat};

/// Multipart field carrying the resume.
pub const FILE_FIELD: &str = "file";

/// A validated upload, not yet written anywhere.
#[derive(Debug)]
pub struct Upload {
    pub filename: String,
    pub format: DocumentFormat,
    pub bytes: Bytes,
}

/// Checks extension and size before any extraction work happens.
pub fn validate_upload(filename: &str, size: usize, limit: usize) -> Result<DocumentFormat, AppError> {
    if filename.trim().is_empty() {
        return Err(AppError::Validation("No selected file".to_string()));
    }
    let format = DocumentFormat::from_filename(filename)?;
    if size > limit {
        return Err(AppError::PayloadTooLarge { limit });
    }
    if size == 0 {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }
    Ok(format)
}

/// Pulls the `file` field out of the form and validates it. Other fields are ignored.
pub async fn read_upload(multipart: &mut Multipart, limit: usize) -> Result<Upload, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(|e| multipart_error(e, limit))?;
        let format = validate_upload(&filename, bytes.len(), limit)?;
        debug!(%filename, size = bytes.len(), %format, "upload accepted");
        return Ok(Upload {
            filename,
            format,
            bytes,
        });
    }
    Err(AppError::Validation("No file part".to_string()))
}

fn multipart_error(err: MultipartError, limit: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge { limit }
    } else {
        AppError::Validation(format!("Malformed upload: {}", err.body_text()))
    }
}

/// Stages the upload in `upload_dir`, extracts its text on the blocking pool,
/// and removes the staged file whether or not extraction succeeds.
pub async fn extract_upload(upload: Upload, upload_dir: &Path) -> Result<String, AppError> {
    let Upload { format, bytes, .. } = upload;
    let upload_dir = upload_dir.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<String, AppError> {
        let mut staged = tempfile::Builder::new()
            .prefix("resume-")
            .suffix(&format!(".{}", format.extension()))
            .tempfile_in(&upload_dir)
            .with_context(|| format!("failed to stage upload in {}", upload_dir.display()))?;
        staged
            .write_all(&bytes)
            .and_then(|_| staged.flush())
            .context("failed to write staged upload")?;
        drop(bytes);

        // `staged` is removed on drop, on the error path as well.
        let text = extract_file(staged.path(), format)?;
        Ok(text)
    })
    .await
    .map_err(|e| AppError::CorruptDocument(format!("extraction aborted: {e}")))?
}
