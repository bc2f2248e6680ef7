use std::path::{Path, PathBuf};

use reqwest::multipart::{Form, Part};

use crate::{BackendError, FailureKind};

/// Multipart field name the backend expects for every file.
pub const UPLOAD_FIELD: &str = "files";

const FALLBACK_MIME: &str = "application/octet-stream";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub filename: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

/// Maps the document types the backend indexes to their MIME types. Anything
/// else is sent as an opaque blob and left for the backend to reject.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("txt") => "text/plain",
        _ => FALLBACK_MIME,
    }
}

/// Reads every file up front. One unreadable file fails the whole batch.
pub async fn load_upload_files(paths: &[PathBuf]) -> Result<Vec<UploadFile>, BackendError> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let bytes = tokio::fs::read(path).await.map_err(|err| {
            BackendError::new(
                FailureKind::FileRead {
                    path: path.display().to_string(),
                },
                err.to_string(),
            )
        })?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        files.push(UploadFile {
            filename,
            mime: mime_for_path(path),
            bytes,
        });
    }
    Ok(files)
}

pub(crate) fn build_form(files: Vec<UploadFile>) -> Result<Form, BackendError> {
    let mut form = Form::new();
    for file in files {
        let part = Part::bytes(file.bytes)
            .file_name(file.filename)
            .mime_str(file.mime)
            .map_err(|err| BackendError::new(FailureKind::Network, err.to_string()))?;
        form = form.part(UPLOAD_FIELD, part);
    }
    Ok(form)
}
