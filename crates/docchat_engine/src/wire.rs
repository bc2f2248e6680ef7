//! JSON bodies exchanged with the backend.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub retrieved_chunks: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Success,
    Error,
    #[serde(other)]
    Unknown,
}

/// One entry per submitted file. Order is not guaranteed to match the request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadResponse {
    pub filename: String,
    pub status: UploadStatus,
    #[serde(default)]
    pub chunks: Option<u64>,
    #[serde(default)]
    pub content_length: Option<u64>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SummaryResponse {
    pub total_chunks: u64,
    #[serde(default)]
    pub unique_files: Vec<String>,
}
