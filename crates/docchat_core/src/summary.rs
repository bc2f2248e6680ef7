/// Backend view of indexed documents. Always replaced wholesale on refresh.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentSummary {
    pub total_chunks: u64,
    pub unique_files: Vec<String>,
}

impl DocumentSummary {
    /// Summary-dependent panels are shown only while something is indexed.
    pub fn has_documents(&self) -> bool {
        self.total_chunks > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    pub filename: String,
    pub status: UploadStatus,
}

pub fn count_successes(results: &[UploadResult]) -> usize {
    results
        .iter()
        .filter(|result| result.status == UploadStatus::Success)
        .count()
}

pub fn upload_success_message(success_count: usize) -> String {
    let noun = if success_count == 1 {
        "document"
    } else {
        "documents"
    };
    format!("Successfully processed {success_count} {noun}")
}
