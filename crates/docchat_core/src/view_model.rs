use crate::Message;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub transcript: Vec<Message>,
    pub input: String,
    pub chat_busy: bool,
    pub upload: UploadControlView,
    /// `None` while the library panel is hidden.
    pub library: Option<LibraryView>,
    /// `None` while the quick-analysis surface is hidden.
    pub quick_analysis: Option<Vec<AnalysisButtonView>>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadControlView {
    pub label: &'static str,
    pub enabled: bool,
}

impl Default for UploadControlView {
    fn default() -> Self {
        Self {
            label: crate::state::UPLOAD_LABEL,
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryView {
    pub total_chunks: u64,
    pub files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisButtonView {
    pub key: String,
    pub label: String,
}
