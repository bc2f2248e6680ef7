use std::path::PathBuf;

use crate::catalog::AnalysisCatalog;
use crate::message::{Message, MessageId};
use crate::summary::DocumentSummary;
use crate::transcript::Transcript;
use crate::view_model::{AnalysisButtonView, AppViewModel, LibraryView, UploadControlView};

pub const UPLOAD_LABEL: &str = "Upload Documents";
pub const UPLOAD_BUSY_LABEL: &str = "Processing...";

/// Chat single-flight flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatState {
    #[default]
    Idle,
    Sending,
}

/// Upload single-flight flag, tracked independently of [`ChatState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadState {
    #[default]
    Idle,
    Uploading,
}

/// Everything the session owns. Constructed once per UI instance; the
/// message loop threads it through [`crate::update`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    transcript: Transcript,
    input: String,
    chat: ChatState,
    upload: UploadState,
    selected_files: Vec<PathBuf>,
    summary: DocumentSummary,
    library_visible: bool,
    quick_analysis_visible: bool,
    catalog: AnalysisCatalog,
    next_message_id: MessageId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(catalog: AnalysisCatalog) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            transcript: self.transcript.messages().to_vec(),
            input: self.input.clone(),
            chat_busy: self.chat == ChatState::Sending,
            upload: UploadControlView {
                label: match self.upload {
                    UploadState::Idle => UPLOAD_LABEL,
                    UploadState::Uploading => UPLOAD_BUSY_LABEL,
                },
                enabled: self.upload == UploadState::Idle,
            },
            library: self.library_visible.then(|| LibraryView {
                total_chunks: self.summary.total_chunks,
                files: self.summary.unique_files.clone(),
            }),
            quick_analysis: self.quick_analysis_visible.then(|| {
                self.catalog
                    .entries()
                    .iter()
                    .map(|entry| AnalysisButtonView {
                        key: entry.key.clone(),
                        label: entry.label.clone(),
                    })
                    .collect()
            }),
            dirty: self.dirty,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn chat(&self) -> ChatState {
        self.chat
    }

    pub fn upload(&self) -> UploadState {
        self.upload
    }

    pub fn selected_files(&self) -> &[PathBuf] {
        &self.selected_files
    }

    pub fn summary(&self) -> &DocumentSummary {
        &self.summary
    }

    pub fn library_visible(&self) -> bool {
        self.library_visible
    }

    pub fn quick_analysis_visible(&self) -> bool {
        self.quick_analysis_visible
    }

    pub fn catalog(&self) -> &AnalysisCatalog {
        &self.catalog
    }

    /// Returns whether anything visible changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn next_id(&mut self) -> MessageId {
        self.next_message_id += 1;
        self.next_message_id
    }

    pub(crate) fn set_input(&mut self, text: String) {
        self.input = text;
    }

    pub(crate) fn clear_input(&mut self) {
        self.input.clear();
    }

    pub(crate) fn set_chat(&mut self, chat: ChatState) {
        self.chat = chat;
        self.mark_dirty();
    }

    pub(crate) fn begin_upload(&mut self, files: Vec<PathBuf>) {
        self.selected_files = files;
        self.upload = UploadState::Uploading;
        self.mark_dirty();
    }

    /// Restores the upload trigger and resets the file selection so the same
    /// files can be chosen again.
    pub(crate) fn end_upload(&mut self) {
        self.selected_files.clear();
        self.upload = UploadState::Idle;
        self.mark_dirty();
    }

    pub(crate) fn push_message(&mut self, message: Message) {
        self.transcript.push(message);
        self.mark_dirty();
    }

    pub(crate) fn transcript_mut(&mut self) -> &mut Transcript {
        self.mark_dirty();
        &mut self.transcript
    }

    pub(crate) fn show_quick_analysis(&mut self) {
        self.quick_analysis_visible = true;
        self.mark_dirty();
    }

    /// Replaces the cached summary and re-derives panel visibility from it.
    pub(crate) fn replace_summary(&mut self, summary: DocumentSummary) {
        let visible = summary.has_documents();
        self.summary = summary;
        self.library_visible = visible;
        self.quick_analysis_visible = visible;
        self.mark_dirty();
    }
}
