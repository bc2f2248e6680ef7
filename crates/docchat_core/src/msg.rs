use std::path::PathBuf;

use crate::{DocumentSummary, MessageId, UploadResult};

/// Successful chat completion as seen by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub response: String,
    pub sources: Vec<String>,
    pub retrieved_chunks: u32,
}

/// A failed backend call. `detail` is for the log only and never reaches the
/// transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFailure {
    pub detail: String,
}

impl RequestFailure {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The front end is up; run the one-time startup probes.
    Started,
    /// User edited the chat input box.
    InputChanged(String),
    /// User submitted the current chat input.
    SendClicked,
    /// Engine completion for the chat call that owns `placeholder_id`.
    ChatCompleted {
        placeholder_id: MessageId,
        result: Result<ChatReply, RequestFailure>,
    },
    /// User picked files in the upload control.
    FilesChosen(Vec<PathBuf>),
    /// Engine completion for the upload call.
    UploadCompleted(Result<Vec<UploadResult>, RequestFailure>),
    /// User asked to reload the document library.
    RefreshSummaryRequested,
    /// Engine completion for a summary fetch.
    SummaryLoaded(Result<DocumentSummary, RequestFailure>),
    /// User clicked Clear Library.
    ClearClicked,
    /// Engine completion for the delete-all call.
    DocumentsCleared(Result<(), RequestFailure>),
    /// User picked a quick-analysis entry.
    AnalysisRequested(String),
    /// Render tick; the front end only redraws on ticks.
    Tick,
}
