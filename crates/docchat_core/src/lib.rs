//! Docchat core: pure session state machine, transcript, and the reply renderer.
mod catalog;
mod effect;
pub mod markup;
mod message;
mod msg;
mod state;
mod summary;
mod transcript;
mod update;
mod view_model;

pub use catalog::{AnalysisCatalog, AnalysisEntry};
pub use effect::Effect;
pub use markup::render;
pub use message::{Message, MessageId, Role, WORKING_CAPTION};
pub use msg::{ChatReply, Msg, RequestFailure};
pub use state::{AppState, ChatState, UploadState, UPLOAD_BUSY_LABEL, UPLOAD_LABEL};
pub use summary::{
    count_successes, upload_success_message, DocumentSummary, UploadResult, UploadStatus,
};
pub use transcript::Transcript;
pub use update::{update, CHAT_FAILURE_TEXT, CLEAR_FAILURE_TEXT, UPLOAD_FAILURE_TEXT};
pub use view_model::{AnalysisButtonView, AppViewModel, LibraryView, UploadControlView};
