//! Docchat engine: backend client and effect execution.
mod client;
mod engine;
mod types;
mod upload;
mod wire;

pub use client::{Backend, BackendSettings, ReqwestBackend, DEFAULT_BACKEND_URL};
pub use engine::EngineHandle;
pub use types::{BackendError, EngineError, EngineEvent, FailureKind, Ticket};
pub use upload::{load_upload_files, mime_for_path, UploadFile, UPLOAD_FIELD};
pub use wire::{ChatResponse, SummaryResponse, UploadResponse, UploadStatus};
