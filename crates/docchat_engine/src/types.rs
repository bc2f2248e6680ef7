use std::fmt;

use crate::wire::{ChatResponse, SummaryResponse, UploadResponse};

/// Correlates a chat completion with the request that started it.
pub type Ticket = u64;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    ChatCompleted {
        ticket: Ticket,
        result: Result<ChatResponse, BackendError>,
    },
    UploadCompleted(Result<Vec<UploadResponse>, BackendError>),
    SummaryLoaded(Result<SummaryResponse, BackendError>),
    DocumentsCleared(Result<(), BackendError>),
    HealthChecked(Result<serde_json::Value, BackendError>),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct BackendError {
    pub kind: FailureKind,
    pub message: String,
}

impl BackendError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    Decode,
    FileRead { path: String },
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Decode => write!(f, "undecodable response"),
            FailureKind::FileRead { path } => write!(f, "cannot read {path}"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error(transparent)]
    Backend(#[from] BackendError),
}
