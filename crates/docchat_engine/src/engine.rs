use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use docchat_logging::{docchat_debug, docchat_info};

use crate::client::{Backend, BackendSettings, ReqwestBackend};
use crate::upload::load_upload_files;
use crate::{EngineError, EngineEvent, Ticket};

enum EngineCommand {
    Chat { ticket: Ticket, message: String },
    Upload { files: Vec<PathBuf> },
    FetchSummary,
    ClearDocuments,
    ProbeHealth,
}

/// Runs backend calls on a dedicated tokio runtime and hands completions back
/// over a channel, in the order they finish.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: BackendSettings) -> Result<Self, EngineError> {
        docchat_info!("Engine targeting backend {}", settings.base_url);
        let backend = ReqwestBackend::new(settings)?;
        Self::with_backend(Arc::new(backend))
    }

    pub fn with_backend(backend: Arc<dyn Backend>) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Runtime::new()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let backend = backend.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let event = handle_command(backend.as_ref(), command).await;
                    let _ = event_tx.send(event);
                });
            }
            docchat_debug!("Engine command channel closed");
        });

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn chat(&self, ticket: Ticket, message: impl Into<String>) {
        self.send(EngineCommand::Chat {
            ticket,
            message: message.into(),
        });
    }

    pub fn upload(&self, files: Vec<PathBuf>) {
        self.send(EngineCommand::Upload { files });
    }

    pub fn fetch_summary(&self) {
        self.send(EngineCommand::FetchSummary);
    }

    pub fn clear_documents(&self) {
        self.send(EngineCommand::ClearDocuments);
    }

    pub fn probe_health(&self) {
        self.send(EngineCommand::ProbeHealth);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    /// Waits up to `timeout` for the next completion. A poisoned receiver
    /// reads as a disconnected one.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<EngineEvent, mpsc::RecvTimeoutError> {
        self.event_rx
            .lock()
            .map_err(|_| mpsc::RecvTimeoutError::Disconnected)?
            .recv_timeout(timeout)
    }

    fn send(&self, command: EngineCommand) {
        let _ = self.cmd_tx.send(command);
    }
}

async fn handle_command(backend: &dyn Backend, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::Chat { ticket, message } => EngineEvent::ChatCompleted {
            ticket,
            result: backend.chat(&message).await,
        },
        EngineCommand::Upload { files } => {
            let result = match load_upload_files(&files).await {
                Ok(files) => backend.upload(files).await,
                Err(err) => Err(err),
            };
            EngineEvent::UploadCompleted(result)
        }
        EngineCommand::FetchSummary => EngineEvent::SummaryLoaded(backend.summary().await),
        EngineCommand::ClearDocuments => EngineEvent::DocumentsCleared(backend.clear().await),
        EngineCommand::ProbeHealth => EngineEvent::HealthChecked(backend.health().await),
    }
}
