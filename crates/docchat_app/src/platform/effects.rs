use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use docchat_core::{
    ChatReply, DocumentSummary, Effect, Msg, RequestFailure, UploadResult, UploadStatus,
};
use docchat_engine::{BackendError, EngineEvent, EngineHandle, UploadResponse};
use docchat_logging::{docchat_debug, docchat_info, docchat_warn};

use super::AppEvent;

const PUMP_INTERVAL: Duration = Duration::from_millis(50);

/// Executes effects on the engine and feeds completions back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, event_tx: mpsc::Sender<AppEvent>) -> Self {
        let runner = Self { engine };
        runner.spawn_event_loop(event_tx);
        runner
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ProbeHealth => self.engine.probe_health(),
                Effect::SendChat {
                    placeholder_id,
                    message,
                } => {
                    docchat_debug!(
                        "SendChat placeholder_id={} message_len={}",
                        placeholder_id,
                        message.len()
                    );
                    self.engine.chat(placeholder_id, message);
                }
                Effect::UploadFiles { files } => {
                    docchat_debug!("UploadFiles count={}", files.len());
                    self.engine.upload(files);
                }
                Effect::FetchSummary => self.engine.fetch_summary(),
                Effect::ClearDocuments => self.engine.clear_documents(),
            }
        }
    }

    fn spawn_event_loop(&self, event_tx: mpsc::Sender<AppEvent>) {
        let engine = self.engine.clone();
        thread::spawn(move || {
            pump_events(|timeout| engine.recv_timeout(timeout), &event_tx);
            docchat_debug!("Engine event pump stopped");
        });
    }
}

/// Forwards engine completions until either side of the pump goes away.
fn pump_events(
    mut next_event: impl FnMut(Duration) -> Result<EngineEvent, RecvTimeoutError>,
    event_tx: &mpsc::Sender<AppEvent>,
) {
    loop {
        let event = match next_event(PUMP_INTERVAL) {
            Ok(event) => event,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => return,
        };
        if let Some(msg) = map_event(event) {
            if event_tx.send(msg.into()).is_err() {
                return;
            }
        }
    }
}

/// Translates an engine completion into the session's vocabulary. Health
/// probes end here: they are logged and never reach the session.
pub(crate) fn map_event(event: EngineEvent) -> Option<Msg> {
    match event {
        EngineEvent::ChatCompleted { ticket, result } => Some(Msg::ChatCompleted {
            placeholder_id: ticket,
            result: result
                .map(|reply| ChatReply {
                    response: reply.response,
                    sources: reply.sources,
                    retrieved_chunks: reply.retrieved_chunks,
                })
                .map_err(failure),
        }),
        EngineEvent::UploadCompleted(result) => Some(Msg::UploadCompleted(
            result
                .map(|responses| responses.into_iter().map(map_upload).collect())
                .map_err(failure),
        )),
        EngineEvent::SummaryLoaded(result) => Some(Msg::SummaryLoaded(
            result
                .map(|summary| DocumentSummary {
                    total_chunks: summary.total_chunks,
                    unique_files: summary.unique_files,
                })
                .map_err(failure),
        )),
        EngineEvent::DocumentsCleared(result) => {
            Some(Msg::DocumentsCleared(result.map_err(failure)))
        }
        EngineEvent::HealthChecked(Ok(health)) => {
            docchat_info!("Backend health: {}", health);
            None
        }
        EngineEvent::HealthChecked(Err(err)) => {
            docchat_warn!("Backend health probe failed: {}", err);
            None
        }
    }
}

fn map_upload(response: UploadResponse) -> UploadResult {
    let status = match response.status {
        docchat_engine::UploadStatus::Success => UploadStatus::Success,
        docchat_engine::UploadStatus::Error | docchat_engine::UploadStatus::Unknown => {
            docchat_warn!(
                "Upload of {} was not indexed: {}",
                response.filename,
                response.error.as_deref().unwrap_or("no detail")
            );
            UploadStatus::Error
        }
    };
    UploadResult {
        filename: response.filename,
        status,
    }
}

fn failure(err: BackendError) -> RequestFailure {
    RequestFailure::new(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use docchat_engine::{ChatResponse, FailureKind, SummaryResponse};
    use pretty_assertions::assert_eq;

    fn backend_error(kind: FailureKind) -> BackendError {
        BackendError {
            kind,
            message: "boom".to_string(),
        }
    }

    #[test]
    fn chat_ticket_becomes_placeholder_id() {
        let msg = map_event(EngineEvent::ChatCompleted {
            ticket: 7,
            result: Ok(ChatResponse {
                response: "**yes**".to_string(),
                sources: vec!["lease.pdf".to_string()],
                retrieved_chunks: 3,
            }),
        });
        assert_eq!(
            msg,
            Some(Msg::ChatCompleted {
                placeholder_id: 7,
                result: Ok(ChatReply {
                    response: "**yes**".to_string(),
                    sources: vec!["lease.pdf".to_string()],
                    retrieved_chunks: 3,
                }),
            })
        );
    }

    #[test]
    fn backend_errors_keep_their_detail() {
        let msg = map_event(EngineEvent::DocumentsCleared(Err(backend_error(
            FailureKind::HttpStatus(500),
        ))));
        assert_eq!(
            msg,
            Some(Msg::DocumentsCleared(Err(RequestFailure::new(
                "http status 500: boom"
            ))))
        );
    }

    #[test]
    fn unknown_upload_status_counts_as_error() {
        let msg = map_event(EngineEvent::UploadCompleted(Ok(vec![
            UploadResponse {
                filename: "a.pdf".to_string(),
                status: docchat_engine::UploadStatus::Success,
                chunks: Some(2),
                content_length: None,
                error: None,
            },
            UploadResponse {
                filename: "b.bin".to_string(),
                status: docchat_engine::UploadStatus::Unknown,
                chunks: None,
                content_length: None,
                error: None,
            },
        ])));
        assert_eq!(
            msg,
            Some(Msg::UploadCompleted(Ok(vec![
                UploadResult {
                    filename: "a.pdf".to_string(),
                    status: UploadStatus::Success,
                },
                UploadResult {
                    filename: "b.bin".to_string(),
                    status: UploadStatus::Error,
                },
            ])))
        );
    }

    #[test]
    fn summary_is_carried_over() {
        let msg = map_event(EngineEvent::SummaryLoaded(Ok(SummaryResponse {
            total_chunks: 12,
            unique_files: vec!["nda.docx".to_string()],
        })));
        assert_eq!(
            msg,
            Some(Msg::SummaryLoaded(Ok(DocumentSummary {
                total_chunks: 12,
                unique_files: vec!["nda.docx".to_string()],
            })))
        );
    }

    #[test]
    fn pump_stops_when_engine_disconnects() {
        let mut script = vec![
            Err(RecvTimeoutError::Disconnected),
            Ok(EngineEvent::DocumentsCleared(Ok(()))),
            Err(RecvTimeoutError::Timeout),
            Ok(EngineEvent::HealthChecked(Ok(serde_json::json!({})))),
        ];
        let (tx, rx) = mpsc::channel();

        pump_events(|_| script.pop().expect("pump kept polling"), &tx);
        drop(tx);

        let forwarded: Vec<AppEvent> = rx.into_iter().collect();
        assert_eq!(forwarded, vec![Msg::DocumentsCleared(Ok(())).into()]);
        assert!(script.is_empty());
    }

    #[test]
    fn pump_stops_when_app_hangs_up() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let mut polls = 0;

        pump_events(
            |_| {
                polls += 1;
                Ok(EngineEvent::DocumentsCleared(Ok(())))
            },
            &tx,
        );

        assert_eq!(polls, 1);
    }

    #[test]
    fn health_results_stay_in_the_log() {
        assert_eq!(
            map_event(EngineEvent::HealthChecked(Ok(serde_json::json!({"status": "ok"})))),
            None
        );
    }
}
