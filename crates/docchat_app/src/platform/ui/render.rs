use std::io;

use docchat_core::{AnalysisButtonView, AppViewModel, LibraryView, Message, MessageId, Role};

use super::flatten::markup_to_text;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptLine {
    pub id: MessageId,
    pub speaker: &'static str,
    pub text: String,
    pub footer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCommand {
    SyncTranscript(Vec<TranscriptLine>),
    SetUploadControl { label: &'static str, enabled: bool },
    SetLibrary(Option<LibraryView>),
    SetQuickAnalysis(Option<Vec<AnalysisButtonView>>),
}

/// The surface a session is drawn on. Implementations decide how much of
/// each command actually needs redrawing.
pub trait ViewPort {
    fn apply(&mut self, commands: Vec<ViewCommand>) -> io::Result<()>;
    fn notice(&mut self, text: &str) -> io::Result<()>;
}

pub fn render(view: &AppViewModel) -> Vec<ViewCommand> {
    vec![
        ViewCommand::SyncTranscript(view.transcript.iter().map(transcript_line).collect()),
        ViewCommand::SetUploadControl {
            label: view.upload.label,
            enabled: view.upload.enabled,
        },
        ViewCommand::SetLibrary(view.library.clone()),
        ViewCommand::SetQuickAnalysis(view.quick_analysis.clone()),
    ]
}

fn transcript_line(message: &Message) -> TranscriptLine {
    let speaker = match message.role() {
        Role::User => "You",
        Role::Assistant => "Assistant",
        Role::System => "System",
    };
    let text = match message.role() {
        Role::Assistant if !message.is_loading_placeholder() => markup_to_text(message.content()),
        _ => message.content().to_string(),
    };
    TranscriptLine {
        id: message.id(),
        speaker,
        text,
        footer: reply_footer(message),
    }
}

fn reply_footer(message: &Message) -> Option<String> {
    let chunks = match message.retrieved_chunks() {
        0 => None,
        1 => Some("1 chunk retrieved".to_string()),
        n => Some(format!("{n} chunks retrieved")),
    };
    match (message.sources(), chunks) {
        ([], None) => None,
        ([], Some(chunks)) => Some(chunks),
        (sources, None) => Some(format!("Sources: {}", sources.join(", "))),
        (sources, Some(chunks)) => Some(format!("Sources: {} ({chunks})", sources.join(", "))),
    }
}
