use std::path::PathBuf;

use docchat_core::Msg;

use crate::platform::AppEvent;

pub const HELP_TEXT: &str = "\
Commands:
  /upload <path>...  upload documents (paths separated by spaces)
  /analyze <key>     run a quick-analysis query
  /summary           reload the document library
  /clear             delete all indexed documents and the conversation
  /help              show this help
  /quit              exit
Anything else is sent as a chat message.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command {0}; type /help for the list")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

/// Turns one line of terminal input into the events it stands for.
pub fn parse_line(line: &str) -> Result<Vec<AppEvent>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Vec::new());
    }
    let Some(command) = line.strip_prefix('/') else {
        return Ok(vec![
            Msg::InputChanged(line.to_string()).into(),
            Msg::SendClicked.into(),
        ]);
    };

    let mut words = command.split_whitespace();
    let name = words.next().unwrap_or_default();
    let event = match name {
        "upload" => {
            let files: Vec<PathBuf> = words.map(PathBuf::from).collect();
            if files.is_empty() {
                return Err(CommandError::Usage("/upload <path>..."));
            }
            Msg::FilesChosen(files).into()
        }
        "analyze" => match words.next() {
            Some(key) => Msg::AnalysisRequested(key.to_string()).into(),
            None => return Err(CommandError::Usage("/analyze <key>")),
        },
        "summary" | "library" => Msg::RefreshSummaryRequested.into(),
        "clear" => Msg::ClearClicked.into(),
        "help" => AppEvent::ShowHelp,
        "quit" | "exit" => AppEvent::Quit,
        other => return Err(CommandError::Unknown(format!("/{other}"))),
    };
    Ok(vec![event])
}
