use docchat_logging::{docchat_debug, docchat_info, docchat_warn};

use crate::markup::render;
use crate::message::{Message, MessageId};
use crate::msg::{ChatReply, RequestFailure};
use crate::state::{ChatState, UploadState};
use crate::summary::{count_successes, upload_success_message, UploadResult};
use crate::{AppState, Effect, Msg};

pub const CHAT_FAILURE_TEXT: &str =
    "Sorry, I encountered an error processing your request. Please try again.";
pub const UPLOAD_FAILURE_TEXT: &str = "Error uploading documents. Please try again.";
pub const CLEAR_FAILURE_TEXT: &str = "Error clearing documents. Please try again.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => vec![Effect::ProbeHealth, Effect::FetchSummary],
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::SendClicked => {
            let text = state.input().to_owned();
            submit_message(&mut state, &text)
        }
        Msg::AnalysisRequested(key) => {
            let query = state.catalog().lookup(&key).map(|entry| entry.query.clone());
            match query {
                Some(query) => submit_message(&mut state, &query),
                None => {
                    docchat_debug!("Ignoring unknown analysis key {:?}", key);
                    Vec::new()
                }
            }
        }
        Msg::ChatCompleted {
            placeholder_id,
            result,
        } => {
            complete_chat(&mut state, placeholder_id, result);
            Vec::new()
        }
        Msg::FilesChosen(files) => {
            if files.is_empty() || state.upload() == UploadState::Uploading {
                return (state, Vec::new());
            }
            docchat_info!("Uploading {} file(s)", files.len());
            state.begin_upload(files.clone());
            vec![Effect::UploadFiles { files }]
        }
        Msg::UploadCompleted(result) => complete_upload(&mut state, result),
        Msg::RefreshSummaryRequested => vec![Effect::FetchSummary],
        Msg::SummaryLoaded(Ok(summary)) => {
            state.replace_summary(summary);
            Vec::new()
        }
        Msg::SummaryLoaded(Err(failure)) => {
            docchat_warn!("Document summary fetch failed: {}", failure.detail);
            Vec::new()
        }
        Msg::ClearClicked => vec![Effect::ClearDocuments],
        Msg::DocumentsCleared(Ok(())) => {
            state.transcript_mut().clear();
            vec![Effect::FetchSummary]
        }
        Msg::DocumentsCleared(Err(failure)) => {
            docchat_warn!("Clearing documents failed: {}", failure.detail);
            let id = state.next_id();
            state.push_message(Message::system(id, CLEAR_FAILURE_TEXT));
            Vec::new()
        }
        Msg::Tick => Vec::new(),
    };

    (state, effects)
}

/// Accepts a chat message unless it is blank or a chat call is already in
/// flight. Dropped submissions leave no trace.
fn submit_message(state: &mut AppState, text: &str) -> Vec<Effect> {
    let text = text.trim();
    if text.is_empty() || state.chat() == ChatState::Sending {
        return Vec::new();
    }

    let user_id = state.next_id();
    state.push_message(Message::user(user_id, text));
    state.clear_input();
    state.set_chat(ChatState::Sending);
    let placeholder_id = state.next_id();
    state.push_message(Message::loading_placeholder(placeholder_id));

    vec![Effect::SendChat {
        placeholder_id,
        message: text.to_owned(),
    }]
}

fn complete_chat(
    state: &mut AppState,
    placeholder_id: MessageId,
    result: Result<ChatReply, RequestFailure>,
) {
    state.set_chat(ChatState::Idle);
    if !state.transcript().holds_placeholder(placeholder_id) {
        docchat_info!(
            "Dropping reply for placeholder {}: the conversation was cleared",
            placeholder_id
        );
        return;
    }

    let reply_id = state.next_id();
    let reply = match result {
        Ok(reply) => Message::assistant_reply(
            reply_id,
            render(&reply.response),
            reply.sources,
            reply.retrieved_chunks,
        ),
        Err(failure) => {
            docchat_warn!("Chat request failed: {}", failure.detail);
            Message::assistant(reply_id, CHAT_FAILURE_TEXT)
        }
    };

    if let Err(reply) = state.transcript_mut().replace_placeholder(placeholder_id, reply) {
        docchat_warn!(
            "Placeholder {} is no longer the last transcript entry; appending reply instead",
            placeholder_id
        );
        state.push_message(reply);
    }
}

fn complete_upload(
    state: &mut AppState,
    result: Result<Vec<UploadResult>, RequestFailure>,
) -> Vec<Effect> {
    let effects = match result {
        Ok(results) => {
            let success_count = count_successes(&results);
            docchat_info!(
                "Upload finished: {} of {} file(s) processed",
                success_count,
                results.len()
            );
            let id = state.next_id();
            state.push_message(Message::system(id, upload_success_message(success_count)));
            if success_count > 0 {
                state.show_quick_analysis();
            }
            vec![Effect::FetchSummary]
        }
        Err(failure) => {
            docchat_warn!("Upload failed: {}", failure.detail);
            let id = state.next_id();
            state.push_message(Message::system(id, UPLOAD_FAILURE_TEXT));
            Vec::new()
        }
    };
    state.end_upload();
    effects
}
