use std::sync::Once;

use docchat_core::{
    update, AppState, ChatReply, ChatState, Effect, MessageId, Msg, RequestFailure, Role,
    CHAT_FAILURE_TEXT, WORKING_CAPTION,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(docchat_logging::initialize_for_tests);
}

fn send(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    update(state, Msg::SendClicked)
}

fn placeholder_of(effects: &[Effect]) -> MessageId {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::SendChat { placeholder_id, .. } => Some(*placeholder_id),
            _ => None,
        })
        .expect("send effect")
}

fn reply(text: &str) -> ChatReply {
    ChatReply {
        response: text.to_string(),
        sources: vec!["lease.pdf".to_string()],
        retrieved_chunks: 4,
    }
}

#[test]
fn send_appends_user_and_placeholder() {
    init_logging();
    let (mut state, effects) = send(AppState::new(), "  What is the term?  ");

    let messages = state.transcript().messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role(), Role::User);
    assert_eq!(messages[0].content(), "What is the term?");
    assert!(messages[1].is_loading_placeholder());
    assert_eq!(messages[1].role(), Role::Assistant);
    assert_eq!(messages[1].content(), WORKING_CAPTION);
    assert!(messages[1].sources().is_empty());
    let placeholder_id = messages[1].id();

    assert_eq!(state.input(), "");
    assert_eq!(state.chat(), ChatState::Sending);
    assert!(state.view().chat_busy);
    assert!(state.consume_dirty());
    assert_eq!(
        effects,
        vec![Effect::SendChat {
            placeholder_id,
            message: "What is the term?".to_string(),
        }]
    );
}

#[test]
fn blank_input_is_dropped() {
    init_logging();
    let (mut state, effects) = send(AppState::new(), "   \n\t ");

    assert!(effects.is_empty());
    assert!(state.transcript().is_empty());
    assert_eq!(state.chat(), ChatState::Idle);
    assert!(!state.consume_dirty());
}

#[test]
fn second_send_while_sending_is_dropped() {
    init_logging();
    let (mut state, _) = send(AppState::new(), "first");
    assert!(state.consume_dirty());
    let (mut state, effects) = send(state, "second");

    assert!(effects.is_empty());
    assert_eq!(state.transcript().len(), 2);
    assert_eq!(state.chat(), ChatState::Sending);
    // The dropped text stays in the input box.
    assert_eq!(state.input(), "second");
    assert!(!state.consume_dirty());
}

#[test]
fn success_replaces_placeholder_with_rendered_reply() {
    init_logging();
    let (state, effects) = send(AppState::new(), "Summarize");
    let placeholder_id = placeholder_of(&effects);

    let (state, effects) = update(
        state,
        Msg::ChatCompleted {
            placeholder_id,
            result: Ok(reply("# Summary\n**Term:** two years")),
        },
    );

    assert!(effects.is_empty());
    let messages = state.transcript().messages();
    assert_eq!(messages.len(), 2);
    let last = &messages[1];
    assert!(!last.is_loading_placeholder());
    assert_eq!(last.role(), Role::Assistant);
    assert_eq!(
        last.content(),
        "<h1>Summary</h1><strong>Term:</strong> two years"
    );
    assert_eq!(last.sources().to_vec(), vec!["lease.pdf".to_string()]);
    assert_eq!(last.retrieved_chunks(), 4);
    assert_eq!(state.chat(), ChatState::Idle);
}

#[test]
fn failure_replaces_placeholder_with_plain_error() {
    init_logging();
    let (state, effects) = send(AppState::new(), "Summarize");
    let placeholder_id = placeholder_of(&effects);

    let (state, _) = update(
        state,
        Msg::ChatCompleted {
            placeholder_id,
            result: Err(RequestFailure::new("http status 500")),
        },
    );

    let messages = state.transcript().messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].content(), CHAT_FAILURE_TEXT);
    assert!(!messages[1].is_loading_placeholder());
    assert!(messages.iter().all(|m| !m.is_loading_placeholder()));
    assert_eq!(state.chat(), ChatState::Idle);
}

#[test]
fn send_is_accepted_again_after_completion() {
    init_logging();
    let (state, effects) = send(AppState::new(), "one");
    let placeholder_id = placeholder_of(&effects);
    let (state, _) = update(
        state,
        Msg::ChatCompleted {
            placeholder_id,
            result: Err(RequestFailure::new("network error")),
        },
    );

    let (state, effects) = send(state, "two");
    assert_eq!(effects.len(), 1);
    assert_eq!(state.transcript().len(), 4);
}

#[test]
fn interleaved_entry_keeps_placeholder_and_appends_reply() {
    init_logging();
    let (state, effects) = send(AppState::new(), "question");
    let placeholder_id = placeholder_of(&effects);

    // An upload finishes while the chat call is still outstanding.
    let (state, _) = update(state, Msg::FilesChosen(vec!["a.pdf".into()]));
    let (state, _) = update(state, Msg::UploadCompleted(Ok(Vec::new())));
    assert_eq!(state.transcript().len(), 3);

    let (state, _) = update(
        state,
        Msg::ChatCompleted {
            placeholder_id,
            result: Ok(reply("answer")),
        },
    );

    let messages = state.transcript().messages();
    assert_eq!(messages.len(), 4);
    assert!(messages[1].is_loading_placeholder());
    assert_eq!(messages[2].role(), Role::System);
    assert_eq!(messages[3].content(), "answer");
    assert_eq!(state.chat(), ChatState::Idle);
}

#[test]
fn reply_after_clear_is_dropped() {
    init_logging();
    let (state, effects) = send(AppState::new(), "question");
    let placeholder_id = placeholder_of(&effects);

    let (state, _) = update(state, Msg::ClearClicked);
    let (mut state, _) = update(state, Msg::DocumentsCleared(Ok(())));
    assert!(state.transcript().is_empty());
    state.consume_dirty();

    let (mut state, effects) = update(
        state,
        Msg::ChatCompleted {
            placeholder_id,
            result: Ok(reply("stale answer")),
        },
    );

    assert!(effects.is_empty());
    assert!(state.transcript().is_empty());
    assert_eq!(state.chat(), ChatState::Idle);
    assert!(state.consume_dirty());

    let (state, effects) = send(state, "fresh question");
    assert_eq!(effects.len(), 1);
    assert_eq!(state.transcript().len(), 2);
}
