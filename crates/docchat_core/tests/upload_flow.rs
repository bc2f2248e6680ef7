use std::path::PathBuf;

use docchat_core::{
    update, AppState, Effect, Msg, RequestFailure, Role, UploadResult, UploadState, UploadStatus,
    UPLOAD_BUSY_LABEL, UPLOAD_FAILURE_TEXT, UPLOAD_LABEL,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    docchat_logging::initialize_for_tests();
}

fn files(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(PathBuf::from).collect()
}

fn result(filename: &str, status: UploadStatus) -> UploadResult {
    UploadResult {
        filename: filename.to_string(),
        status,
    }
}

fn last_system_text(state: &AppState) -> String {
    let last = state.transcript().last().expect("transcript entry");
    assert_eq!(last.role(), Role::System);
    last.content().to_string()
}

#[test]
fn choosing_files_starts_upload() {
    init_logging();
    let chosen = files(&["a.pdf", "b.docx"]);
    let (mut state, effects) = update(AppState::new(), Msg::FilesChosen(chosen.clone()));

    assert_eq!(effects, vec![Effect::UploadFiles { files: chosen.clone() }]);
    assert_eq!(state.upload(), UploadState::Uploading);
    assert_eq!(state.selected_files(), chosen.as_slice());
    let view = state.view();
    assert_eq!(view.upload.label, UPLOAD_BUSY_LABEL);
    assert!(!view.upload.enabled);
    assert!(state.consume_dirty());
}

#[test]
fn empty_selection_is_ignored() {
    init_logging();
    let (mut state, effects) = update(AppState::new(), Msg::FilesChosen(Vec::new()));

    assert!(effects.is_empty());
    assert_eq!(state.upload(), UploadState::Idle);
    assert!(!state.consume_dirty());
}

#[test]
fn second_upload_while_uploading_is_dropped() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::FilesChosen(files(&["a.pdf"])));
    let (state, effects) = update(state, Msg::FilesChosen(files(&["b.pdf"])));

    assert!(effects.is_empty());
    assert_eq!(state.selected_files(), files(&["a.pdf"]).as_slice());
}

#[test]
fn two_of_three_successes_reports_plural() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::FilesChosen(files(&["a.pdf", "b.pdf", "c.exe"])),
    );
    let (state, effects) = update(
        state,
        Msg::UploadCompleted(Ok(vec![
            result("c.exe", UploadStatus::Error),
            result("a.pdf", UploadStatus::Success),
            result("b.pdf", UploadStatus::Success),
        ])),
    );

    assert_eq!(last_system_text(&state), "Successfully processed 2 documents");
    assert_eq!(effects, vec![Effect::FetchSummary]);
    assert!(state.quick_analysis_visible());
}

#[test]
fn single_success_reports_singular() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::FilesChosen(files(&["a.pdf"])));
    let (state, _) = update(
        state,
        Msg::UploadCompleted(Ok(vec![result("a.pdf", UploadStatus::Success)])),
    );

    assert_eq!(last_system_text(&state), "Successfully processed 1 document");
}

#[test]
fn zero_successes_reports_plural_and_keeps_analysis_hidden() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::FilesChosen(files(&["a.exe"])));
    let (state, effects) = update(
        state,
        Msg::UploadCompleted(Ok(vec![result("a.exe", UploadStatus::Error)])),
    );

    assert_eq!(last_system_text(&state), "Successfully processed 0 documents");
    assert_eq!(effects, vec![Effect::FetchSummary]);
    assert!(!state.quick_analysis_visible());
}

#[test]
fn completion_restores_control_and_resets_selection() {
    init_logging();
    for outcome in [
        Ok(vec![result("a.pdf", UploadStatus::Success)]),
        Err(RequestFailure::new("network error")),
    ] {
        let (state, _) = update(AppState::new(), Msg::FilesChosen(files(&["a.pdf"])));
        let (state, _) = update(state, Msg::UploadCompleted(outcome));

        assert_eq!(state.upload(), UploadState::Idle);
        assert!(state.selected_files().is_empty());
        let view = state.view();
        assert_eq!(view.upload.label, UPLOAD_LABEL);
        assert!(view.upload.enabled);
    }
}

#[test]
fn failure_reports_error_without_summary_refresh() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::FilesChosen(files(&["a.pdf"])));
    let (state, effects) = update(
        state,
        Msg::UploadCompleted(Err(RequestFailure::new("http status 500"))),
    );

    assert!(effects.is_empty());
    assert_eq!(last_system_text(&state), UPLOAD_FAILURE_TEXT);
    assert_eq!(state.transcript().len(), 1);
}

#[test]
fn same_files_can_be_chosen_again_after_completion() {
    init_logging();
    let chosen = files(&["a.pdf"]);
    let (state, _) = update(AppState::new(), Msg::FilesChosen(chosen.clone()));
    let (state, _) = update(state, Msg::UploadCompleted(Ok(Vec::new())));
    let (_, effects) = update(state, Msg::FilesChosen(chosen.clone()));

    assert_eq!(effects, vec![Effect::UploadFiles { files: chosen }]);
}

#[test]
fn upload_and_chat_flags_are_independent() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::FilesChosen(files(&["a.pdf"])));
    let (state, _) = update(state, Msg::InputChanged("hello".to_string()));
    let (state, effects) = update(state, Msg::SendClicked);

    assert_eq!(effects.len(), 1);
    assert_eq!(state.upload(), UploadState::Uploading);
    assert!(state.view().chat_busy);
}
