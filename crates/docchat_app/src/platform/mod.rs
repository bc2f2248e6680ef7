mod app;
mod config;
mod effects;
mod logging;
mod ui;

pub use app::run_app;

use docchat_core::Msg;

/// Everything the main loop reacts to: session messages from the input
/// reader, the engine pump and the ticker, plus front-end-only requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AppEvent {
    Msg(Msg),
    ShowHelp,
    Notice(String),
    /// Standard input reached its end.
    InputClosed,
    Quit,
}

impl From<Msg> for AppEvent {
    fn from(msg: Msg) -> Self {
        AppEvent::Msg(msg)
    }
}
