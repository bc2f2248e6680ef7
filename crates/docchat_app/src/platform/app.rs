use std::io::{self, BufRead};
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use docchat_core::{update, AppState, Effect, Msg};
use docchat_engine::{BackendSettings, EngineHandle};
use docchat_logging::{docchat_info, docchat_warn};

use super::config::{AppConfig, BACKEND_URL_ENV, CONFIG_FILENAME};
use super::effects::EffectRunner;
use super::ui::commands::{parse_line, HELP_TEXT};
use super::ui::render::{render, ViewPort};
use super::ui::terminal::TerminalViewPort;
use super::{logging, AppEvent};

const TICK_INTERVAL: Duration = Duration::from_millis(75);

pub fn run_app() -> anyhow::Result<()> {
    let (mut config, config_error) = match AppConfig::load(Path::new(CONFIG_FILENAME)) {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    config.apply_backend_override(std::env::var(BACKEND_URL_ENV).ok());

    logging::initialize(config.log_destination, config.level());
    if let Some(err) = config_error {
        docchat_warn!("Using default configuration: {}", err);
    }

    let settings = config.backend_settings().unwrap_or_else(|err| {
        docchat_warn!("{}; using the default backend", err);
        BackendSettings::default()
    });
    let engine = EngineHandle::new(settings).context("failed to start backend engine")?;

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(engine, event_tx.clone());

    // Background tick to throttle rendering.
    let tick_tx = event_tx.clone();
    thread::spawn(move || {
        while tick_tx.send(Msg::Tick.into()).is_ok() {
            thread::sleep(TICK_INTERVAL);
        }
    });

    let _ = event_tx.send(Msg::Started.into());
    spawn_input_reader(event_tx.clone());
    drop(event_tx);

    let mut port = TerminalViewPort::new(io::stdout());
    port.notice("Docchat ready. Type /help for commands.")?;

    let mut state = AppState::with_catalog(config.catalog());
    let mut outstanding = Outstanding::default();
    let mut input_closed = false;
    for event in event_rx {
        match event {
            AppEvent::Msg(msg) => {
                let is_tick = matches!(msg, Msg::Tick);
                outstanding.finished(&msg);
                let (next, effects) = update(state, msg);
                state = next;
                outstanding.started(&effects);
                runner.enqueue(effects);
                if is_tick && state.consume_dirty() {
                    port.apply(render(&state.view()))?;
                }
            }
            AppEvent::ShowHelp => port.notice(HELP_TEXT)?,
            AppEvent::Notice(text) => port.notice(&text)?,
            AppEvent::InputClosed => {
                docchat_info!(
                    "Input closed with {} backend call(s) outstanding",
                    outstanding.count()
                );
                input_closed = true;
            }
            AppEvent::Quit => break,
        }
        if input_closed && outstanding.is_empty() {
            if state.consume_dirty() {
                port.apply(render(&state.view()))?;
            }
            break;
        }
    }

    docchat_info!("Session ended");
    Ok(())
}

/// Reads stdin line by line. End of input is reported so the main loop can
/// exit once the calls already started have answered.
fn spawn_input_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            let events = parse_line(&line)
                .unwrap_or_else(|err| vec![AppEvent::Notice(err.to_string())]);
            for event in events {
                if event_tx.send(event).is_err() {
                    return;
                }
            }
        }
        let _ = event_tx.send(AppEvent::InputClosed);
    });
}

/// Backend calls whose completion message has not come back yet.
#[derive(Debug, Default)]
struct Outstanding(usize);

impl Outstanding {
    fn started(&mut self, effects: &[Effect]) {
        self.0 += effects
            .iter()
            .filter(|effect| !matches!(effect, Effect::ProbeHealth))
            .count();
    }

    fn finished(&mut self, msg: &Msg) {
        if matches!(
            msg,
            Msg::ChatCompleted { .. }
                | Msg::UploadCompleted(_)
                | Msg::SummaryLoaded(_)
                | Msg::DocumentsCleared(_)
        ) {
            self.0 = self.0.saturating_sub(1);
        }
    }

    fn count(&self) -> usize {
        self.0
    }

    fn is_empty(&self) -> bool {
        self.0 == 0
    }
}
