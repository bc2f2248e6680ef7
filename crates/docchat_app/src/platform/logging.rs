//! Platform logging initialization for docchat_app.
//!
//! The terminal doubles as the chat surface, so logs go to `./docchat.log`
//! unless configured otherwise.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

const LOG_FILE: &str = "./docchat.log";

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogDestination {
    /// Write to ./docchat.log in current directory.
    #[default]
    File,
    /// Write to the terminal, interleaved with the chat.
    Terminal,
    /// Write to both file and terminal.
    Both,
}

impl LogDestination {
    fn to_file(self) -> bool {
        matches!(self, LogDestination::File | LogDestination::Both)
    }

    fn to_terminal(self) -> bool {
        matches!(self, LogDestination::Terminal | LogDestination::Both)
    }
}

/// Installs the global logger. A log file that cannot be created is reported
/// on stderr and skipped.
pub fn initialize(destination: LogDestination, level: LevelFilter) {
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if destination.to_terminal() {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    if destination.to_file() {
        if let Some(file_logger) = file_logger(Path::new(LOG_FILE), level, config) {
            loggers.push(file_logger);
        }
    }

    if !loggers.is_empty() {
        let _ = CombinedLogger::init(loggers);
    }
}

fn file_logger(path: &Path, level: LevelFilter, config: Config) -> Option<Box<dyn SharedLogger>> {
    match File::create(path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {}: {}", path.display(), err);
            None
        }
    }
}
