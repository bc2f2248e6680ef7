use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use docchat_core::{AnalysisCatalog, AnalysisEntry};
use docchat_engine::{BackendError, BackendSettings, DEFAULT_BACKEND_URL};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use super::logging::LogDestination;

pub const CONFIG_FILENAME: &str = "docchat.ron";
pub const BACKEND_URL_ENV: &str = "DOCCHAT_BACKEND_URL";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("invalid backend url {url:?}: {source}")]
    BackendUrl {
        url: String,
        #[source]
        source: BackendError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntryConfig {
    pub key: String,
    pub label: String,
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend_url: String,
    pub log_destination: LogDestination,
    pub log_level: String,
    pub connect_timeout_secs: u64,
    /// `None` waits on the backend indefinitely.
    pub request_timeout_secs: Option<u64>,
    /// Replaces the built-in quick-analysis catalog when present.
    pub catalog: Option<Vec<CatalogEntryConfig>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            log_destination: LogDestination::default(),
            log_level: "info".to_string(),
            connect_timeout_secs: 10,
            request_timeout_secs: None,
            catalog: None,
        }
    }
}

impl AppConfig {
    pub fn from_ron(path: &Path, text: &str) -> Result<Self, ConfigError> {
        ron::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// A missing file is not an error; it just means defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_ron(path, &text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn apply_backend_override(&mut self, value: Option<String>) {
        if let Some(url) = value.filter(|url| !url.trim().is_empty()) {
            self.backend_url = url.trim().to_string();
        }
    }

    pub fn level(&self) -> LevelFilter {
        docchat_logging::parse_level(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    pub fn backend_settings(&self) -> Result<BackendSettings, ConfigError> {
        let mut settings =
            BackendSettings::parse(&self.backend_url).map_err(|source| ConfigError::BackendUrl {
                url: self.backend_url.clone(),
                source,
            })?;
        settings.connect_timeout = Duration::from_secs(self.connect_timeout_secs);
        settings.request_timeout = self.request_timeout_secs.map(Duration::from_secs);
        Ok(settings)
    }

    pub fn catalog(&self) -> AnalysisCatalog {
        match &self.catalog {
            Some(entries) => AnalysisCatalog::new(
                entries
                    .iter()
                    .map(|entry| AnalysisEntry::new(&entry.key, &entry.label, &entry.query)),
            ),
            None => AnalysisCatalog::default(),
        }
    }
}
