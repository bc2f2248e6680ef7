use std::time::Duration;

use reqwest::Response;
use serde::de::DeserializeOwned;
use url::Url;

use crate::upload::{build_form, UploadFile};
use crate::wire::{ChatRequest, ChatResponse, SummaryResponse, UploadResponse};
use crate::{BackendError, FailureKind};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000/";

#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub base_url: Url,
    pub connect_timeout: Duration,
    /// `None` lets a call wait for as long as the backend takes.
    pub request_timeout: Option<Duration>,
}

impl BackendSettings {
    /// Endpoint paths are joined onto `base_url`, so it always ends in `/`.
    pub fn new(mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            base_url,
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }

    pub fn parse(base_url: &str) -> Result<Self, BackendError> {
        let url = Url::parse(base_url)
            .map_err(|err| BackendError::new(FailureKind::InvalidUrl, err.to_string()))?;
        Ok(Self::new(url))
    }
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self::new(Url::parse(DEFAULT_BACKEND_URL).expect("default backend url"))
    }
}

/// The backend surface the session consumes.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    async fn chat(&self, message: &str) -> Result<ChatResponse, BackendError>;
    async fn upload(&self, files: Vec<UploadFile>) -> Result<Vec<UploadResponse>, BackendError>;
    async fn summary(&self) -> Result<SummaryResponse, BackendError>;
    async fn clear(&self) -> Result<(), BackendError>;
    async fn health(&self) -> Result<serde_json::Value, BackendError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    settings: BackendSettings,
    client: reqwest::Client,
}

impl ReqwestBackend {
    pub fn new(settings: BackendSettings) -> Result<Self, BackendError> {
        let client = build_client(&settings)?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &BackendSettings {
        &self.settings
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        self.settings
            .base_url
            .join(path)
            .map_err(|err| BackendError::new(FailureKind::InvalidUrl, err.to_string()))
    }
}

fn build_client(settings: &BackendSettings) -> Result<reqwest::Client, BackendError> {
    let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
    if let Some(timeout) = settings.request_timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|err| BackendError::new(FailureKind::Network, err.to_string()))
}

#[async_trait::async_trait]
impl Backend for ReqwestBackend {
    async fn chat(&self, message: &str) -> Result<ChatResponse, BackendError> {
        let response = self
            .client
            .post(self.endpoint("api/chat")?)
            .json(&ChatRequest { message })
            .send()
            .await
            .map_err(map_reqwest_error)?;
        decode_json(response).await
    }

    async fn upload(&self, files: Vec<UploadFile>) -> Result<Vec<UploadResponse>, BackendError> {
        let form = build_form(files)?;
        let response = self
            .client
            .post(self.endpoint("api/upload")?)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        decode_json(response).await
    }

    async fn summary(&self) -> Result<SummaryResponse, BackendError> {
        let response = self
            .client
            .get(self.endpoint("api/documents/summary")?)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        decode_json(response).await
    }

    async fn clear(&self) -> Result<(), BackendError> {
        let response = self
            .client
            .delete(self.endpoint("api/documents")?)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        ensure_success(&response)
    }

    async fn health(&self) -> Result<serde_json::Value, BackendError> {
        let response = self
            .client
            .get(self.endpoint("api/health")?)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        decode_json(response).await
    }
}

fn ensure_success(response: &Response) -> Result<(), BackendError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(BackendError::new(
            FailureKind::HttpStatus(status.as_u16()),
            status.to_string(),
        ))
    }
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    ensure_success(&response)?;
    response.json::<T>().await.map_err(map_reqwest_error)
}

fn map_reqwest_error(err: reqwest::Error) -> BackendError {
    if err.is_timeout() {
        return BackendError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return BackendError::new(FailureKind::Decode, err.to_string());
    }
    BackendError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let settings = BackendSettings::parse("http://example.com/prefix").unwrap();
        assert_eq!(settings.base_url.as_str(), "http://example.com/prefix/");
        let backend = ReqwestBackend::new(settings).unwrap();
        assert_eq!(
            backend.endpoint("api/chat").unwrap().as_str(),
            "http://example.com/prefix/api/chat"
        );
    }

    #[test]
    fn default_points_at_local_backend() {
        let settings = BackendSettings::default();
        assert_eq!(settings.base_url.as_str(), DEFAULT_BACKEND_URL);
        assert_eq!(settings.request_timeout, None);
    }

    #[test]
    fn rejects_unparseable_url() {
        let err = BackendSettings::parse("not a url").unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);
    }
}
