//! HTTP client for the chat backend.

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::config::BackendConfig;
use crate::error::{Error, Result};

use super::types::{ContinueRequest, ContinueResponse, StartRequest, StartResponse};

/// The two endpoints a chat session talks to.
///
/// [`HttpBackend`] is the production implementation; tests substitute
/// scripted backends.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Call Session-Start.
    async fn start(&self) -> Result<StartResponse>;

    /// Call Message-Continue.
    async fn continue_turn(&self, request: &ContinueRequest) -> Result<ContinueResponse>;
}

/// [`ChatBackend`] over HTTP.
///
/// # Example
///
/// ```rust,no_run
/// use care_navigator_chat::api::{ChatBackend, HttpBackend};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = HttpBackend::new("http://localhost:8000")?;
/// let session = backend.start().await?;
/// println!("session {:?}", session.id);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpBackend {
    start_url: Url,
    continue_url: Url,
    http: reqwest::Client,
}

impl HttpBackend {
    /// Create a backend using the default endpoint paths.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Self::from_config(&BackendConfig {
            base_url: base_url.as_ref().to_string(),
            ..BackendConfig::default()
        })
    }

    /// Create a backend from configuration.
    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        Self::with_client(config, reqwest::Client::new())
    }

    /// Create a backend with a custom reqwest client.
    pub fn with_client(config: &BackendConfig, http: reqwest::Client) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        Ok(Self {
            start_url: base_url.join(&config.start_path)?,
            continue_url: base_url.join(&config.continue_path)?,
            http,
        })
    }

    /// Resolved Session-Start URL.
    pub fn start_url(&self) -> &Url {
        &self.start_url
    }

    /// Resolved Message-Continue URL.
    pub fn continue_url(&self) -> &Url {
        &self.continue_url
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            let body = response.bytes().await?;
            Ok(serde_json::from_slice(&body)?)
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".into());
            Err(Error::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn start(&self) -> Result<StartResponse> {
        debug!(name: "api.start.request", url = %self.start_url, "Starting chat session");
        let response = self
            .http
            .post(self.start_url.clone())
            .json(&StartRequest::default())
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn continue_turn(&self, request: &ContinueRequest) -> Result<ContinueResponse> {
        debug!(
            name: "api.continue.request",
            url = %self.continue_url,
            session_id = %request.session_id,
            "Sending chat message"
        );
        let response = self
            .http
            .post(self.continue_url.clone())
            .json(request)
            .send()
            .await?;
        Self::handle_response(response).await
    }
}
