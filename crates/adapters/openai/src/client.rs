//! Shared HTTP client for OpenAI-compatible endpoints.

use reqwest::{RequestBuilder, Response};

use crate::config::OpenAiConfig;
use crate::error::OpenAiError;

/// Thin wrapper over [`reqwest::Client`] that knows the API root and the
/// bearer token. Cheap to clone.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenAiClient {
    /// Build a client with the configured per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`OpenAiError::Http`] when the TLS backend cannot be
    /// initialised.
    pub fn new(config: &OpenAiConfig) -> Result<Self, OpenAiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Start a POST to `path` under the API root, authenticated when a key
    /// is configured.
    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        let request = self.http.post(self.url(path));
        if self.api_key.is_empty() {
            request
        } else {
            request.bearer_auth(&self.api_key)
        }
    }

    /// Send `request` and turn a non-success status into
    /// [`OpenAiError::Status`].
    pub(crate) async fn send(request: RequestBuilder) -> Result<Response, OpenAiError> {
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!(%status, "received response");
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(OpenAiError::Status {
            status: status.as_u16(),
            body,
        })
    }
}
