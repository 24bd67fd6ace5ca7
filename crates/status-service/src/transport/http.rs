//! HTTP transport for status updates
//!
//! Form-encoded POSTs with basic auth, the way the chat server's REST API
//! expects them.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use status_common::{ErrorResponse, ServerConfig};
use status_core::{PostRequest, StatusTransport, TransportError, TransportResult};
use std::time::Duration;

/// Status transport backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpStatusTransport {
    client: Client,
    base_url: String,
    email: String,
    api_key: String,
}

impl HttpStatusTransport {
    /// Build a transport with its own client
    ///
    /// # Errors
    /// Returns `TransportError::Network` if the client cannot be constructed
    pub fn from_config(config: &ServerConfig) -> TransportResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("user-status/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(Self::with_client(
            client,
            config.base_url(),
            &config.email,
            &config.api_key,
        ))
    }

    /// Wrap an existing client
    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        email: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            email: email.into(),
            api_key: api_key.into(),
        }
    }

    /// Full URL for a server path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send_once(&self, request: &PostRequest) -> TransportResult<()> {
        let response = self
            .client
            .post(self.url(request.path))
            .basic_auth(&self.email, Some(&self.api_key))
            .form(&request.data)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(status_error(status, &body))
    }
}

#[async_trait]
impl StatusTransport for HttpStatusTransport {
    async fn post(&self, request: PostRequest) -> TransportResult<()> {
        let result = match self.send_once(&request).await {
            Err(e) if request.idempotent && e.is_retryable() => {
                tracing::warn!(path = request.path, error = %e, "Retrying idempotent request");
                self.send_once(&request).await
            }
            other => other,
        };

        if let Err(e) = &result {
            tracing::error!(path = request.path, error = %e, "Request to chat server failed");
        }

        result
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Network(err.to_string())
    }
}

/// Turn a non-success response into an error, using the server's JSON
/// error body when there is one
fn status_error(status: StatusCode, body: &str) -> TransportError {
    let (code, message) = match serde_json::from_str::<ErrorResponse>(body) {
        Ok(err) => (err.code, err.msg),
        Err(_) if !body.trim().is_empty() => (None, body.trim().to_string()),
        Err(_) => (
            None,
            status.canonical_reason().unwrap_or("Unknown error").to_string(),
        ),
    };

    TransportError::Status {
        status: status.as_u16(),
        code,
        message,
    }
}
