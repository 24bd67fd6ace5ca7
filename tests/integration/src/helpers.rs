//! Test helpers for integration tests
//!
//! Provides an in-process stand-in for the chat server's status endpoint
//! that records what it receives and answers with scripted responses.

use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Form, Json, Router};
use parking_lot::Mutex;
use reqwest::Client;
use serde_json::{json, Value};
use status_common::{AppConfig, ErrorResponse};
use status_service::{HttpStatusTransport, USER_STATUS_PATH};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const TEST_EMAIL: &str = "iago@example.com";
pub const TEST_API_KEY: &str = "test-api-key";

/// One request as seen by the fake server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub form: HashMap<String, String>,
}

/// Scripted reply
#[derive(Debug, Clone)]
pub struct ScriptedResponse {
    pub status: StatusCode,
    pub body: Value,
    pub delay: Option<Duration>,
}

impl ScriptedResponse {
    pub fn success() -> Self {
        Self {
            status: StatusCode::OK,
            body: json!({ "result": "success", "msg": "" }),
            delay: None,
        }
    }

    pub fn error(status: StatusCode, msg: &str, code: &str) -> Self {
        Self {
            status,
            body: serde_json::to_value(ErrorResponse::new(msg, code)).unwrap_or_default(),
            delay: None,
        }
    }

    #[must_use]
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Clone, Default)]
struct FakeState {
    received: Arc<Mutex<Vec<RecordedRequest>>>,
    script: Arc<Mutex<VecDeque<ScriptedResponse>>>,
}

async fn update_status(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    };

    state.received.lock().push(RecordedRequest {
        authorization: header_value(header::AUTHORIZATION),
        content_type: header_value(header::CONTENT_TYPE),
        form,
    });

    let reply = state
        .script
        .lock()
        .pop_front()
        .unwrap_or_else(ScriptedResponse::success);

    if let Some(delay) = reply.delay {
        tokio::time::sleep(delay).await;
    }

    (reply.status, Json(reply.body))
}

/// Fake chat server instance that manages lifecycle
pub struct FakeChatServer {
    pub addr: SocketAddr,
    state: FakeState,
    _handle: JoinHandle<()>,
}

impl FakeChatServer {
    /// Start a server that accepts every update
    pub async fn start() -> Result<Self> {
        Self::start_with_script(Vec::new()).await
    }

    /// Start a server that answers with `script` in order, then with success
    pub async fn start_with_script(script: Vec<ScriptedResponse>) -> Result<Self> {
        let state = FakeState {
            received: Arc::default(),
            script: Arc::new(Mutex::new(script.into())),
        };

        let app = Router::new()
            .route(USER_STATUS_PATH, post(update_status))
            .with_state(state.clone());

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            addr,
            state,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Everything received so far
    pub fn received(&self) -> Vec<RecordedRequest> {
        self.state.received.lock().clone()
    }

    /// Transport pointed at this server with default settings
    pub fn transport(&self) -> Result<HttpStatusTransport> {
        Ok(HttpStatusTransport::from_config(&self.config()?.server)?)
    }

    /// Transport with a custom request timeout
    pub fn transport_with_timeout(&self, timeout: Duration) -> Result<HttpStatusTransport> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(HttpStatusTransport::with_client(
            client,
            self.base_url(),
            TEST_EMAIL,
            TEST_API_KEY,
        ))
    }

    /// Application config pointed at this server
    pub fn config(&self) -> Result<AppConfig> {
        let base_url = self.base_url();
        Ok(AppConfig::from_source(|key| match key {
            "STATUS_SERVER_URL" => Some(base_url.clone()),
            "STATUS_API_EMAIL" => Some(TEST_EMAIL.to_string()),
            "STATUS_API_KEY" => Some(TEST_API_KEY.to_string()),
            "STATUS_REQUEST_TIMEOUT_SECS" => Some("5".to_string()),
            _ => None,
        })?)
    }
}
