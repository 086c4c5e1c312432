//! In-process stand-in for the REST APIs, served by axum on an ephemeral port.
//!
//! Responses are canned per `METHOD path?query`. When several responses are
//! queued for the same key they are served in order and the last one repeats.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};

use crate::auth::StaticAccessToken;
use crate::client::PropertyValidationClient;
use crate::config::ClientConfig;

/// Token configured on clients built by [`client_for`].
pub(crate) const TEST_TOKEN: &str = "Bearer test-token";

#[derive(Debug, Clone)]
enum CannedBody {
    Json(Value),
    Raw(String),
    Empty,
}

#[derive(Debug, Clone)]
struct Canned {
    status: u16,
    body: CannedBody,
}

/// A request received by the mock.
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub method: String,
    pub path_and_query: String,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[derive(Default)]
struct MockState {
    routes: HashMap<String, VecDeque<Canned>>,
    requests: Vec<RecordedRequest>,
}

type SharedState = Arc<Mutex<MockState>>;

#[derive(Clone)]
pub(crate) struct MockApi {
    base_url: String,
    state: SharedState,
}

impl MockApi {
    pub async fn start() -> Self {
        let state: SharedState = Arc::new(Mutex::new(MockState::default()));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock api");
        let addr = listener.local_addr().expect("mock api address");
        let app = Router::new().fallback(handle).with_state(Arc::clone(&state));
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    pub fn url(&self, path_and_query: &str) -> String {
        format!("{}{path_and_query}", self.base_url)
    }

    pub fn on(&self, method: &str, path_and_query: &str, status: u16, body: Value) {
        self.push(method, path_and_query, status, CannedBody::Json(body));
    }

    pub fn on_empty(&self, method: &str, path_and_query: &str, status: u16) {
        self.push(method, path_and_query, status, CannedBody::Empty);
    }

    pub fn on_raw(&self, method: &str, path_and_query: &str, status: u16, body: &str) {
        self.push(method, path_and_query, status, CannedBody::Raw(body.to_string()));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().requests.clone()
    }

    /// Number of requests received for `path_and_query`, any method.
    pub fn hits(&self, path_and_query: &str) -> usize {
        self.state
            .lock()
            .requests
            .iter()
            .filter(|r| r.path_and_query == path_and_query)
            .count()
    }

    fn push(&self, method: &str, path_and_query: &str, status: u16, body: CannedBody) {
        self.state
            .lock()
            .routes
            .entry(route_key(method, path_and_query))
            .or_default()
            .push_back(Canned { status, body });
    }
}

/// Config pointing both APIs at the mock: `/validation` and `/imodels`.
pub(crate) fn config_for(api: &MockApi) -> ClientConfig {
    ClientConfig {
        base_url: api.url("/validation"),
        imodels_base_url: api.url("/imodels"),
        run_poll_interval: std::time::Duration::from_millis(10),
        ..ClientConfig::default()
    }
}

/// Client for `api` authenticating with [`TEST_TOKEN`].
pub(crate) fn client_for(api: &MockApi) -> PropertyValidationClient {
    client_without_token(api).with_token_provider(Arc::new(StaticAccessToken::new(TEST_TOKEN)))
}

/// Client for `api` with no token provider.
pub(crate) fn client_without_token(api: &MockApi) -> PropertyValidationClient {
    PropertyValidationClient::new(config_for(api)).expect("build client")
}

fn route_key(method: &str, path_and_query: &str) -> String {
    format!("{method} {path_and_query}")
}

async fn handle(
    State(state): State<SharedState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path_and_query = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_string(), |pq| pq.as_str().to_string());

    let canned = {
        let mut state = state.lock();
        state.requests.push(RecordedRequest {
            method: method.to_string(),
            path_and_query: path_and_query.clone(),
            headers,
            body: serde_json::from_slice(&body).ok(),
        });
        state
            .routes
            .get_mut(&route_key(method.as_str(), &path_and_query))
            .and_then(|queue| {
                if queue.len() > 1 {
                    queue.pop_front()
                } else {
                    queue.front().cloned()
                }
            })
    };

    let Some(canned) = canned else {
        let body = json!({
            "error": {
                "code": "ResourceNotFound",
                "message": format!("no canned response for {method} {path_and_query}")
            }
        });
        return (StatusCode::NOT_FOUND, Json(body)).into_response();
    };

    let status = StatusCode::from_u16(canned.status).expect("valid canned status");
    match canned.body {
        CannedBody::Json(value) => (status, Json(value)).into_response(),
        CannedBody::Raw(text) => (status, text).into_response(),
        CannedBody::Empty => status.into_response(),
    }
}
