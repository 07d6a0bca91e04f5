//! In-process mock commerce backend for client tests.
//!
//! Binds an axum router to an ephemeral localhost port, records every request
//! it receives, and answers with canned JSON. Tests assert on the recorded
//! requests rather than on wire bytes.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::to_bytes;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::{Value, json};

use super::ApiClient;
use crate::config::CommerceApiConfig;

/// One request the mock backend observed.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub auth_header: Option<String>,
    pub guest_header: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone, Default)]
struct MockState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    stubs: Arc<Mutex<HashMap<String, (StatusCode, Value)>>>,
    fail_next: Arc<Mutex<Option<(StatusCode, String)>>>,
}

/// A mock commerce API listening on an ephemeral port.
pub struct MockBackend {
    addr: SocketAddr,
    state: MockState,
}

impl MockBackend {
    /// Start the mock backend.
    pub async fn start() -> Self {
        let state = MockState::default();
        let app = Router::new()
            .fallback(handle)
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, state }
    }

    /// A client pointed at this backend.
    pub fn client(&self) -> ApiClient {
        ApiClient::new(&CommerceApiConfig {
            base_url: format!("http://{}", self.addr),
        })
    }

    /// Stub an exact `METHOD /path` with a JSON body.
    pub fn stub(&self, method: &str, path: &str, body: Value) {
        self.stub_status(method, path, StatusCode::OK, body);
    }

    /// Stub an exact `METHOD /path` with a status and JSON body.
    pub fn stub_status(&self, method: &str, path: &str, status: StatusCode, body: Value) {
        self.state
            .stubs
            .lock()
            .expect("stubs lock")
            .insert(format!("{method} {path}"), (status, body));
    }

    /// Make the next request (any path) fail with `{"detail": ...}`.
    pub fn fail_next(&self, status: u16, detail: &str) {
        *self.state.fail_next.lock().expect("fail_next lock") = Some((
            StatusCode::from_u16(status).expect("valid status"),
            detail.to_string(),
        ));
    }

    /// All requests observed so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().expect("requests lock").clone()
    }
}

async fn handle(State(state): State<MockState>, request: Request) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let query = request.uri().query().map(ToString::to_string);
    let auth_header = header(&request, "authorization");
    let guest_header = header(&request, "X-Guest-Session-ID");

    let body = to_bytes(request.into_body(), usize::MAX)
        .await
        .ok()
        .filter(|bytes| !bytes.is_empty())
        .and_then(|bytes| serde_json::from_slice(&bytes).ok());

    state
        .requests
        .lock()
        .expect("requests lock")
        .push(RecordedRequest {
            method: method.clone(),
            path: path.clone(),
            query,
            auth_header,
            guest_header,
            body,
        });

    if let Some((status, detail)) = state.fail_next.lock().expect("fail_next lock").take() {
        return (status, Json(json!({ "detail": detail }))).into_response();
    }

    let stub = state
        .stubs
        .lock()
        .expect("stubs lock")
        .get(&format!("{method} {path}"))
        .cloned();
    if let Some((status, body)) = stub {
        return (status, Json(body)).into_response();
    }

    Json(default_response(&path)).into_response()
}

fn header(request: &Request, name: &str) -> Option<String> {
    request
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string)
}

/// Happy-path defaults so most tests need no stubbing.
fn default_response(path: &str) -> Value {
    if path.starts_with("/cart/session/guest") {
        json!({ "guest_session_id": "2c5ea4c0-4067-11e9-8bad-9b1deb4d3b7d" })
    } else if path.starts_with("/cart") {
        json!({ "items": [] })
    } else if path.starts_with("/checkout/create-preference") {
        json!({ "preference_id": "pref-1", "init_point": "https://pay.example/init" })
    } else if path.starts_with("/auth/login") || path.starts_with("/auth/register") {
        json!({ "access_token": "token-1", "token_type": "bearer" })
    } else if path.starts_with("/auth/me") {
        json!({
            "id": 1,
            "email": "shopper@example.com",
            "first_name": "Test",
            "last_name": "Shopper",
            "role": "client"
        })
    } else {
        // Listing endpoints default to empty collections.
        json!([])
    }
}
