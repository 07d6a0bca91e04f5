//! In-process mock commerce backend for admin client tests.
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

use super::AdminClient;

/// One request the mock backend observed.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub auth_header: Option<String>,
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
        let app = Router::new().fallback(handle).with_state(state.clone());

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
    pub fn client(&self) -> AdminClient {
        AdminClient::new(&format!("http://{}", self.addr))
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
    let auth_header = request
        .headers()
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string);

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

/// Happy-path defaults so most tests need no stubbing.
fn default_response(path: &str) -> Value {
    if path.starts_with("/auth/login") {
        json!({ "access_token": "token-1", "token_type": "bearer" })
    } else if path.starts_with("/auth/me") {
        json!({
            "id": 1,
            "email": "boss@example.com",
            "first_name": "Back",
            "last_name": "Office",
            "role": "admin"
        })
    } else if path.starts_with("/admin/metrics/kpis") {
        json!({
            "total_revenue": "0",
            "average_ticket": "0",
            "total_orders": 0,
            "total_users": 0,
            "total_expenses": "0",
            "total_products_sold": 0
        })
    } else if path.starts_with("/admin/charts/") {
        json!({ "data": [] })
    } else {
        // Listing endpoints default to empty collections.
        json!([])
    }
}
