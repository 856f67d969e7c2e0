//! In-process stand-in for the central server, for tests.
//!
//! Binds an axum server to an ephemeral localhost port, answers each
//! `(method, path)` with a canned response, and records what it received.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};

/// A request the fake received.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: serde_json::Value,
}

#[derive(Default)]
struct FakeState {
    responses: Mutex<HashMap<(String, String), (u16, String)>>,
    anonymous: Mutex<HashMap<(String, String), (u16, String)>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Handle to a running fake central server.
#[derive(Clone)]
pub struct FakeCentral {
    base_url: String,
    state: Arc<FakeState>,
}

impl FakeCentral {
    /// Start a fake server on a random port.
    pub async fn start() -> Self {
        let state = Arc::new(FakeState::default());
        let app = Router::new()
            .fallback(respond)
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Answer `method path` with a JSON body.
    pub fn respond(&self, method: &str, path: &str, status: u16, body: serde_json::Value) {
        self.respond_raw(method, path, status, &body.to_string());
    }

    /// Answer `method path` with a raw body.
    pub fn respond_raw(&self, method: &str, path: &str, status: u16, body: &str) {
        self.state.responses.lock().unwrap().insert(
            (method.to_string(), path.to_string()),
            (status, body.to_string()),
        );
    }

    /// Answer `method path` with a JSON body when the request carries no
    /// bearer token. Requests with a token still get the `respond` answer.
    pub fn respond_anonymous(
        &self,
        method: &str,
        path: &str,
        status: u16,
        body: serde_json::Value,
    ) {
        self.state.anonymous.lock().unwrap().insert(
            (method.to_string(), path.to_string()),
            (status, body.to_string()),
        );
    }

    /// Everything received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// How many requests hit `path`.
    pub fn hits(&self, path: &str) -> usize {
        self.requests().iter().filter(|r| r.path == path).count()
    }
}

async fn respond(
    State(state): State<Arc<FakeState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let key = (method.to_string(), path.clone());

    let anonymous = match authorization {
        None => state.anonymous.lock().unwrap().get(&key).cloned(),
        Some(_) => None,
    };

    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        path,
        authorization,
        body: serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null),
    });

    let canned = anonymous.or_else(|| state.responses.lock().unwrap().get(&key).cloned());

    match canned {
        Some((status, body)) => (
            StatusCode::from_u16(status).unwrap(),
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
