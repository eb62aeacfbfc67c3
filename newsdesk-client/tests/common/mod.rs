#![allow(dead_code)]

use std::{
    collections::HashMap,
    net::SocketAddr,
    rc::Rc,
    sync::{Arc, Mutex},
};

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use client::{ApiClient, MemoryStore, SessionManager};
use serde_json::{Value, json};
use shared::config::ClientConfig;
use tokio::net::TcpListener;

/// One request as the mock backend saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body is JSON")
    }
}

#[derive(Default)]
struct MockState {
    routes: HashMap<(Method, String), (StatusCode, String)>,
    requests: Vec<Recorded>,
}

type Shared = Arc<Mutex<MockState>>;

/// Canned-response HTTP backend mounted under `/api`.
#[derive(Clone)]
pub struct MockBackend {
    addr: SocketAddr,
    state: Shared,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(MockState::default()));
        let app = Router::new()
            .fallback(handle)
            .with_state(Arc::clone(&state));
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock backend stopped");
        });
        Self { addr, state }
    }

    pub fn api_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::from_url(&self.api_url()).expect("mock URL is valid")
    }

    /// Answers `method path` with `status` and a JSON body.
    pub fn respond(&self, method: Method, path: &str, status: u16, body: Value) {
        self.respond_raw(method, path, status, &body.to_string());
    }

    /// Answers `method path` with an arbitrary body.
    pub fn respond_raw(&self, method: Method, path: &str, status: u16, body: &str) {
        let status = StatusCode::from_u16(status).expect("valid status");
        self.state
            .lock()
            .unwrap()
            .routes
            .insert((method, path.to_string()), (status, body.to_string()));
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|request| request.path == path)
            .collect()
    }

    pub fn last_request(&self) -> Recorded {
        self.requests().pop().expect("at least one request")
    }
}

async fn handle(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().trim_start_matches("/api").to_string();
    let mut state = state.lock().unwrap();
    state.requests.push(Recorded {
        method: method.clone(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        headers,
        body,
    });

    match state.routes.get(&(method, path)) {
        Some((status, body)) => {
            (*status, [(CONTENT_TYPE, "application/json")], body.clone()).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            [(CONTENT_TYPE, "application/json")],
            json!({"success": false, "message": "Not found"}).to_string(),
        )
            .into_response(),
    }
}

pub fn admin() -> Value {
    json!({"id": 1, "role": "admin", "email": "chief@example.com"})
}

pub fn login_ok(token: &str, user: Value) -> Value {
    json!({"success": true, "data": {"token": token, "user": user}})
}

pub fn session(backend: &MockBackend, store: &Rc<MemoryStore>) -> SessionManager {
    SessionManager::new(backend.config(), Rc::clone(store) as Rc<dyn client::CredentialStore>)
}

/// A session logged in as `user` with token `t1`, plus a client over it.
pub async fn logged_in_as(backend: &MockBackend, user: Value) -> (SessionManager, ApiClient, Rc<MemoryStore>) {
    backend.respond(Method::POST, "/auth/login", 200, login_ok("t1", user));
    let store = Rc::new(MemoryStore::new());
    let session = session(backend, &store);
    session
        .login("chief@example.com", "secret")
        .await
        .expect("login succeeds");
    let api = ApiClient::new(session.clone());
    (session, api, store)
}

pub async fn logged_in(backend: &MockBackend) -> (SessionManager, ApiClient, Rc<MemoryStore>) {
    logged_in_as(backend, admin()).await
}

/// A base URL nothing listens on.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("address");
    drop(listener);
    format!("http://{addr}/api")
}
