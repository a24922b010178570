// Shared test helpers: a throwaway metrics API on 127.0.0.1 and payload fixtures

#![allow(dead_code)]

use axum::{
    Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const TOKEN: &str = "abc123";
pub const USER_AGENT: &str = "some-client/1.2.3";

pub const EMPTY_GLOBAL: &str = r#"{
    "organization": { "slug": "test" },
    "jobs": {},
    "agents": {}
}"#;

pub const NO_JOBS_GLOBAL: &str = r#"{
    "organization": { "slug": "test" },
    "jobs": { "scheduled": 0, "running": 0, "total": 0, "queues": {} },
    "agents": { "idle": 0, "busy": 0, "total": 0, "queues": {} }
}"#;

pub const BUSY_GLOBAL: &str = r#"{
    "organization": { "slug": "test" },
    "jobs": {
        "scheduled": 3,
        "running": 1,
        "total": 4,
        "waiting": 2,
        "queues": {
            "default": { "scheduled": 2, "running": 1, "total": 3 },
            "deploy": { "scheduled": 1, "running": 0, "total": 1, "waiting": 1 },
            "binti": { "scheduled": 1, "running": 1 }
        }
    },
    "agents": {
        "idle": 0,
        "busy": 2,
        "total": 2,
        "queues": {
            "default": { "idle": 0, "busy": 1, "total": 1 },
            "binti": { "busy": 1, "idle": 0, "total": 1 }
        }
    }
}"#;

pub const DEPLOY_QUEUE: &str = r#"{
    "organization": { "slug": "test" },
    "jobs": { "scheduled": 3, "running": 1, "waiting": 1, "total": 4 },
    "agents": { "idle": 0, "busy": 1, "total": 1 }
}"#;

pub const DEFAULT_QUEUE: &str = r#"{
    "organization": { "slug": "test" },
    "jobs": { "scheduled": 0, "running": 2, "total": 2 },
    "agents": { "idle": 1, "busy": 2, "total": 3 }
}"#;

/// What the mock saw for one request.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub path: String,
    pub queue: Option<String>,
    pub authorization: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Clone)]
struct MockState {
    global: Option<String>,
    queues: HashMap<String, String>,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl MockState {
    fn record(&self, path: &str, queue: Option<String>, headers: &HeaderMap) {
        let header_str = |name: header::HeaderName| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        self.seen.lock().unwrap().push(SeenRequest {
            path: path.to_string(),
            queue,
            authorization: header_str(header::AUTHORIZATION),
            user_agent: header_str(header::USER_AGENT),
        });
    }
}

/// Serves `global` on `/metrics` and each `(name, body)` on `/metrics/queue?name=`.
/// Anything else is a 404.
pub struct MockApi {
    pub url: String,
    pub seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl MockApi {
    pub async fn start(global: Option<&str>, queues: &[(&str, &str)]) -> Self {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            global: global.map(str::to_string),
            queues: queues
                .iter()
                .map(|(name, body)| (name.to_string(), body.to_string()))
                .collect(),
            seen: seen.clone(),
        };
        let router = Router::new()
            .route("/metrics", get(global_handler))
            .route("/metrics/queue", get(queue_handler))
            .with_state(state);
        let url = serve(router).await;
        Self { url, seen }
    }

    pub fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }
}

/// Binds an ephemeral port and serves `router` in the background.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    format!("http://{}", addr)
}

/// An address nothing is listening on.
pub async fn closed_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

fn json_response(body: &str) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body.to_string(),
    )
        .into_response()
}

async fn global_handler(State(state): State<MockState>, headers: HeaderMap) -> Response {
    state.record("/metrics", None, &headers);
    match &state.global {
        Some(body) => json_response(body),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn queue_handler(
    State(state): State<MockState>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let name = params.get("name").cloned();
    state.record("/metrics/queue", name.clone(), &headers);
    match name.and_then(|n| state.queues.get(&n).cloned()) {
        Some(body) => json_response(&body),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
