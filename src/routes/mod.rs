// HTTP routes for the exporter

mod http;

use axum::{Router, routing::get};
use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};

use crate::worker::LatestResult;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) latest: watch::Receiver<LatestResult>,
}

pub fn app(latest: watch::Receiver<LatestResult>) -> Router {
    let state = AppState { latest };
    Router::new()
        .route("/", get(|| async { "agent-metrics exporter" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/metrics", get(http::prometheus_handler)) // GET /metrics
        .route("/api/metrics", get(http::api_metrics_handler)) // GET /api/metrics
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
