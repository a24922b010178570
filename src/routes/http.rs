// GET handlers: version, metrics (Prometheus text), api/metrics (JSON)

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use super::AppState;
use crate::exporter;
use crate::version::{NAME, VERSION};

const NOT_READY: &str = "no successful collection yet";

/// GET /version — returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

/// GET /metrics — latest result in OpenMetrics text format; 503 before the first poll.
pub(super) async fn prometheus_handler(State(state): State<AppState>) -> Response {
    let latest = state.latest.borrow().clone();
    let Some(result) = latest else {
        return (StatusCode::SERVICE_UNAVAILABLE, NOT_READY).into_response();
    };
    match exporter::render_prometheus(&result) {
        Ok(body) => ([(header::CONTENT_TYPE, exporter::CONTENT_TYPE)], body).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, operation = "render_prometheus", "encoding failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// GET /api/metrics — latest result as JSON; 503 before the first poll.
pub(super) async fn api_metrics_handler(State(state): State<AppState>) -> Response {
    let latest = state.latest.borrow().clone();
    match latest {
        Some(result) => axum::Json(result.as_ref().clone()).into_response(),
        None => (StatusCode::SERVICE_UNAVAILABLE, NOT_READY).into_response(),
    }
}
