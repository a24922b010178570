// Integration tests: exporter HTTP endpoints

use agent_metrics::models::{CollectResult, MetricCounts};
use agent_metrics::routes;
use agent_metrics::worker::{LatestResult, latest_channel};
use axum::http::StatusCode;
use axum_test::TestServer;
use std::sync::Arc;
use tokio::sync::watch;

fn test_server() -> (TestServer, watch::Sender<LatestResult>) {
    let (tx, rx) = latest_channel();
    let server = TestServer::new(routes::app(rx));
    (server, tx)
}

fn sample_result() -> CollectResult {
    let mut result = CollectResult {
        totals: Some(MetricCounts {
            scheduled_jobs_count: 3,
            running_jobs_count: 1,
            unfinished_jobs_count: 4,
            total_agent_count: 2,
            busy_agent_count: 2,
            busy_agent_percentage: 100,
            binti_required_agent_count: 1,
            ..Default::default()
        }),
        ..Default::default()
    };
    result.queues.insert(
        "deploy".into(),
        MetricCounts {
            scheduled_jobs_count: 1,
            waiting_jobs_count: 1,
            unfinished_jobs_count: 1,
            binti_required_agent_count: 1,
            ..Default::default()
        },
    );
    result
}

#[tokio::test]
async fn test_root_endpoint() {
    let (server, _tx) = test_server();
    let response = server.get("/").await;
    response.assert_status_ok();
    response.assert_text("agent-metrics exporter");
}

#[tokio::test]
async fn test_version_endpoint() {
    let (server, _tx) = test_server();
    let response = server.get("/version").await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    assert_eq!(
        json.get("name").and_then(|v| v.as_str()),
        Some("agent-metrics")
    );
    assert!(json.get("version").and_then(|v| v.as_str()).is_some());
}

#[tokio::test]
async fn test_metrics_unavailable_before_first_collect() {
    let (server, _tx) = test_server();
    let response = server.get("/metrics").expect_failure().await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let response = server.get("/api/metrics").expect_failure().await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_prometheus_metrics_after_collect() {
    let (server, tx) = test_server();
    tx.send_replace(Some(Arc::new(sample_result())));

    let response = server.get("/metrics").await;
    response.assert_status_ok();
    let text = response.text();
    assert!(text.contains("# TYPE agent_metrics_busy_agent_percentage gauge"));
    assert!(text.contains("\nagent_metrics_busy_agent_percentage 100\n"));
    assert!(text.contains("agent_metrics_queue_binti_required_agent_count{queue=\"deploy\"} 1\n"));
    assert!(text.contains("agent_metrics_queue_waiting_jobs_count{queue=\"deploy\"} 1\n"));
    assert!(text.ends_with("# EOF\n"));
}

#[tokio::test]
async fn test_api_metrics_json_uses_metric_names() {
    let (server, tx) = test_server();
    tx.send_replace(Some(Arc::new(sample_result())));

    let response = server.get("/api/metrics").await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    assert_eq!(json["totals"]["UnfinishedJobsCount"], 4);
    assert_eq!(json["queues"]["deploy"]["BintiRequiredAgentCount"], 1);

    let back: CollectResult = response.json();
    assert_eq!(back, sample_result());
}
