// One request against the metrics API

use crate::error::CollectError;
use crate::models::RawSnapshot;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, USER_AGENT};
use tracing::{debug, instrument};

/// Fetches the global snapshot (`queue` empty) or one queue's snapshot.
/// Timeouts belong to the caller's `client`; no retries here.
#[instrument(skip(client, token), fields(operation = "fetch"))]
pub async fn fetch(
    client: &Client,
    endpoint: &str,
    token: &str,
    user_agent: &str,
    queue: &str,
) -> Result<RawSnapshot, CollectError> {
    let base = endpoint.trim_end_matches('/');
    let request = if queue.is_empty() {
        client.get(format!("{}/metrics", base))
    } else {
        client
            .get(format!("{}/metrics/queue", base))
            .query(&[("name", queue)])
    };

    let response = request
        .header(AUTHORIZATION, format!("Token {}", token))
        .header(USER_AGENT, user_agent)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(CollectError::UnexpectedStatus {
            status: status.as_u16(),
            url: response.url().to_string(),
        });
    }

    let body = response.bytes().await?;
    let raw: RawSnapshot = serde_json::from_slice(&body)?;
    debug!(
        status = status.as_u16(),
        body_bytes = body.len(),
        org = raw.organization.slug.as_deref().unwrap_or(""),
        "metrics fetched"
    );
    Ok(raw)
}
