// Collector: fetch from the metrics API, then derive metrics per bucket

mod derive;
mod fetch;

pub use derive::{Scope, busy_percentage, derive, derive_bucket, required_agents};
pub use fetch::fetch;

use crate::config::EndpointConfig;
use crate::error::CollectError;
use crate::models::CollectResult;
use std::time::Duration;
use tracing::{debug, instrument};

pub struct Collector {
    pub endpoint: String,
    pub token: String,
    pub user_agent: String,
    /// Queues to collect individually. Empty means one global request.
    pub queues: Vec<String>,
    client: reqwest::Client,
}

impl Collector {
    pub fn new(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: token.into(),
            user_agent: user_agent.into(),
            queues: Vec::new(),
            client: reqwest::Client::new(),
        }
    }

    /// Builds a collector with an HTTP client honouring `endpoint.timeout_secs`.
    pub fn from_config(endpoint: &EndpointConfig, queues: &[String]) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(endpoint.timeout_secs))
            .build()?;
        Ok(Self::new(&endpoint.url, &endpoint.token, &endpoint.user_agent)
            .with_queues(queues.to_vec())
            .with_client(client))
    }

    pub fn with_queues(mut self, queues: Vec<String>) -> Self {
        self.queues = queues;
        self
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// One global request, or one request per configured queue merged by queue name.
    /// The first error aborts the call; no partial results.
    #[instrument(skip(self), fields(endpoint = %self.endpoint, queues = self.queues.len()))]
    pub async fn collect(&self) -> Result<CollectResult, CollectError> {
        if self.queues.is_empty() {
            let raw =
                fetch(&self.client, &self.endpoint, &self.token, &self.user_agent, "").await?;
            return Ok(derive(&raw, Scope::Global));
        }

        let mut result = CollectResult::default();
        for queue in &self.queues {
            debug!(queue = %queue, "collecting queue");
            let raw =
                fetch(&self.client, &self.endpoint, &self.token, &self.user_agent, queue).await?;
            result.queues.extend(derive(&raw, Scope::Queue(queue)).queues);
        }
        Ok(result)
    }
}
