// Raw payload of the agent metrics API.
// Every count is optional on the wire; absent and null both decode to zero.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Body of `GET /metrics` and `GET /metrics/queue?name=...`.
/// The queue-scoped response has the same shape without the nested `queues` maps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSnapshot {
    #[serde(default, deserialize_with = "null_as_default")]
    pub organization: Organization,
    #[serde(default, deserialize_with = "null_as_default")]
    pub jobs: JobCounts,
    #[serde(default, deserialize_with = "null_as_default")]
    pub agents: AgentCounts,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    #[serde(default)]
    pub slug: Option<String>,
}

/// Job counts for the whole fleet or for one queue.
/// `total` is informational; derivation recomputes from scheduled/running/waiting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobCounts {
    #[serde(default, deserialize_with = "null_as_default")]
    pub scheduled: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub running: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub waiting: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub queues: BTreeMap<String, JobCounts>,
}

/// Agent counts for the whole fleet or for one queue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentCounts {
    #[serde(default, deserialize_with = "null_as_default")]
    pub idle: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub busy: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub queues: BTreeMap<String, AgentCounts>,
}

/// `null` decodes the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
