// Domain models: raw API payload and derived metrics

mod metrics;
mod raw;

pub use metrics::{CollectResult, Metric, MetricCounts};
pub use raw::{AgentCounts, JobCounts, Organization, RawSnapshot};
