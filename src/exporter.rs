// Prometheus exposition of a CollectResult via prometheus-client.
// Fleet totals are unlabelled gauges; per-queue values live under
// `agent_metrics_queue_*` with a `queue` label.

use crate::models::{CollectResult, Metric};
use prometheus_client::encoding::EncodeLabelSet;
use prometheus_client::encoding::text::encode;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::gauge::Gauge;
use prometheus_client::registry::Registry;

pub const METRIC_PREFIX: &str = "agent_metrics";
pub const CONTENT_TYPE: &str = "application/openmetrics-text; version=1.0.0; charset=utf-8";

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct QueueLabels {
    pub queue: String,
}

/// `BusyAgentPercentage` → `busy_agent_percentage`.
pub fn snake_name(metric: Metric) -> String {
    let mut out = String::new();
    for c in metric.name().chars() {
        if c.is_ascii_uppercase() {
            if !out.is_empty() {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn help(metric: Metric) -> &'static str {
    match metric {
        Metric::RunningJobsCount => "Jobs currently running",
        Metric::ScheduledJobsCount => "Jobs scheduled but not yet running",
        Metric::WaitingJobsCount => "Jobs waiting on dependencies",
        Metric::UnfinishedJobsCount => "Scheduled plus running jobs",
        Metric::TotalAgentCount => "Connected agents",
        Metric::BusyAgentCount => "Agents running a job",
        Metric::IdleAgentCount => "Agents available for work",
        Metric::BusyAgentPercentage => "Busy agents as a rounded percentage of all agents",
        Metric::BintiRequiredAgentCount => {
            "Additional agents needed for the scheduled backlog, at least 1 when anything is scheduled"
        }
    }
}

fn gauge_value(v: u64) -> i64 {
    i64::try_from(v).unwrap_or(i64::MAX)
}

/// Builds a fresh registry holding the values of `result`.
pub fn registry_for(result: &CollectResult) -> Registry {
    let mut registry = Registry::with_prefix(METRIC_PREFIX);

    if let Some(totals) = &result.totals {
        for metric in Metric::ALL {
            let gauge = Gauge::<i64>::default();
            gauge.set(gauge_value(totals.get(metric)));
            registry.register(snake_name(metric), help(metric), gauge);
        }
    }

    if !result.queues.is_empty() {
        let queue_registry = registry.sub_registry_with_prefix("queue");
        for metric in Metric::ALL {
            let family = Family::<QueueLabels, Gauge>::default();
            for (queue, counts) in &result.queues {
                family
                    .get_or_create(&QueueLabels {
                        queue: queue.clone(),
                    })
                    .set(gauge_value(counts.get(metric)));
            }
            queue_registry.register(snake_name(metric), help(metric), family);
        }
    }

    registry
}

/// Text exposition of `result`.
pub fn render_prometheus(result: &CollectResult) -> Result<String, std::fmt::Error> {
    let registry = registry_for(result);
    let mut out = String::new();
    encode(&mut out, &registry)?;
    Ok(out)
}
