// Derived metrics: one fixed record per bucket (fleet totals or a single queue)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Closed set of metric names exposed to exporters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    RunningJobsCount,
    ScheduledJobsCount,
    WaitingJobsCount,
    UnfinishedJobsCount,
    TotalAgentCount,
    BusyAgentCount,
    IdleAgentCount,
    BusyAgentPercentage,
    BintiRequiredAgentCount,
}

impl Metric {
    pub const ALL: [Metric; 9] = [
        Metric::RunningJobsCount,
        Metric::ScheduledJobsCount,
        Metric::WaitingJobsCount,
        Metric::UnfinishedJobsCount,
        Metric::TotalAgentCount,
        Metric::BusyAgentCount,
        Metric::IdleAgentCount,
        Metric::BusyAgentPercentage,
        Metric::BintiRequiredAgentCount,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Metric::RunningJobsCount => "RunningJobsCount",
            Metric::ScheduledJobsCount => "ScheduledJobsCount",
            Metric::WaitingJobsCount => "WaitingJobsCount",
            Metric::UnfinishedJobsCount => "UnfinishedJobsCount",
            Metric::TotalAgentCount => "TotalAgentCount",
            Metric::BusyAgentCount => "BusyAgentCount",
            Metric::IdleAgentCount => "IdleAgentCount",
            Metric::BusyAgentPercentage => "BusyAgentPercentage",
            Metric::BintiRequiredAgentCount => "BintiRequiredAgentCount",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// All nine metrics for one bucket. Serializes with the metric names as keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricCounts {
    pub running_jobs_count: u64,
    pub scheduled_jobs_count: u64,
    pub waiting_jobs_count: u64,
    pub unfinished_jobs_count: u64,
    pub total_agent_count: u64,
    pub busy_agent_count: u64,
    pub idle_agent_count: u64,
    pub busy_agent_percentage: u64,
    pub binti_required_agent_count: u64,
}

impl MetricCounts {
    pub fn get(&self, metric: Metric) -> u64 {
        match metric {
            Metric::RunningJobsCount => self.running_jobs_count,
            Metric::ScheduledJobsCount => self.scheduled_jobs_count,
            Metric::WaitingJobsCount => self.waiting_jobs_count,
            Metric::UnfinishedJobsCount => self.unfinished_jobs_count,
            Metric::TotalAgentCount => self.total_agent_count,
            Metric::BusyAgentCount => self.busy_agent_count,
            Metric::IdleAgentCount => self.idle_agent_count,
            Metric::BusyAgentPercentage => self.busy_agent_percentage,
            Metric::BintiRequiredAgentCount => self.binti_required_agent_count,
        }
    }

    /// Name → value view for generic exporters.
    pub fn to_map(&self) -> BTreeMap<&'static str, u64> {
        Metric::ALL
            .iter()
            .map(|&m| (m.name(), self.get(m)))
            .collect()
    }
}

/// Result of one collect call.
/// `totals` is `None` when specific queues were requested.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectResult {
    pub totals: Option<MetricCounts>,
    pub queues: BTreeMap<String, MetricCounts>,
}

impl CollectResult {
    /// Totals as a name → value map; empty for queue-scoped results.
    pub fn totals_map(&self) -> BTreeMap<&'static str, u64> {
        self.totals.map(|t| t.to_map()).unwrap_or_default()
    }

    /// Per-queue name → value maps.
    pub fn queue_maps(&self) -> BTreeMap<&str, BTreeMap<&'static str, u64>> {
        self.queues
            .iter()
            .map(|(name, counts)| (name.as_str(), counts.to_map()))
            .collect()
    }
}
