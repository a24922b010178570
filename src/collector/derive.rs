// Raw snapshot → derived metrics. Pure; no I/O.

use crate::models::{AgentCounts, CollectResult, JobCounts, MetricCounts, RawSnapshot};
use std::collections::BTreeSet;

/// What the snapshot was fetched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope<'a> {
    /// `GET /metrics`: fleet totals plus nested per-queue records.
    Global,
    /// `GET /metrics/queue?name=...`: top-level counts already scoped to this queue.
    Queue(&'a str),
}

pub fn derive(raw: &RawSnapshot, scope: Scope<'_>) -> CollectResult {
    match scope {
        Scope::Global => {
            let totals = derive_bucket(Some(&raw.jobs), Some(&raw.agents));
            let names: BTreeSet<&String> = raw
                .jobs
                .queues
                .keys()
                .chain(raw.agents.queues.keys())
                .collect();
            let queues = names
                .into_iter()
                .map(|name| {
                    let counts =
                        derive_bucket(raw.jobs.queues.get(name), raw.agents.queues.get(name));
                    (name.clone(), counts)
                })
                .collect();
            CollectResult {
                totals: Some(totals),
                queues,
            }
        }
        Scope::Queue(name) => {
            let counts = derive_bucket(Some(&raw.jobs), Some(&raw.agents));
            CollectResult {
                totals: None,
                queues: [(name.to_string(), counts)].into_iter().collect(),
            }
        }
    }
}

/// Derive one bucket. A missing side counts as all zeros.
pub fn derive_bucket(jobs: Option<&JobCounts>, agents: Option<&AgentCounts>) -> MetricCounts {
    let (scheduled, running, waiting) =
        jobs.map_or((0, 0, 0), |j| (j.scheduled, j.running, j.waiting));
    let (idle, busy, total) = agents.map_or((0, 0, 0), |a| (a.idle, a.busy, a.total));

    MetricCounts {
        running_jobs_count: running,
        scheduled_jobs_count: scheduled,
        waiting_jobs_count: waiting,
        unfinished_jobs_count: scheduled.saturating_add(running),
        total_agent_count: total,
        busy_agent_count: busy,
        idle_agent_count: idle,
        busy_agent_percentage: busy_percentage(busy, total),
        binti_required_agent_count: required_agents(scheduled, total),
    }
}

/// round(100 * busy / total), half away from zero; 0 when there are no agents.
pub fn busy_percentage(busy: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    let (busy, total) = (busy as u128, total as u128);
    ((200 * busy + total) / (2 * total)) as u64
}

/// Capacity shortfall: 0 with nothing scheduled, otherwise at least one agent
/// and scheduled - total beyond that.
pub fn required_agents(scheduled: u64, total: u64) -> u64 {
    if scheduled == 0 {
        return 0;
    }
    scheduled.saturating_sub(total).max(1)
}
