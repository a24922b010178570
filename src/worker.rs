// Background poll worker.
// Collects on a fixed interval, logs each result and publishes the latest one on a watch channel.

use crate::collector::Collector;
use crate::models::CollectResult;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tokio::time::{Duration, interval};
use tracing::Instrument;

/// Latest successful result; `None` until the first poll succeeds.
pub type LatestResult = Option<Arc<CollectResult>>;

pub fn latest_channel() -> (watch::Sender<LatestResult>, watch::Receiver<LatestResult>) {
    watch::channel(None)
}

/// Collector, output channel, counters and shutdown for the worker.
pub struct WorkerDeps {
    pub collector: Arc<Collector>,
    pub tx: watch::Sender<LatestResult>,
    pub polls_failed_total: Arc<AtomicU64>,
    pub shutdown_rx: tokio::sync::oneshot::Receiver<()>,
}

pub struct WorkerConfig {
    pub interval: Duration,
}

pub fn spawn(deps: WorkerDeps, config: WorkerConfig) -> tokio::task::JoinHandle<()> {
    let WorkerDeps {
        collector,
        tx,
        polls_failed_total,
        mut shutdown_rx,
    } = deps;

    let worker_span = tracing::span!(
        tracing::Level::DEBUG,
        "worker",
        interval_ms = config.interval.as_millis() as u64
    );

    tokio::spawn(
        async move {
            let mut tick = interval(config.interval);
            tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = tick.tick() => {
                        match collector.collect().await {
                            Ok(result) => {
                                log_result(&result);
                                tx.send_replace(Some(Arc::new(result)));
                            }
                            Err(e) => {
                                let failed = polls_failed_total.fetch_add(1, Ordering::Relaxed) + 1;
                                tracing::warn!(
                                    error = %e,
                                    operation = "collect",
                                    polls_failed_total = failed,
                                    "collect failed; keeping previous result"
                                );
                            }
                        }
                    }
                    _ = &mut shutdown_rx => {
                        tracing::debug!("Worker shutting down");
                        break;
                    }
                }
            }
        }
        .instrument(worker_span),
    )
}

/// Printer backend: totals at INFO, each queue at DEBUG.
pub fn log_result(result: &CollectResult) {
    if let Some(totals) = &result.totals {
        tracing::info!(
            scheduled = totals.scheduled_jobs_count,
            running = totals.running_jobs_count,
            waiting = totals.waiting_jobs_count,
            agents = totals.total_agent_count,
            busy_pct = totals.busy_agent_percentage,
            required_agents = totals.binti_required_agent_count,
            queues = result.queues.len(),
            "fleet totals"
        );
    }
    for (queue, counts) in &result.queues {
        tracing::debug!(
            queue = %queue,
            scheduled = counts.scheduled_jobs_count,
            running = counts.running_jobs_count,
            waiting = counts.waiting_jobs_count,
            agents = counts.total_agent_count,
            busy_pct = counts.busy_agent_percentage,
            required_agents = counts.binti_required_agent_count,
            "queue metrics"
        );
    }
}
