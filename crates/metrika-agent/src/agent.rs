//! Dual-cadence agent runtime.
//!
//! Two tokio tasks share one `Snapshot`:
//! - sample: every `poll_interval`, first tick immediately.
//! - flush: every `report_interval`, first tick after one full interval.
//!
//! The flusher copies the snapshot when a flush starts and sends that copy, so
//! a flush may carry values one sample behind the sampler. Telemetry tolerates
//! that; the lock only keeps each copy internally consistent.
//!
//! The first failed send ends the flush and the agent; the rest of that batch
//! is not sent and nothing is retried.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::sync::RwLock;
use tokio::task::JoinSet;
use tokio::time::{self, Instant, MissedTickBehavior};

use metrika_core::error::{MetrikaError, Result};
use metrika_core::MetricRecord;

use crate::reporter::Reporter;
use crate::sampler::Sampler;
use crate::snapshot::Snapshot;

/// Upper bound for both intervals (one day).
pub const MAX_INTERVAL_SECS: u64 = 86_400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentSettings {
    pub poll_interval: Duration,
    pub report_interval: Duration,
}

pub struct Agent<S, R> {
    sampler: S,
    reporter: R,
    settings: AgentSettings,
}

impl<S: Sampler, R: Reporter> Agent<S, R> {
    pub fn new(sampler: S, reporter: R, settings: AgentSettings) -> Result<Self> {
        let max = Duration::from_secs(MAX_INTERVAL_SECS);
        for every in [settings.poll_interval, settings.report_interval] {
            if every.is_zero() || every > max {
                return Err(MetrikaError::Config(format!(
                    "intervals must be between 1s and {max:?}, got {every:?}"
                )));
            }
        }
        Ok(Self {
            sampler,
            reporter,
            settings,
        })
    }

    /// Run both activities until a flush fails. Dropping the returned future
    /// aborts both tasks.
    pub async fn run(self) -> Result<()> {
        let snapshot = Arc::new(RwLock::new(Snapshot::default()));

        let mut tasks = JoinSet::new();
        tasks.spawn(sample_loop(
            self.sampler,
            Arc::clone(&snapshot),
            self.settings.poll_interval,
        ));
        tasks.spawn(flush_loop(
            self.reporter,
            snapshot,
            self.settings.report_interval,
        ));

        let outcome = match tasks.join_next().await {
            Some(Ok(res)) => res,
            Some(Err(e)) => Err(MetrikaError::Internal(format!("agent task failed: {e}"))),
            None => Ok(()),
        };
        tasks.abort_all();
        outcome
    }
}

async fn sample_loop<S: Sampler>(
    mut sampler: S,
    snapshot: Arc<RwLock<Snapshot>>,
    every: Duration,
) -> Result<()> {
    let mut ticker = time::interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        let readings = sampler.sample();
        let mut snap = snapshot.write().await;
        snap.refresh(readings, jitter());
        tracing::trace!(poll_count = snap.poll_count, "snapshot refreshed");
    }
}

async fn flush_loop<R: Reporter>(
    reporter: R,
    snapshot: Arc<RwLock<Snapshot>>,
    every: Duration,
) -> Result<()> {
    let mut ticker = time::interval_at(Instant::now() + every, every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        let records = snapshot.read().await.records();
        flush(&reporter, &records).await?;
    }
}

/// Send `records` one request at a time, stopping at the first failure.
pub async fn flush<R: Reporter + ?Sized>(reporter: &R, records: &[MetricRecord]) -> Result<()> {
    for record in records {
        if let Err(e) = reporter.report(record).await {
            tracing::error!(metric = %record.id, error = %e, "flush aborted");
            return Err(e);
        }
    }
    tracing::debug!(sent = records.len(), "flush complete");
    Ok(())
}

fn jitter() -> f64 {
    rand::thread_rng().gen_range(0.0..1.0)
}
