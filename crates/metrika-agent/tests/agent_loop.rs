//! Agent scheduling and failure policy on a paused tokio clock.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use metrika_agent::agent::MAX_INTERVAL_SECS;
use metrika_agent::{Agent, AgentSettings, Reporter, Sampler};
use metrika_core::{MetricRecord, MetricValue, MetrikaError, Result};

struct FixedSampler;

impl Sampler for FixedSampler {
    fn sample(&mut self) -> Vec<(&'static str, f64)> {
        vec![("Alloc", 1024.0), ("HeapInuse", 512.0)]
    }
}

/// Records every attempted send; fails the call whose index is `fail_at`.
#[derive(Clone, Default)]
struct RecordingReporter {
    sent: Arc<Mutex<Vec<MetricRecord>>>,
    fail_at: Option<usize>,
}

#[async_trait]
impl Reporter for RecordingReporter {
    async fn report(&self, record: &MetricRecord) -> Result<()> {
        let mut sent = self.sent.lock().unwrap();
        let idx = sent.len();
        sent.push(record.clone());
        if Some(idx) == self.fail_at {
            return Err(MetrikaError::Transport("collector answered 500".into()));
        }
        Ok(())
    }
}

fn settings(poll: u64, report: u64) -> AgentSettings {
    AgentSettings {
        poll_interval: Duration::from_secs(poll),
        report_interval: Duration::from_secs(report),
    }
}

fn poll_counts(records: &[MetricRecord]) -> Vec<i64> {
    records
        .iter()
        .filter(|r| r.id == "PollCount")
        .map(|r| match r.value {
            MetricValue::Counter(d) => d,
            MetricValue::Gauge(_) => panic!("PollCount must be a counter"),
        })
        .collect()
}

#[tokio::test(start_paused = true)]
async fn nothing_is_sent_before_first_report_interval() {
    let reporter = RecordingReporter::default();
    let agent = Agent::new(FixedSampler, reporter.clone(), settings(3, 5)).unwrap();

    let res = tokio::time::timeout(Duration::from_millis(4_900), agent.run()).await;
    assert!(res.is_err(), "agent must keep running");
    assert!(reporter.sent.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn each_flush_sends_the_whole_snapshot() {
    let reporter = RecordingReporter::default();
    let agent = Agent::new(FixedSampler, reporter.clone(), settings(3, 5)).unwrap();

    // Samples at t=0,3,6,9; flushes at t=5 and t=10.
    let res = tokio::time::timeout(Duration::from_secs(12), agent.run()).await;
    assert!(res.is_err(), "agent must keep running");

    let sent = reporter.sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 8);
    assert_eq!(poll_counts(&sent), vec![2, 4]);

    for flush in sent.chunks(4) {
        let ids: Vec<&str> = flush.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["Alloc", "HeapInuse", "PollCount", "RandomValue"]);
        match flush[3].value {
            MetricValue::Gauge(v) => assert!((0.0..1.0).contains(&v)),
            MetricValue::Counter(_) => panic!("RandomValue must be a gauge"),
        }
    }
}

#[tokio::test(start_paused = true)]
async fn first_failed_send_stops_the_agent() {
    let reporter = RecordingReporter {
        fail_at: Some(1),
        ..RecordingReporter::default()
    };
    let agent = Agent::new(FixedSampler, reporter.clone(), settings(1, 2)).unwrap();

    let res = tokio::time::timeout(Duration::from_secs(60), agent.run())
        .await
        .expect("agent must stop on its own");
    let err = res.expect_err("transport failure is fatal");
    assert_eq!(err.client_code().as_str(), "TRANSPORT");

    // The failing send was the last one; the rest of the batch was dropped.
    assert_eq!(reporter.sent.lock().unwrap().len(), 2);
}

#[test]
fn zero_interval_is_rejected() {
    let res = Agent::new(FixedSampler, RecordingReporter::default(), settings(0, 10));
    assert!(matches!(res, Err(MetrikaError::Config(_))));
}

#[test]
fn interval_longer_than_a_day_is_rejected() {
    let too_long = Agent::new(
        FixedSampler,
        RecordingReporter::default(),
        settings(2, MAX_INTERVAL_SECS + 1),
    );
    assert!(matches!(too_long, Err(MetrikaError::Config(_))));

    let huge = AgentSettings {
        poll_interval: Duration::from_secs(2),
        report_interval: Duration::MAX,
    };
    let res = Agent::new(FixedSampler, RecordingReporter::default(), huge);
    assert!(matches!(res, Err(MetrikaError::Config(_))));
}
