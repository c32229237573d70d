//! In-memory metric store.
//!
//! `name -> MetricCell`, where a cell holds at most one gauge and one counter.
//! Backed by `DashMap`, so every read and write goes through a shard lock and
//! many request tasks can share one store behind an `Arc`.
//!
//! Counter accumulation saturates at `i64::MIN` / `i64::MAX` instead of
//! wrapping. Entries are never removed.

use dashmap::DashMap;

use crate::error::{MetrikaError, Result};
use crate::model::{MetricKind, MetricRecord, MetricValue};

#[derive(Debug, Default, Clone, Copy)]
struct MetricCell {
    gauge: Option<f64>,
    counter: Option<i64>,
}

/// Non-zero entries of the store, sorted by name.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Listing {
    pub gauges: Vec<(String, f64)>,
    pub counters: Vec<(String, i64)>,
}

#[derive(Debug, Default)]
pub struct MetricStore {
    cells: DashMap<String, MetricCell>,
}

impl MetricStore {
    pub fn new() -> Self {
        Self {
            cells: DashMap::new(),
        }
    }

    /// Replace the gauge value of `name`.
    pub fn update_gauge(&self, name: &str, value: f64) {
        self.cells.entry(name.to_string()).or_default().gauge = Some(value);
    }

    /// Add `delta` to the counter of `name` and return the accumulated value.
    pub fn update_counter(&self, name: &str, delta: i64) -> i64 {
        let mut cell = self.cells.entry(name.to_string()).or_default();
        let total = cell.counter.unwrap_or(0).saturating_add(delta);
        cell.counter = Some(total);
        total
    }

    /// Apply one decoded update record.
    pub fn apply(&self, record: &MetricRecord) {
        match record.value {
            MetricValue::Gauge(v) => self.update_gauge(&record.id, v),
            MetricValue::Counter(d) => {
                let total = self.update_counter(&record.id, d);
                tracing::trace!(name = %record.id, delta = d, total, "counter updated");
            }
        }
    }

    pub fn get_gauge(&self, name: &str) -> Result<f64> {
        self.cells
            .get(name)
            .and_then(|c| c.gauge)
            .ok_or_else(|| not_found(MetricKind::Gauge, name))
    }

    pub fn get_counter(&self, name: &str) -> Result<i64> {
        self.cells
            .get(name)
            .and_then(|c| c.counter)
            .ok_or_else(|| not_found(MetricKind::Counter, name))
    }

    /// Current value of `name` for `kind`, shaped as a response record.
    pub fn lookup(&self, kind: MetricKind, name: &str) -> Result<MetricRecord> {
        match kind {
            MetricKind::Gauge => self.get_gauge(name).map(|v| MetricRecord::gauge(name, v)),
            MetricKind::Counter => self
                .get_counter(name)
                .map(|d| MetricRecord::counter(name, d)),
        }
    }

    /// Gauges and counters whose current value is non-zero, ordered by name.
    ///
    /// This is a display filter: zero entries stay reachable through `get_*`.
    pub fn list_all(&self) -> Listing {
        let mut out = Listing::default();
        for entry in self.cells.iter() {
            let cell = entry.value();
            if let Some(v) = cell.gauge.filter(|v| *v != 0.0) {
                out.gauges.push((entry.key().clone(), v));
            }
            if let Some(d) = cell.counter.filter(|d| *d != 0) {
                out.counters.push((entry.key().clone(), d));
            }
        }
        out.gauges.sort_by(|a, b| a.0.cmp(&b.0));
        out.counters.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }

    /// Number of distinct names ever updated.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

fn not_found(kind: MetricKind, name: &str) -> MetrikaError {
    MetrikaError::NotFound {
        kind,
        name: name.to_string(),
    }
}
