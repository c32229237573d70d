//! Metric data model.
//!
//! A record carries exactly one typed value, so the "value iff gauge, delta iff
//! counter" rule of the wire format is enforced by construction here and only
//! has to be checked once, at decode time.

use std::fmt;
use std::str::FromStr;

use crate::error::MetrikaError;

/// Metric kind, distinguished by combine semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    /// Last-write-wins `f64`.
    Gauge,
    /// Accumulating `i64`.
    Counter,
}

impl MetricKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Gauge => "gauge",
            MetricKind::Counter => "counter",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = MetrikaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gauge" => Ok(MetricKind::Gauge),
            "counter" => Ok(MetricKind::Counter),
            other => Err(MetrikaError::UnknownKind(other.to_string())),
        }
    }
}

/// Typed metric value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Gauge(f64),
    Counter(i64),
}

impl MetricValue {
    pub fn kind(&self) -> MetricKind {
        match self {
            MetricValue::Gauge(_) => MetricKind::Gauge,
            MetricValue::Counter(_) => MetricKind::Counter,
        }
    }
}

/// One metric update or query answer (`{id, type, value|delta}` on the wire).
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRecord {
    pub id: String,
    pub value: MetricValue,
}

impl MetricRecord {
    pub fn gauge(id: impl Into<String>, value: f64) -> Self {
        Self {
            id: id.into(),
            value: MetricValue::Gauge(value),
        }
    }

    pub fn counter(id: impl Into<String>, delta: i64) -> Self {
        Self {
            id: id.into(),
            value: MetricValue::Counter(delta),
        }
    }

    pub fn kind(&self) -> MetricKind {
        self.value.kind()
    }
}

/// Body-form read request (`{id, type}` on the wire).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricQuery {
    pub id: String,
    pub kind: MetricKind,
}

impl MetricQuery {
    pub fn new(id: impl Into<String>, kind: MetricKind) -> Self {
        Self { id: id.into(), kind }
    }
}
