//! Path form: `/update/{kind}/{name}/{value}` segments.

use crate::error::{MetrikaError, Result};
use crate::model::{MetricKind, MetricRecord, MetricValue};

pub fn parse_kind(raw: &str) -> Result<MetricKind> {
    raw.parse()
}

/// Parse a raw value per kind: finite `f64` for gauges, `i64` for counters.
pub fn parse_value(kind: MetricKind, raw: &str) -> Result<MetricValue> {
    match kind {
        MetricKind::Gauge => match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(MetricValue::Gauge(v)),
            _ => Err(MetrikaError::InvalidValue(format!("not a gauge value: {raw:?}"))),
        },
        MetricKind::Counter => raw
            .parse::<i64>()
            .map(MetricValue::Counter)
            .map_err(|_| MetrikaError::InvalidValue(format!("not a counter value: {raw:?}"))),
    }
}

/// Kind is checked first, so `histogram/x/abc` reports the kind, not the value.
pub fn parse_update(kind: &str, name: &str, raw_value: &str) -> Result<MetricRecord> {
    let kind = parse_kind(kind)?;
    if name.is_empty() {
        return Err(MetrikaError::InvalidValue("metric name is empty".into()));
    }
    Ok(MetricRecord {
        id: name.to_string(),
        value: parse_value(kind, raw_value)?,
    })
}

/// Plain-text rendering used by the path-form read endpoint.
pub fn format_value(value: MetricValue) -> String {
    match value {
        MetricValue::Gauge(v) => v.to_string(),
        MetricValue::Counter(d) => d.to_string(),
    }
}
