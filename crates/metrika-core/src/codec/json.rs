//! Body form (JSON, optional gzip envelope).
//!
//! Wire shape: `{"id": "...", "type": "gauge"|"counter", "value"?: f64, "delta"?: i64}`.
//! `kind` is accepted as an alias of `type` on input. Unknown extra fields are
//! ignored so newer producers can add fields without breaking older collectors.

use std::borrow::Cow;
use std::io::{Read, Write};

use bytes::Bytes;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use serde::{Deserialize, Serialize};

use crate::error::{MetrikaError, Result};
use crate::model::{MetricKind, MetricQuery, MetricRecord, MetricValue};

/// Content-encoding token for gzip bodies.
pub const GZIP: &str = "gzip";

/// Upper bound on an inflated body; larger payloads are rejected as malformed.
pub const MAX_DECODED_BYTES: u64 = 1 << 20;

/// Envelope applied around the JSON body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    #[default]
    Identity,
    Gzip,
}

/// Encoded body plus the content-encoding value to send alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub body: Bytes,
    pub content_encoding: Option<&'static str>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMetric {
    id: String,
    #[serde(rename = "type", alias = "kind")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    delta: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireQuery {
    id: String,
    #[serde(rename = "type", alias = "kind")]
    kind: String,
}

impl From<&MetricRecord> for WireMetric {
    fn from(r: &MetricRecord) -> Self {
        let (delta, value) = match r.value {
            MetricValue::Gauge(v) => (None, Some(v)),
            MetricValue::Counter(d) => (Some(d), None),
        };
        Self {
            id: r.id.clone(),
            kind: r.kind().as_str().to_string(),
            delta,
            value,
        }
    }
}

impl TryFrom<WireMetric> for MetricRecord {
    type Error = MetrikaError;

    fn try_from(w: WireMetric) -> Result<Self> {
        let kind = wire_kind(&w.kind)?;
        if w.id.is_empty() {
            return Err(MetrikaError::MalformedPayload("metric id is empty".into()));
        }
        let value = match (kind, w.value, w.delta) {
            (MetricKind::Gauge, Some(v), None) => MetricValue::Gauge(v),
            (MetricKind::Counter, None, Some(d)) => MetricValue::Counter(d),
            (_, Some(_), Some(_)) => {
                return Err(MetrikaError::MalformedPayload(
                    "both value and delta are set".into(),
                ))
            }
            (MetricKind::Gauge, None, _) => {
                return Err(MetrikaError::MalformedPayload(format!(
                    "gauge {} has no value",
                    w.id
                )))
            }
            (MetricKind::Counter, _, None) => {
                return Err(MetrikaError::MalformedPayload(format!(
                    "counter {} has no delta",
                    w.id
                )))
            }
        };
        Ok(MetricRecord { id: w.id, value })
    }
}

fn wire_kind(raw: &str) -> Result<MetricKind> {
    raw.parse()
        .map_err(|_| MetrikaError::MalformedPayload(format!("unknown metric type: {raw:?}")))
}

/// Encode one record. Identical input gives identical bytes (gzip header
/// carries no timestamp).
pub fn encode(record: &MetricRecord, compression: Compression) -> Result<Payload> {
    if let MetricValue::Gauge(v) = record.value {
        if !v.is_finite() {
            return Err(MetrikaError::InvalidValue(format!(
                "gauge {} is not finite: {v}",
                record.id
            )));
        }
    }
    let json = serde_json::to_vec(&WireMetric::from(record))
        .map_err(|e| MetrikaError::Internal(format!("encode metric failed: {e}")))?;
    wrap(json, compression)
}

/// Decode one record from a body and its content-encoding header value.
pub fn decode(body: &[u8], content_encoding: Option<&str>) -> Result<MetricRecord> {
    let raw = inflate(body, content_encoding)?;
    let wire: WireMetric = serde_json::from_slice(&raw)
        .map_err(|e| MetrikaError::MalformedPayload(format!("invalid metric json: {e}")))?;
    MetricRecord::try_from(wire)
}

pub fn encode_query(query: &MetricQuery, compression: Compression) -> Result<Payload> {
    let json = serde_json::to_vec(&WireQuery {
        id: query.id.clone(),
        kind: query.kind.as_str().to_string(),
    })
    .map_err(|e| MetrikaError::Internal(format!("encode query failed: {e}")))?;
    wrap(json, compression)
}

/// Decode a `{id, type}` read request. Value fields, if present, are ignored.
pub fn decode_query(body: &[u8], content_encoding: Option<&str>) -> Result<MetricQuery> {
    let raw = inflate(body, content_encoding)?;
    let wire: WireQuery = serde_json::from_slice(&raw)
        .map_err(|e| MetrikaError::MalformedPayload(format!("invalid query json: {e}")))?;
    if wire.id.is_empty() {
        return Err(MetrikaError::MalformedPayload("metric id is empty".into()));
    }
    Ok(MetricQuery {
        kind: wire_kind(&wire.kind)?,
        id: wire.id,
    })
}

fn wrap(json: Vec<u8>, compression: Compression) -> Result<Payload> {
    match compression {
        Compression::Identity => Ok(Payload {
            body: Bytes::from(json),
            content_encoding: None,
        }),
        Compression::Gzip => {
            let mut enc = GzEncoder::new(
                Vec::with_capacity(json.len()),
                flate2::Compression::default(),
            );
            enc.write_all(&json)
                .and_then(|_| enc.finish())
                .map(|gz| Payload {
                    body: Bytes::from(gz),
                    content_encoding: Some(GZIP),
                })
                .map_err(|e| MetrikaError::Internal(format!("gzip failed: {e}")))
        }
    }
}

fn inflate<'a>(body: &'a [u8], content_encoding: Option<&str>) -> Result<Cow<'a, [u8]>> {
    match content_encoding.map(str::trim) {
        None | Some("") => Ok(Cow::Borrowed(body)),
        Some(enc) if enc.eq_ignore_ascii_case("identity") => Ok(Cow::Borrowed(body)),
        Some(enc) if enc.eq_ignore_ascii_case(GZIP) || enc.eq_ignore_ascii_case("x-gzip") => {
            let mut out = Vec::new();
            GzDecoder::new(body)
                .take(MAX_DECODED_BYTES + 1)
                .read_to_end(&mut out)
                .map_err(|e| MetrikaError::MalformedPayload(format!("invalid gzip body: {e}")))?;
            if out.len() as u64 > MAX_DECODED_BYTES {
                return Err(MetrikaError::MalformedPayload(
                    "inflated body exceeds size limit".into(),
                ));
            }
            Ok(Cow::Owned(out))
        }
        Some(other) => Err(MetrikaError::MalformedPayload(format!(
            "unsupported content encoding: {other}"
        ))),
    }
}
