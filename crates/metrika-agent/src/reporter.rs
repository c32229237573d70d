//! Delivery of metric records to a collector.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_ENCODING, CONTENT_TYPE};

use metrika_core::codec::{self, Compression};
use metrika_core::error::{MetrikaError, Result};
use metrika_core::MetricRecord;

/// Sends one record. Any error is a `MetrikaError::Transport` (or a codec
/// error) and ends the current flush.
#[async_trait]
pub trait Reporter: Send + Sync + 'static {
    async fn report(&self, record: &MetricRecord) -> Result<()>;
}

/// `POST http://{address}/update/` with a JSON body, one request per record.
pub struct HttpReporter {
    client: reqwest::Client,
    endpoint: String,
    compression: Compression,
}

impl HttpReporter {
    pub fn new(address: &str, compression: Compression, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MetrikaError::Transport(format!("http client init failed: {e}")))?;
        Ok(Self {
            client,
            endpoint: format!("http://{address}/update/"),
            compression,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Reporter for HttpReporter {
    async fn report(&self, record: &MetricRecord) -> Result<()> {
        let payload = codec::encode(record, self.compression)?;

        let mut req = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(payload.body);
        if let Some(enc) = payload.content_encoding {
            req = req.header(CONTENT_ENCODING, enc);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| MetrikaError::Transport(format!("send {} failed: {e}", record.id)))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(MetrikaError::Transport(format!(
                "collector answered {status} for {}",
                record.id
            )));
        }
        Ok(())
    }
}
