use std::time::Duration;

use serde::Deserialize;
use metrika_core::addr::validate_address;
use metrika_core::codec::Compression;
use metrika_core::error::{MetrikaError, Result};

use crate::agent::{AgentSettings, MAX_INTERVAL_SECS};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Collector address (host:port).
    #[serde(default = "default_address")]
    pub address: String,

    /// Seconds between samples.
    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,

    /// Seconds between flushes.
    #[serde(default = "default_report_interval")]
    pub report_interval: u64,

    /// Gzip request bodies.
    #[serde(default = "default_gzip")]
    pub gzip: bool,

    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            poll_interval: default_poll_interval(),
            report_interval: default_report_interval(),
            gzip: default_gzip(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl AgentConfig {
    pub fn validate(&self) -> Result<()> {
        validate_address(&self.address)?;
        for (field, secs) in [
            ("poll_interval", self.poll_interval),
            ("report_interval", self.report_interval),
        ] {
            if !(1..=MAX_INTERVAL_SECS).contains(&secs) {
                return Err(MetrikaError::Config(format!(
                    "{field} must be between 1 and {MAX_INTERVAL_SECS} seconds, got {secs}"
                )));
            }
        }
        if !(100..=60000).contains(&self.request_timeout_ms) {
            return Err(MetrikaError::Config(
                "request_timeout_ms must be between 100 and 60000".into(),
            ));
        }
        Ok(())
    }

    pub fn settings(&self) -> AgentSettings {
        AgentSettings {
            poll_interval: Duration::from_secs(self.poll_interval),
            report_interval: Duration::from_secs(self.report_interval),
        }
    }

    pub fn compression(&self) -> Compression {
        if self.gzip {
            Compression::Gzip
        } else {
            Compression::Identity
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

fn default_address() -> String {
    "localhost:8080".into()
}
fn default_poll_interval() -> u64 {
    2
}
fn default_report_interval() -> u64 {
    10
}
fn default_gzip() -> bool {
    true
}
fn default_request_timeout_ms() -> u64 {
    5000
}
