use serde::Deserialize;
use metrika_core::addr::validate_address;
use metrika_core::error::{MetrikaError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_address")]
    pub address: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            log_level: default_log_level(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        validate_address(&self.address)?;
        self.log_level
            .parse::<tracing::Level>()
            .map_err(|_| MetrikaError::Config(format!("unknown log level: {:?}", self.log_level)))?;
        Ok(())
    }
}

fn default_address() -> String {
    "localhost:8080".into()
}
fn default_log_level() -> String {
    "info".into()
}
