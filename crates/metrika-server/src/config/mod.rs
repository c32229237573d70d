//! Collector config: defaults < YAML file < flags < environment.

pub mod schema;

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use metrika_core::error::{MetrikaError, Result};

pub use schema::ServerConfig;

/// Environment variable overriding `--address`.
pub const ENV_ADDRESS: &str = "ADDRESS";
/// Environment variable overriding `--log-level`.
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";

/// metrika collector: receives metric updates and serves them back.
#[derive(Debug, Default, Parser)]
#[command(name = "metrika-server", version, about, long_about = None)]
pub struct Cli {
    /// Optional YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Listen address (host:port)
    #[arg(short, long)]
    pub address: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long = "log-level")]
    pub log_level: Option<String>,
}

pub fn load_from_file(path: &std::path::Path) -> Result<ServerConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| MetrikaError::Config(format!("read config {} failed: {e}", path.display())))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ServerConfig> {
    let cfg: ServerConfig = serde_yaml::from_str(s)
        .map_err(|e| MetrikaError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Merge file, flags, and environment (looked up through `env`), then validate.
/// Empty environment values count as unset.
pub fn resolve<F>(cli: Cli, env: F) -> Result<ServerConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = match &cli.config {
        Some(path) => load_from_file(path)?,
        None => ServerConfig::default(),
    };

    if let Some(address) = cli.address {
        cfg.address = address;
    }
    if let Some(level) = cli.log_level {
        cfg.log_level = level;
    }

    if let Some(address) = env(ENV_ADDRESS).filter(|v| !v.is_empty()) {
        cfg.address = address;
    }
    if let Some(level) = env(ENV_LOG_LEVEL).filter(|v| !v.is_empty()) {
        cfg.log_level = level;
    }

    cfg.validate()?;
    Ok(cfg)
}

/// Parse process arguments and merge the process environment.
pub fn from_process() -> Result<ServerConfig> {
    resolve(Cli::parse(), |key| std::env::var(key).ok())
}
