//! Agent config: defaults < YAML file < flags < environment.

pub mod schema;

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use metrika_core::error::{MetrikaError, Result};

pub use schema::AgentConfig;

pub const ENV_ADDRESS: &str = "ADDRESS";
pub const ENV_POLL_INTERVAL: &str = "POLL_INTERVAL";
pub const ENV_REPORT_INTERVAL: &str = "REPORT_INTERVAL";

/// metrika agent: samples runtime statistics and pushes them to a collector.
#[derive(Debug, Default, Parser)]
#[command(name = "metrika-agent", version, about, long_about = None)]
pub struct Cli {
    /// Optional YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Collector address (host:port)
    #[arg(short, long)]
    pub address: Option<String>,

    /// Poll interval, in seconds
    #[arg(short, long = "poll-interval")]
    pub poll_interval: Option<u64>,

    /// Report interval, in seconds
    #[arg(short, long = "report-interval")]
    pub report_interval: Option<u64>,
}

pub fn load_from_file(path: &Path) -> Result<AgentConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| MetrikaError::Config(format!("read config {} failed: {e}", path.display())))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<AgentConfig> {
    let cfg: AgentConfig = serde_yaml::from_str(s)
        .map_err(|e| MetrikaError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Merge file, flags, and environment (looked up through `env`), then validate.
/// Empty environment values count as unset; non-numeric intervals are errors.
pub fn resolve<F>(cli: Cli, env: F) -> Result<AgentConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = match &cli.config {
        Some(path) => load_from_file(path)?,
        None => AgentConfig::default(),
    };

    if let Some(address) = cli.address {
        cfg.address = address;
    }
    if let Some(secs) = cli.poll_interval {
        cfg.poll_interval = secs;
    }
    if let Some(secs) = cli.report_interval {
        cfg.report_interval = secs;
    }

    if let Some(address) = env(ENV_ADDRESS).filter(|v| !v.is_empty()) {
        cfg.address = address;
    }
    if let Some(secs) = env_secs(&env, ENV_POLL_INTERVAL)? {
        cfg.poll_interval = secs;
    }
    if let Some(secs) = env_secs(&env, ENV_REPORT_INTERVAL)? {
        cfg.report_interval = secs;
    }

    cfg.validate()?;
    Ok(cfg)
}

fn env_secs<F>(env: &F, key: &str) -> Result<Option<u64>>
where
    F: Fn(&str) -> Option<String>,
{
    match env(key).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| MetrikaError::Config(format!("{key} must be whole seconds, got {raw:?}"))),
    }
}

/// Parse process arguments and merge the process environment.
pub fn from_process() -> Result<AgentConfig> {
    resolve(Cli::parse(), |key| std::env::var(key).ok())
}
