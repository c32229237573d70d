//! metrika agent
//!
//! Samples host/process statistics every poll interval and pushes them to
//! `http://{address}/update/` every report interval. Exits non-zero on the
//! first failed delivery.

use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use metrika_agent::{config, Agent, HttpReporter, SystemSampler};
use metrika_core::Result;

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, code = e.client_code().as_str(), "metrika-agent stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let cfg = config::from_process()?;
    let reporter = HttpReporter::new(&cfg.address, cfg.compression(), cfg.request_timeout())?;
    tracing::info!(
        endpoint = reporter.endpoint(),
        poll_interval_s = cfg.poll_interval,
        report_interval_s = cfg.report_interval,
        gzip = cfg.gzip,
        "metrika-agent starting"
    );

    let agent = Agent::new(SystemSampler::new(), reporter, cfg.settings())?;
    tokio::select! {
        res = agent.run() => res,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("signal received, stopping agent");
            Ok(())
        }
    }
}
