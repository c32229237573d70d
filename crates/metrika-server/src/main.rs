//! metrika collector
//!
//! - POST /update/:kind/:name/:value, POST /update/
//! - GET /value/:kind/:name, POST /value/
//! - GET / (HTML listing)

use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use metrika_core::MetricStore;
use metrika_server::{app_state::AppState, config, router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::from_process()?;

    // RUST_LOG wins over the configured level when set.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.log_level))?;
    fmt().with_env_filter(filter).init();

    let state = AppState::new(Arc::new(MetricStore::new()));
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(&cfg.address).await?;
    tracing::info!(address = %cfg.address, "metrika-server starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("signal received, starting graceful shutdown");
}
