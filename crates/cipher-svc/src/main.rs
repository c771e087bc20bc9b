//! `cipher-svc`: HTTP host for a single shared text encryptor.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise structured JSON logging.
//! 3. Register the shared encryptor and try it once, so a key the cipher
//!    rejects stops the process before it listens.
//! 4. Build the Axum router and serve until Ctrl-C / SIGTERM.

mod config;
mod server;
mod telemetry;

use std::time::Duration;

use anyhow::{Context, Result};
use text_cipher::TextEncryptor;
use tracing::{info, Instrument};

use config::Config;
use server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;

    run(cfg).instrument(telemetry::service_span()).await
}

/// Steps 3 and 4, inside the `service` span.
async fn run(cfg: Config) -> Result<()> {
    info!(listen_port = cfg.listen_port, "cipher-svc starting");

    // -----------------------------------------------------------------------
    // 3. Shared encryptor
    // -----------------------------------------------------------------------
    let encryptor = text_cipher::register(&cfg.encryption_key);
    encryptor
        .encrypt_async("startup check")
        .await
        .context("ENCRYPTION_KEY rejected by cipher")?;
    info!("encryptor ready");

    // -----------------------------------------------------------------------
    // 4. HTTP server
    // -----------------------------------------------------------------------
    let state = AppState::new(encryptor);
    let router = server::router::build(state, Duration::from_secs(cfg.request_timeout_secs));

    let addr: std::net::SocketAddr = ([0, 0, 0, 0], cfg.listen_port).into();
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("cipher-svc stopped");
    Ok(())
}

/// Resolve on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl-C");
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
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
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
    info!("shutdown signal received");
}
