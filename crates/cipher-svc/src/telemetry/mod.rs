//! Structured logging for the text-cipher service.
//!
//! # Telemetry invariants
//!
//! - **No plaintext, tokens or key material** in any log field. Handlers log
//!   error kinds and lengths only.
//! - Log level is configurable via `LOG_LEVEL` (default: `info`); `RUST_LOG`
//!   takes precedence when set.

use anyhow::{Context, Result};
use tracing::{info_span, Span};
use tracing_subscriber::EnvFilter;

/// Value of the `service` field on the root span.
pub const SERVICE_NAME: &str = "cipher-svc";

/// Initialise the global tracing subscriber.
///
/// Outputs JSON lines to stdout, each carrying the fields of the span it was
/// emitted in.
///
/// # Errors
///
/// Returns an error if `log_level` is not a valid filter directive or the
/// subscriber has already been set.
pub fn init(log_level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(from_env) => from_env,
        Err(_) => filter_for(log_level)?,
    };

    tracing_subscriber::fmt()
        .json()
        .with_current_span(true)
        .with_span_list(false)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise tracing subscriber: {e}"))
}

/// Root span for the process; startup and shutdown events are logged inside it.
pub fn service_span() -> Span {
    info_span!("service", service = SERVICE_NAME, version = env!("CARGO_PKG_VERSION"))
}

/// Parse `LOG_LEVEL` strictly; a typo fails startup instead of silencing logs.
fn filter_for(log_level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(log_level).with_context(|| format!("invalid LOG_LEVEL: {log_level:?}"))
}
