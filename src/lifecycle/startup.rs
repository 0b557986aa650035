//! Startup orchestration.
//!
//! Fail fast: any error here is fatal and ends the process before a socket
//! is bound.

use crate::config::GatewayConfig;
use crate::engine::{self, EngineError};
use crate::http::AddressServer;
use crate::observability::metrics::{init_metrics, MetricsError};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Metrics(#[from] MetricsError),
}

/// Initialize metrics and the engine, then build the server.
///
/// Logging must already be installed. Must run inside a Tokio runtime when
/// `METRICS_ADDRESS` is set.
pub fn initialize(config: GatewayConfig) -> Result<AddressServer, StartupError> {
    if config.tls_half_configured() {
        tracing::warn!(
            "Only one of SSL_CERT_FILE and SSL_KEY_FILE is set; serving plaintext HTTP"
        );
    }

    if let Some(addr) = config.metrics_address {
        init_metrics(addr)?;
    }

    let engine = engine::from_config(&config)?;

    tracing::info!(
        listen = %config.listen_address(),
        tls = config.tls().is_some(),
        engine = engine.name(),
        grace_secs = config.shutdown_grace_secs,
        max_batch_size = ?config.max_batch_size,
        strict_json = config.strict_json,
        "Configuration loaded"
    );

    Ok(AddressServer::new(config, engine))
}
