//! postal-gateway
//!
//! Serves address parsing and expansion over HTTP.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client ──▶ axum-server (plain / TLS) ──▶ middleware ──▶ handlers ──▶ AddressEngine
//!                                                                  (rules or libpostal)
//!
//!     env ──▶ config ──▶ startup ──▶ AddressServer::run
//!     SIGINT / SIGTERM ──▶ ServerHandle::shutdown ──▶ drain ──▶ exit
//! ```
//!
//! Configuration comes only from the environment (`LISTEN_HOST`,
//! `LISTEN_PORT`, `SSL_CERT_FILE`, `SSL_KEY_FILE`, ...).

use postal_gateway::config::load_config;
use postal_gateway::lifecycle::{shutdown_signal, startup};
use postal_gateway::observability::logging::init_logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            init_logging(false);
            tracing::error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    init_logging(config.json_logs());
    tracing::info!("postal-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    let server = startup::initialize(config)?;

    let handle = server.handle();
    tokio::spawn(async move {
        shutdown_signal().await;
        handle.shutdown();
    });

    server.run().await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
