//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the five address routes
//! - Wire up middleware (request ID, tracing, body limit, metrics, draining)
//! - Bind plaintext or TLS through axum-server
//! - Drive the lifecycle state machine around `serve`

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::engine::SharedEngine;
use crate::http::handlers;
use crate::http::middleware::{reject_while_draining, track_requests};
use crate::http::request::{RequestSpan, UuidRequestId};
use crate::lifecycle::{Lifecycle, ServerHandle};
use crate::net::address::{resolve, AddressError};
use crate::net::tls::{load_tls_config, TlsError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: SharedEngine,
    pub strict_json: bool,
    pub max_batch_size: Option<usize>,
}

/// Error type for running the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Address(#[from] AddressError),

    #[error(transparent)]
    Tls(#[from] TlsError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// HTTP server for the address gateway.
pub struct AddressServer {
    config: GatewayConfig,
    engine: SharedEngine,
    handle: ServerHandle,
}

impl AddressServer {
    /// Create a server. Nothing is bound until [`run`](Self::run).
    pub fn new(config: GatewayConfig, engine: SharedEngine) -> Self {
        let handle = ServerHandle::new(config.shutdown_grace());
        Self {
            config,
            engine,
            handle,
        }
    }

    /// Handle for observing and stopping the server from another task.
    pub fn handle(&self) -> ServerHandle {
        self.handle.clone()
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// The fully layered router, without a listener.
    pub fn router(&self) -> Router {
        let state = AppState {
            engine: self.engine.clone(),
            strict_json: self.config.strict_json,
            max_batch_size: self.config.max_batch_size,
        };
        build_router(state, self.handle.lifecycle().clone(), self.config.max_body_bytes)
    }

    /// Bind and serve until shutdown completes.
    ///
    /// Returns after [`ServerHandle::shutdown`] once in-flight requests have
    /// finished or the grace period has elapsed.
    ///
    /// The lifecycle ends in `Stopped` on every path, including resolve and
    /// TLS failures before anything is bound.
    pub async fn run(self) -> Result<(), ServerError> {
        let result = self.serve().await;
        self.handle.lifecycle().mark_stopped();
        result?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    async fn serve(&self) -> Result<(), ServerError> {
        let address = resolve(&self.config.listen_address()).await?;
        let tls = match self.config.tls() {
            Some(tls) => Some(load_tls_config(&tls.cert_path, &tls.key_path).await?),
            None => None,
        };
        let secure = tls.is_some();
        let app = self.router().into_make_service();
        let inner = self.handle.server_handle();

        let announcer = {
            let handle = self.handle.clone();
            tokio::spawn(async move {
                if let Some(addr) = handle.listening().await {
                    tracing::info!(address = %addr, tls = secure, "Listening for connections");
                }
            })
        };

        tracing::info!(
            address = %address,
            tls = secure,
            engine = self.engine.name(),
            "HTTP server starting"
        );

        let result = match tls {
            Some(tls) => {
                axum_server::bind_rustls(address, tls)
                    .handle(inner)
                    .serve(app)
                    .await
            }
            None => axum_server::bind(address).handle(inner).serve(app).await,
        };

        announcer.abort();
        Ok(result?)
    }
}

/// Build the Axum router with all middleware layers.
fn build_router(state: AppState, lifecycle: Lifecycle, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/expand", post(handlers::expand))
        .route("/parser", post(handlers::parse))
        .route("/bulk/expand", post(handlers::bulk_expand))
        .route("/bulk/parser", post(handlers::bulk_parse))
        .route_layer(middleware::from_fn(track_requests))
        .layer(middleware::from_fn_with_state(lifecycle, reject_while_draining))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                .layer(TraceLayer::new_for_http().make_span_with(RequestSpan))
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
}
