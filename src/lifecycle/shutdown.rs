//! Shutdown coordination for the gateway.

use std::net::SocketAddr;
use std::time::Duration;

use axum_server::Handle;

use crate::lifecycle::state::{Lifecycle, LifecycleState};

/// Control handle for a running [`AddressServer`](crate::http::AddressServer).
///
/// Cheap to clone; every clone controls the same server.
#[derive(Clone)]
pub struct ServerHandle {
    inner: Handle,
    lifecycle: Lifecycle,
    grace: Duration,
}

impl ServerHandle {
    pub fn new(grace: Duration) -> Self {
        Self {
            inner: Handle::new(),
            lifecycle: Lifecycle::new(),
            grace,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub fn grace_period(&self) -> Duration {
        self.grace
    }

    /// Number of open client connections.
    pub fn connection_count(&self) -> usize {
        self.inner.connection_count()
    }

    /// Wait until the listener is bound and return its address.
    ///
    /// Returns `None` if binding failed.
    pub async fn listening(&self) -> Option<SocketAddr> {
        let addr = self.inner.listening().await?;
        self.lifecycle.mark_listening();
        Some(addr)
    }

    /// Stop accepting connections and give in-flight requests the grace
    /// period to finish. Connections still open afterwards are closed.
    pub fn shutdown(&self) {
        if self.lifecycle.begin_shutdown() {
            tracing::info!(
                grace_secs = self.grace.as_secs(),
                connections = self.inner.connection_count(),
                "Graceful shutdown started"
            );
        }
        self.inner.graceful_shutdown(Some(self.grace));
    }

    pub(crate) fn server_handle(&self) -> Handle {
        self.inner.clone()
    }
}

impl Default for ServerHandle {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shutdown_moves_to_shutting_down() {
        let handle = ServerHandle::new(Duration::from_secs(1));
        handle.lifecycle().mark_listening();

        handle.shutdown();
        assert_eq!(handle.state(), LifecycleState::ShuttingDown);

        // a second call is harmless
        handle.shutdown();
        assert_eq!(handle.state(), LifecycleState::ShuttingDown);
    }

    #[test]
    fn clones_share_state() {
        let handle = ServerHandle::default();
        let clone = handle.clone();
        handle.lifecycle().mark_listening();
        assert_eq!(clone.state(), LifecycleState::Listening);
        assert_eq!(clone.grace_period(), Duration::from_secs(10));
    }
}
