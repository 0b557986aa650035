//! Listen address resolution.

use std::net::SocketAddr;

use tokio::net::lookup_host;

/// Error type for listen address resolution.
#[derive(Debug, thiserror::Error)]
pub enum AddressError {
    #[error("failed to resolve listen address {address}: {source}")]
    Resolve {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("listen address {0} resolved to no socket addresses")]
    Empty(String),
}

/// Resolve `host:port` to the first socket address.
///
/// Accepts IP literals and host names (`localhost`).
pub async fn resolve(address: &str) -> Result<SocketAddr, AddressError> {
    let mut addrs = lookup_host(address).await.map_err(|source| AddressError::Resolve {
        address: address.to_string(),
        source,
    })?;
    addrs.next().ok_or_else(|| AddressError::Empty(address.to_string()))
}
