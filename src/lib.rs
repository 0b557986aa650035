//! HTTP gateway for postal address parsing and expansion.

pub mod config;
pub mod engine;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;

pub use config::schema::GatewayConfig;
pub use engine::{AddressEngine, SharedEngine};
pub use http::AddressServer;
pub use lifecycle::ServerHandle;
