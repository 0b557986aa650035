//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment (LISTEN_HOST, LISTEN_PORT, SSL_CERT_FILE, ...)
//!     → loader.rs (collect & deserialize via the `config` crate)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → handed to the engine factory and the server at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload
//! - All fields have defaults so an empty environment works
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_config_from, ConfigError};
pub use schema::{GatewayConfig, TlsConfig};
pub use validation::ValidationError;
