//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! LISTEN_HOST:LISTEN_PORT
//!     → address.rs (resolve to a socket address)
//!     → tls.rs (optional: load and check PEM material)
//!     → axum-server bind / bind_rustls
//! ```
//!
//! # Design Decisions
//! - TLS only when both certificate and key are configured
//! - PEM problems are reported with the offending path before binding

pub mod address;
pub mod tls;
