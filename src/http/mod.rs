//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection (axum-server)
//!     → request.rs (x-request-id, request span)
//!     → middleware/ (draining check, per-route metrics)
//!     → handlers.rs (decode body, run the engine off the executor)
//!     → batch.rs (per-item loop for the bulk routes)
//!     → response.rs (JSON error bodies)
//! ```

pub mod batch;
pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;
pub mod types;

pub use request::X_REQUEST_ID;
pub use response::ApiError;
pub use server::{AddressServer, AppState, ServerError};
