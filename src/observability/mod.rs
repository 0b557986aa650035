//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! request → SetRequestId (x-request-id) → TraceLayer span → handlers
//!     → logging.rs (structured events, pretty or JSON)
//!     → metrics.rs (counters and histograms, optional Prometheus listener)
//! ```
//!
//! # Design Decisions
//! - The request ID is attached to the trace span, so every event inside a
//!   request carries it
//! - Metrics are recorded unconditionally; without an exporter they cost nothing

pub mod logging;
pub mod metrics;
