//! Request middleware.

pub mod draining;
pub mod metrics;

pub use draining::reject_while_draining;
pub use metrics::track_requests;
