//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Logging, metrics → Engine → AddressServer
//!
//! Shutdown (shutdown.rs):
//!     ServerHandle::shutdown → Stop accepting → Drain (grace period) → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → ServerHandle::shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then engine, then listener
//! - Shutdown has a deadline: connections left after the grace period are closed
//! - State lives in a watch channel (state.rs), readable without locks

pub mod shutdown;
pub mod signals;
pub mod startup;
pub mod state;

pub use shutdown::ServerHandle;
pub use signals::shutdown_signal;
pub use state::{Lifecycle, LifecycleState};
