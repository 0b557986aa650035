//! Server state machine.
//!
//! ```text
//! Stopped ──bind──▶ Listening ──shutdown──▶ ShuttingDown ──drained──▶ Stopped
//! ```
//!
//! The state lives in a `watch` channel so handlers read it without locking
//! and tests can wait for a transition.

use std::sync::Arc;

use tokio::sync::watch;

/// Externally visible server state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Stopped,
    Listening,
    ShuttingDown,
}

// `Idle` and `Finished` both read as `Stopped`; keeping them apart stops a
// finished server from being marked as listening again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Listening,
    Draining,
    Finished,
}

impl From<Phase> for LifecycleState {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Idle | Phase::Finished => LifecycleState::Stopped,
            Phase::Listening => LifecycleState::Listening,
            Phase::Draining => LifecycleState::ShuttingDown,
        }
    }
}

/// Shared handle on the server state.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    tx: Arc<watch::Sender<Phase>>,
}

impl Lifecycle {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Phase::Idle);
        Self { tx: Arc::new(tx) }
    }

    pub fn state(&self) -> LifecycleState {
        (*self.tx.borrow()).into()
    }

    pub fn is_shutting_down(&self) -> bool {
        self.state() == LifecycleState::ShuttingDown
    }

    /// `Stopped -> Listening`. Returns false if the server already moved on.
    pub fn mark_listening(&self) -> bool {
        self.transition(|phase| phase == Phase::Idle, Phase::Listening)
    }

    /// `Listening -> ShuttingDown`. A shutdown requested before the listener
    /// is bound also counts. Returns false when already draining or stopped.
    pub fn begin_shutdown(&self) -> bool {
        self.transition(
            |phase| matches!(phase, Phase::Idle | Phase::Listening),
            Phase::Draining,
        )
    }

    /// Any state `-> Stopped`. Terminal.
    pub fn mark_stopped(&self) {
        self.tx.send_replace(Phase::Finished);
    }

    /// Resolve once the server has stopped for good.
    pub async fn stopped(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives as long as `self`, so this cannot fail.
        let _ = rx.wait_for(|phase| *phase == Phase::Finished).await;
    }

    fn transition(&self, allowed: impl Fn(Phase) -> bool, next: Phase) -> bool {
        self.tx.send_if_modified(|phase| {
            if allowed(*phase) {
                *phase = next;
                true
            } else {
                false
            }
        })
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}
