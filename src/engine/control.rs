//! Run control: cancellation, observers and stop reporting

use super::machine::Machine;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation flag, checked between rounds
///
/// Clones share the same flag, so one clone can be handed to another thread
/// (a timer or a signal handler) while the machine holds the other.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// What an observer wants the run to do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserverAction {
    Continue,
    Stop,
}

/// Hook called after every completed round
///
/// Observers see the machine read-only: the tape, the list and the round
/// counter. They cannot change the automaton, only ask the run to stop.
pub trait Observer {
    fn observe(&mut self, machine: &Machine) -> ObserverAction;
}

/// The no-op observer
impl Observer for () {
    fn observe(&mut self, _machine: &Machine) -> ObserverAction {
        ObserverAction::Continue
    }
}

/// Why a run ended without an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The configured number of terms was written
    Limit,
    /// The cancel token was raised
    Cancelled,
    /// An observer asked the run to stop
    Observer,
}

/// Outcome of a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Terms written during this run
    pub terms: u64,
    pub stop: StopReason,
}
