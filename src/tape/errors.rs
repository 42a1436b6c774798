//! Error types for checked tape access
//!
//! Every failure here is fatal to the current run. They fall into two groups:
//!
//! - **Storage exhaustion**: [`TapeError::CapacityExceeded`], the list or the
//!   digit stack needs a cell past the end of the store.
//! - **Internal consistency**: everything else. These mean the list structure
//!   (one head, one reachable tail) has been corrupted.

use super::cell::{Cell, Marker};
use thiserror::Error;

/// Errors raised by tape primitives
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TapeError {
    /// An access or cursor move went past the last cell of the store
    #[error("cell store exhausted: cell {index} is past capacity {capacity}")]
    CapacityExceeded { index: usize, capacity: usize },

    /// The cursor was moved before the first cell of the store
    #[error("cursor moved before the start of the store: {position} {offset:+}")]
    CursorUnderflow { position: usize, offset: isize },

    /// A marker scan ran off the store without finding its marker
    #[error("no {marker} found scanning from cell {from}")]
    MarkerNotFound { marker: Marker, from: usize },

    /// Tally arithmetic was attempted on a marker cell
    #[error("cell {index} holds the {found} where a tally was expected")]
    NotATally { index: usize, found: Cell },
}

impl TapeError {
    /// True for errors that indicate a corrupted list rather than a full store
    pub fn is_invariant_violation(&self) -> bool {
        !matches!(self, TapeError::CapacityExceeded { .. })
    }
}
