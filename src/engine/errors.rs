//! Errors raised while running the machine

use crate::tape::TapeError;
use std::io;
use thiserror::Error;

/// Anything that ends a run early
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Tape(#[from] TapeError),

    /// The output sink rejected a term
    #[error("failed to write term: {0}")]
    Output(#[from] io::Error),
}

impl RunError {
    /// True when the run stopped because the cell store is full
    pub fn is_capacity_exhausted(&self) -> bool {
        matches!(self, RunError::Tape(TapeError::CapacityExceeded { .. }))
    }
}
