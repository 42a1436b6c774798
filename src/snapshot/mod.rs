// Snapshot history for stepping the machine backwards in the viewer

pub mod dump;

use crate::engine::Machine;
use crate::tape::constants::{BLOCK_STRIDE, TERM_SEPARATOR};
use crate::tape::Cell;
use std::mem::size_of;
use thiserror::Error;

pub use dump::{DumpObserver, DumpWindow};

/// Record of the terms written so far, one entry per term
#[derive(Debug, Clone, Default)]
pub struct OutputLog {
    terms: Vec<String>,
    partial: String,
}

impl OutputLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw machine output, splitting it into terms on the separator
    pub fn record(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            if byte == TERM_SEPARATOR {
                self.terms.push(std::mem::take(&mut self.partial));
            } else {
                self.partial.push(char::from(byte));
            }
        }
    }

    /// Completed terms, oldest first
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// State of the machine between two rounds
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub round: u64,
    pub cursor: usize,
    pub head: usize,
    pub tail: usize,
    /// Cells from the start of the store up to and including the block past the tail
    pub cells: Vec<Cell>,
}

impl Snapshot {
    pub fn capture(machine: &Machine) -> Self {
        let list = machine.list();
        let store = machine.tape().store();
        let end = list.tail() + 2 * BLOCK_STRIDE;
        Snapshot {
            round: machine.round(),
            cursor: machine.tape().position(),
            head: list.head(),
            tail: list.tail(),
            cells: store.window(0, end).to_vec(),
        }
    }

    /// Number of data blocks between head and tail
    pub fn blocks(&self) -> usize {
        (self.tail - self.head) / BLOCK_STRIDE - 1
    }

    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        size_of::<Snapshot>() + self.cells.len() * size_of::<Cell>()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("snapshot memory limit exceeded: {used} + {needed} > {limit} bytes")]
    LimitExceeded {
        used: usize,
        needed: usize,
        limit: usize,
    },
}

/// Snapshots of every round reached so far, under a byte budget
#[derive(Debug)]
pub struct SnapshotHistory {
    snapshots: Vec<Snapshot>,
    max_memory: usize,
    current_memory: usize,
}

impl SnapshotHistory {
    pub fn new(max_memory: usize) -> Self {
        SnapshotHistory {
            snapshots: Vec::new(),
            max_memory,
            current_memory: 0,
        }
    }

    /// Add a snapshot to history
    pub fn push(&mut self, snapshot: Snapshot) -> Result<(), HistoryError> {
        let needed = snapshot.estimated_size();
        if self.current_memory + needed > self.max_memory {
            return Err(HistoryError::LimitExceeded {
                used: self.current_memory,
                needed,
                limit: self.max_memory,
            });
        }

        self.current_memory += needed;
        self.snapshots.push(snapshot);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }
}
