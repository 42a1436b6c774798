//! Diagnostic dump observer
//!
//! Prints a fixed window of the store after every round, nine cells to a row
//! so each row lines up with one block. The cell under the cursor is starred;
//! markers print as their raw byte codes.
//!
//! ```text
//! DBG OUTPUT:
//!  255    0    0    0    0    0    0    0    0
//! *  0    0    0    0    0    0    0    1    2
//!    0    0    0    0    0    0    0    0    0
//! ```
//!
//! After a fixed number of dumps the observer asks the run to stop.

use crate::engine::{Machine, Observer, ObserverAction};
use crate::tape::constants::{BLOCK_STRIDE, DEFAULT_DUMP_LIMIT};
use std::io::{self, Write};
use tracing::warn;

/// Range of cells shown by each dump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpWindow {
    pub start: usize,
    pub len: usize,
}

impl Default for DumpWindow {
    fn default() -> Self {
        DumpWindow { start: 0, len: 100 }
    }
}

pub struct DumpObserver<W: Write> {
    writer: W,
    window: DumpWindow,
    remaining: u64,
}

impl<W: Write> DumpObserver<W> {
    pub fn new(writer: W) -> Self {
        Self::with_limit(writer, DumpWindow::default(), DEFAULT_DUMP_LIMIT)
    }

    pub fn with_limit(writer: W, window: DumpWindow, limit: u64) -> Self {
        DumpObserver {
            writer,
            window,
            remaining: limit,
        }
    }

    /// Dumps still allowed before the observer stops the run
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn dump(&mut self, machine: &Machine) -> io::Result<()> {
        let store = machine.tape().store();
        let cursor = machine.tape().position();
        let end = self.window.start + self.window.len;

        writeln!(self.writer)?;
        writeln!(self.writer, "DBG OUTPUT:")?;
        // rows always print whole blocks, even past the end of the window
        for row in (self.window.start..end).step_by(BLOCK_STRIDE) {
            for (j, cell) in store.window(row, BLOCK_STRIDE).iter().enumerate() {
                if row + j == cursor {
                    write!(self.writer, "*{:3} ", cell.raw())?;
                } else {
                    write!(self.writer, " {:3} ", cell.raw())?;
                }
            }
            writeln!(self.writer)?;
        }
        self.writer.flush()
    }
}

impl<W: Write> Observer for DumpObserver<W> {
    fn observe(&mut self, machine: &Machine) -> ObserverAction {
        if let Err(err) = self.dump(machine) {
            warn!(error = %err, "diagnostic dump failed");
            return ObserverAction::Stop;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            ObserverAction::Stop
        } else {
            ObserverAction::Continue
        }
    }
}
