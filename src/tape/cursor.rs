//! The cursor and its primitive operations
//!
//! [`Tape`] owns the [`CellStore`] together with the only cursor that ever
//! touches it. Every operation is relative to the cursor; the automaton never
//! addresses a cell by absolute index once the list has been laid out.
//!
//! # Loop Discipline
//!
//! [`Tape::repeat_while_nonzero`] re-tests the cell under the cursor after each
//! full run of the body, so a body must leave the cursor on the cell that
//! decides whether to continue. [`Tape::repeat_until`] is the same loop keyed on
//! a marker instead of zero; it is how the automaton walks the blocks of the
//! digit list.

use super::cell::{Cell, Marker};
use super::constants::STRIDE;
use super::errors::TapeError;
use super::store::CellStore;

/// A cell store plus its cursor
#[derive(Debug, Clone)]
pub struct Tape {
    store: CellStore,
    position: usize,
}

impl Tape {
    /// Create a zeroed tape of `capacity` cells with the cursor on cell 0
    pub fn new(capacity: usize) -> Self {
        Tape {
            store: CellStore::new(capacity),
            position: 0,
        }
    }

    /// Current cursor index
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Read-only view of the underlying store
    pub fn store(&self) -> &CellStore {
        &self.store
    }

    /// Place the cursor on an absolute cell (used only while laying out the list)
    pub fn seek(&mut self, index: usize) -> Result<(), TapeError> {
        if index >= self.capacity() {
            return Err(TapeError::CapacityExceeded {
                index,
                capacity: self.capacity(),
            });
        }
        self.position = index;
        Ok(())
    }

    /// Resolve a cursor-relative offset to an absolute index
    fn resolve(&self, offset: isize) -> Result<usize, TapeError> {
        let capacity = self.capacity();
        match self.position.checked_add_signed(offset) {
            Some(index) if index < capacity => Ok(index),
            Some(index) => Err(TapeError::CapacityExceeded { index, capacity }),
            None if offset < 0 => Err(TapeError::CursorUnderflow {
                position: self.position,
                offset,
            }),
            None => Err(TapeError::CapacityExceeded {
                index: usize::MAX,
                capacity,
            }),
        }
    }

    /// Move the cursor by `offset` cells
    pub fn shift(&mut self, offset: isize) -> Result<(), TapeError> {
        self.position = self.resolve(offset)?;
        Ok(())
    }

    /// Read the cell under the cursor
    pub fn read(&self) -> Result<Cell, TapeError> {
        self.read_at(0)
    }

    /// Read the cell `offset` cells from the cursor
    pub fn read_at(&self, offset: isize) -> Result<Cell, TapeError> {
        self.store.get(self.resolve(offset)?)
    }

    pub fn write(&mut self, cell: Cell) -> Result<(), TapeError> {
        self.write_at(0, cell)
    }

    pub fn write_at(&mut self, offset: isize, cell: Cell) -> Result<(), TapeError> {
        let index = self.resolve(offset)?;
        self.store.set(index, cell)
    }

    /// Read a tally `offset` cells from the cursor, rejecting markers
    pub fn value_at(&self, offset: isize) -> Result<u8, TapeError> {
        let index = self.resolve(offset)?;
        let cell = self.store.get(index)?;
        cell.as_value()
            .ok_or(TapeError::NotATally { index, found: cell })
    }

    /// Add `amount` (wrapping) to the tally `offset` cells from the cursor
    pub fn add(&mut self, offset: isize, amount: u8) -> Result<(), TapeError> {
        let value = self.value_at(offset)?;
        self.write_at(offset, Cell::Value(value.wrapping_add(amount)))
    }

    /// Increment the tally `offset` cells from the cursor
    pub fn inc(&mut self, offset: isize) -> Result<(), TapeError> {
        self.add(offset, 1)
    }

    /// Decrement the tally `offset` cells from the cursor
    pub fn dec(&mut self, offset: isize) -> Result<(), TapeError> {
        let value = self.value_at(offset)?;
        self.write_at(offset, Cell::Value(value.wrapping_sub(1)))
    }

    /// Test the cell under the cursor for zero
    pub fn is_zero(&self) -> Result<bool, TapeError> {
        Ok(self.read()?.is_zero())
    }

    /// Run `body` while the cell under the cursor is nonzero
    pub fn repeat_while_nonzero<F>(&mut self, mut body: F) -> Result<(), TapeError>
    where
        F: FnMut(&mut Tape) -> Result<(), TapeError>,
    {
        while !self.is_zero()? {
            body(self)?;
        }
        Ok(())
    }

    /// Run `body` while the cell under the cursor is not `marker`
    pub fn repeat_until<F>(&mut self, marker: Marker, mut body: F) -> Result<(), TapeError>
    where
        F: FnMut(&mut Tape) -> Result<(), TapeError>,
    {
        while !self.read()?.is_marker(marker) {
            body(self)?;
        }
        Ok(())
    }

    /// Advance one block at a time until `marker` is under the cursor
    pub fn scan_forward_until(&mut self, marker: Marker) -> Result<(), TapeError> {
        self.scan_until(marker, STRIDE)
    }

    /// Retreat one block at a time until `marker` is under the cursor
    pub fn scan_backward_until(&mut self, marker: Marker) -> Result<(), TapeError> {
        self.scan_until(marker, -STRIDE)
    }

    /// Retreat one cell at a time until `marker` is under the cursor
    pub fn scan_back_to(&mut self, marker: Marker) -> Result<(), TapeError> {
        self.scan_until(marker, -1)
    }

    fn scan_until(&mut self, marker: Marker, step: isize) -> Result<(), TapeError> {
        let from = self.position;
        while !self.read()?.is_marker(marker) {
            self.position = self
                .resolve(step)
                .map_err(|_| TapeError::MarkerNotFound { marker, from })?;
        }
        Ok(())
    }

    /// Advance one cell at a time until the cell under the cursor is zero
    ///
    /// Running off the end here means the store is full, not that the list is
    /// corrupt, so the capacity error is passed through unchanged.
    pub fn skip_nonzero(&mut self) -> Result<(), TapeError> {
        self.repeat_while_nonzero(|tape| tape.shift(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_is_bounds_checked() {
        let mut tape = Tape::new(10);
        tape.shift(9).unwrap();
        assert_eq!(tape.position(), 9);
        assert_eq!(
            tape.shift(1),
            Err(TapeError::CapacityExceeded {
                index: 10,
                capacity: 10
            })
        );
        assert_eq!(tape.position(), 9);

        tape.seek(2).unwrap();
        assert_eq!(
            tape.shift(-3),
            Err(TapeError::CursorUnderflow {
                position: 2,
                offset: -3
            })
        );
    }

    #[test]
    fn test_inc_dec_wrap() {
        let mut tape = Tape::new(4);
        tape.dec(1).unwrap();
        assert_eq!(tape.read_at(1), Ok(Cell::Value(255)));
        tape.inc(1).unwrap();
        assert_eq!(tape.read_at(1), Ok(Cell::Value(0)));
        tape.add(2, 250).unwrap();
        tape.add(2, 10).unwrap();
        assert_eq!(tape.value_at(2), Ok(4));
    }

    #[test]
    fn test_arithmetic_on_marker_fails() {
        let mut tape = Tape::new(4);
        tape.write_at(3, Cell::Marker(Marker::Tail)).unwrap();
        let err = tape.inc(3).unwrap_err();
        assert!(err.is_invariant_violation());
        assert!(matches!(err, TapeError::NotATally { index: 3, .. }));
    }

    #[test]
    fn test_repeat_while_nonzero_retests_after_body() {
        let mut tape = Tape::new(4);
        tape.write(Cell::Value(5)).unwrap();
        let mut runs = 0;
        tape.repeat_while_nonzero(|t| {
            runs += 1;
            t.dec(0)?;
            t.inc(1)
        })
        .unwrap();
        assert_eq!(runs, 5);
        assert_eq!(tape.value_at(1), Ok(5));
    }

    #[test]
    fn test_scans_stop_on_marker() {
        let mut tape = Tape::new(60);
        tape.write_at(9, Cell::Marker(Marker::Head)).unwrap();
        tape.write_at(36, Cell::Marker(Marker::Tail)).unwrap();
        tape.seek(9).unwrap();
        tape.scan_forward_until(Marker::Tail).unwrap();
        assert_eq!(tape.position(), 36);
        tape.scan_backward_until(Marker::Head).unwrap();
        assert_eq!(tape.position(), 9);
    }

    #[test]
    fn test_scan_off_the_store_is_an_invariant_violation() {
        let mut tape = Tape::new(40);
        tape.seek(4).unwrap();
        let err = tape.scan_forward_until(Marker::Tail).unwrap_err();
        assert_eq!(
            err,
            TapeError::MarkerNotFound {
                marker: Marker::Tail,
                from: 4
            }
        );
        assert!(err.is_invariant_violation());
    }

    #[test]
    fn test_skip_nonzero_reports_capacity() {
        let mut tape = Tape::new(3);
        for i in 0..3 {
            tape.write_at(i, Cell::Value(1)).unwrap();
        }
        let err = tape.skip_nonzero().unwrap_err();
        assert!(!err.is_invariant_violation());
    }
}
