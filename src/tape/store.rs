//! Fixed-capacity cell store
//!
//! The store is allocated once, zero-initialised, and never grows. All access
//! is by absolute index and bounds-checked; relative addressing lives in
//! [`Tape`](super::Tape).

use super::cell::Cell;
use super::errors::TapeError;

/// The array of cells the automaton runs on
#[derive(Debug, Clone)]
pub struct CellStore {
    cells: Vec<Cell>,
}

impl CellStore {
    /// Create a store of `capacity` cells, all `Value(0)`
    pub fn new(capacity: usize) -> Self {
        CellStore {
            cells: vec![Cell::default(); capacity],
        }
    }

    /// Number of cells in the store
    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    /// Read the cell at `index`
    pub fn get(&self, index: usize) -> Result<Cell, TapeError> {
        self.cells
            .get(index)
            .copied()
            .ok_or(TapeError::CapacityExceeded {
                index,
                capacity: self.cells.len(),
            })
    }

    /// Overwrite the cell at `index`
    pub fn set(&mut self, index: usize, cell: Cell) -> Result<(), TapeError> {
        let capacity = self.cells.len();
        match self.cells.get_mut(index) {
            Some(slot) => {
                *slot = cell;
                Ok(())
            }
            None => Err(TapeError::CapacityExceeded { index, capacity }),
        }
    }

    /// Borrow a range of cells, clipped to the store
    pub fn window(&self, start: usize, len: usize) -> &[Cell] {
        let start = start.min(self.cells.len());
        let end = start.saturating_add(len).min(self.cells.len());
        &self.cells[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tape::cell::Marker;

    #[test]
    fn test_zero_initialised() {
        let store = CellStore::new(32);
        assert_eq!(store.capacity(), 32);
        assert!(store.window(0, 32).iter().all(Cell::is_zero));
    }

    #[test]
    fn test_out_of_range_access() {
        let mut store = CellStore::new(4);
        assert_eq!(
            store.get(4),
            Err(TapeError::CapacityExceeded {
                index: 4,
                capacity: 4
            })
        );
        assert!(store.set(7, Cell::Marker(Marker::Tail)).is_err());
        assert!(store.set(3, Cell::Marker(Marker::Tail)).is_ok());
        assert_eq!(store.get(3), Ok(Cell::Marker(Marker::Tail)));
    }

    #[test]
    fn test_window_is_clipped() {
        let store = CellStore::new(10);
        assert_eq!(store.window(8, 5).len(), 2);
        assert!(store.window(20, 5).is_empty());
    }
}
