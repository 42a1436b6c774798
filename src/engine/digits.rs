//! Digit-list encoding of the two live terms
//!
//! Both terms of the sequence live in one chain of 9-cell blocks. The chain
//! starts at a block whose first cell is the [`Marker::Head`] and ends at a
//! block whose first cell is the [`Marker::Tail`]. Every block in between is a
//! data block holding one base-256 limb of each term:
//!
//! ```text
//!  offset  0       1      2    3     4      5         6          7         8
//!        MARKER  CARRY  SUM  WORK  PROBE  QUOTIENT  REMAINDER  PREVIOUS  CURRENT
//! ```
//!
//! Limbs are little-endian: the first data block after the head holds the
//! least-significant limb. The two terms are two *lanes* of the same chain, so
//! a shorter term is simply zero in its higher blocks.
//!
//! # Invariants
//!
//! - Between rounds the top data block is zero in both lanes, so a carry out
//!   of the sum always has a block to land in.
//! - Scratch fields (`CARRY` through `REMAINDER`) are zero between rounds.
//! - The tail block is scratch space for the block below it; the decimal digit
//!   stack starts one block past the tail.

use super::tally;
use crate::tape::constants::{BLOCK_STRIDE, HEAD_INDEX, STRIDE};
use crate::tape::{Cell, Marker, Tape, TapeError};
use tracing::info;

pub const MARKER: isize = 0;
/// Carry out of the block sum; ripple flag during division
pub const CARRY: isize = 1;
/// Low byte of the block sum
pub const SUM: isize = 2;
/// Addend and stroke counter
pub const WORK: isize = 3;
pub const PROBE: isize = 4;
pub const QUOTIENT: isize = 5;
pub const REMAINDER: isize = 6;
pub const PREVIOUS: isize = 7;
pub const CURRENT: isize = 8;

/// One of the two integers stored across the blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lane {
    Previous,
    Current,
}

impl Lane {
    /// Field offset of this lane inside a block
    pub fn offset(self) -> isize {
        match self {
            Lane::Previous => PREVIOUS,
            Lane::Current => CURRENT,
        }
    }
}

/// Location of the digit list on the tape
///
/// The tape itself is the source of truth; the cached indices let callers
/// read limbs and lay out views without walking the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitList {
    head: usize,
    tail: usize,
}

impl DigitList {
    /// Lay out the seed terms 0 and 1
    pub fn seed(tape: &mut Tape) -> Result<Self, TapeError> {
        Self::load(tape, &[0], &[1])
    }

    /// Lay out arbitrary operands given as little-endian base-256 limbs
    ///
    /// One extra zero block is always placed on top. The cursor is left on the
    /// first data block.
    pub fn load(tape: &mut Tape, previous: &[u8], current: &[u8]) -> Result<Self, TapeError> {
        let blocks = previous.len().max(current.len()) + 1;
        let tail = HEAD_INDEX + (blocks + 1) * BLOCK_STRIDE;
        let last = tail + BLOCK_STRIDE - 1;
        if last >= tape.capacity() {
            return Err(TapeError::CapacityExceeded {
                index: last,
                capacity: tape.capacity(),
            });
        }

        tape.seek(HEAD_INDEX)?;
        tape.write(Cell::Marker(Marker::Head))?;
        for k in 0..blocks {
            tape.shift(STRIDE)?;
            tally::set(tape, PREVIOUS, previous.get(k).copied().unwrap_or(0))?;
            tally::set(tape, CURRENT, current.get(k).copied().unwrap_or(0))?;
        }
        tape.shift(STRIDE)?;
        tape.write(Cell::Marker(Marker::Tail))?;
        tape.scan_backward_until(Marker::Head)?;
        tape.shift(STRIDE)?;

        Ok(DigitList {
            head: HEAD_INDEX,
            tail,
        })
    }

    /// Cell index of the head marker
    pub fn head(&self) -> usize {
        self.head
    }

    /// Cell index of the tail marker
    pub fn tail(&self) -> usize {
        self.tail
    }

    /// Cell index of the least-significant data block
    pub fn first_block(&self) -> usize {
        self.head + BLOCK_STRIDE
    }

    /// Number of data blocks between head and tail
    pub fn blocks(&self) -> usize {
        (self.tail - self.head) / BLOCK_STRIDE - 1
    }

    /// First cell of the decimal digit stack
    pub fn stack_base(&self) -> usize {
        self.tail + BLOCK_STRIDE
    }

    /// Read one lane as little-endian limbs without high zero limbs
    pub fn limbs(&self, tape: &Tape, lane: Lane) -> Result<Vec<u8>, TapeError> {
        let mut limbs = Vec::with_capacity(self.blocks());
        for k in 0..self.blocks() {
            let index = self.first_block() + k * BLOCK_STRIDE + lane.offset() as usize;
            let cell = tape.store().get(index)?;
            let limb = cell
                .as_value()
                .ok_or(TapeError::NotATally { index, found: cell })?;
            limbs.push(limb);
        }
        while limbs.last() == Some(&0) {
            limbs.pop();
        }
        Ok(limbs)
    }

    /// Append one block: the tail marker moves one stride further out
    ///
    /// The cursor must be on the tail. The whole new tail block is checked
    /// against the store before anything is written, so a full store leaves
    /// the list untouched.
    pub fn extend(&mut self, tape: &mut Tape) -> Result<(), TapeError> {
        if !tape.read()?.is_marker(Marker::Tail) {
            return Err(TapeError::MarkerNotFound {
                marker: Marker::Tail,
                from: tape.position(),
            });
        }
        debug_assert_eq!(tape.position(), self.tail);

        tape.read_at(2 * STRIDE - 1)?;
        tape.write_at(STRIDE, Cell::Marker(Marker::Tail))?;
        tape.write(Cell::Value(0))?;
        self.tail += BLOCK_STRIDE;

        info!(blocks = self.blocks(), tail = self.tail, "digit list extended");
        Ok(())
    }

    /// Run `body` on every data block from the cursor's block up to the tail
    ///
    /// Afterwards the cursor glides back to the head and steps onto the first
    /// data block, whichever block the walk started from.
    pub fn for_each_block<F>(tape: &mut Tape, mut body: F) -> Result<(), TapeError>
    where
        F: FnMut(&mut Tape) -> Result<(), TapeError>,
    {
        tape.repeat_until(Marker::Tail, |t| {
            body(t)?;
            t.shift(STRIDE)
        })?;
        tape.scan_backward_until(Marker::Head)?;
        tape.shift(STRIDE)
    }
}

/// Increment a multi-block number stored in `field`, carrying upward
///
/// The ripple starts `block_shift` blocks away from the cursor's block (0 or
/// negative). While it runs, the cursor's block is marked with the
/// [`Marker::Delimiter`] so the cursor can find its way back. The `CARRY` field
/// of every block the ripple reaches must be free.
pub fn ripple_increment(tape: &mut Tape, block_shift: isize, field: isize) -> Result<(), TapeError> {
    tape.value_at(MARKER)?;
    tape.write(Cell::Marker(Marker::Delimiter))?;
    tape.shift(block_shift * STRIDE)?;

    tally::set(tape, CARRY, 1)?;
    tally::while_nonzero(tape, CARRY, |t| {
        tally::clear(t, CARRY)?;
        t.inc(field)?;
        if t.read_at(field)?.is_zero() {
            tally::set(t, STRIDE + CARRY, 1)?;
        }
        t.shift(STRIDE)
    })?;

    tape.scan_backward_until(Marker::Delimiter)?;
    tape.write(Cell::Value(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_layout() {
        let mut tape = Tape::new(200);
        let list = DigitList::seed(&mut tape).unwrap();

        assert_eq!(list.head(), 18);
        assert_eq!(list.tail(), 45);
        assert_eq!(list.blocks(), 2);
        assert_eq!(tape.position(), 27);
        assert_eq!(tape.read_at(-STRIDE), Ok(Cell::Marker(Marker::Head)));
        assert_eq!(tape.read_at(CURRENT), Ok(Cell::Value(1)));
        assert_eq!(tape.read_at(PREVIOUS), Ok(Cell::Value(0)));
        assert_eq!(list.limbs(&tape, Lane::Current), Ok(vec![1]));
        assert_eq!(list.limbs(&tape, Lane::Previous), Ok(vec![]));
    }

    #[test]
    fn test_load_rejects_small_store() {
        let mut tape = Tape::new(50);
        let err = DigitList::load(&mut tape, &[1, 2, 3], &[4]).unwrap_err();
        assert!(matches!(err, TapeError::CapacityExceeded { .. }));
    }

    #[test]
    fn test_extend_moves_tail() {
        let mut tape = Tape::new(200);
        let mut list = DigitList::seed(&mut tape).unwrap();
        tape.scan_forward_until(Marker::Tail).unwrap();
        list.extend(&mut tape).unwrap();

        assert_eq!(list.tail(), 54);
        assert_eq!(list.blocks(), 3);
        assert_eq!(tape.read(), Ok(Cell::Value(0)));
        assert_eq!(tape.read_at(STRIDE), Ok(Cell::Marker(Marker::Tail)));
    }

    #[test]
    fn test_extend_at_capacity_leaves_list_intact() {
        // seed tail sits at 45; the next tail block would need cells 54..=62
        let mut tape = Tape::new(60);
        let mut list = DigitList::seed(&mut tape).unwrap();
        tape.scan_forward_until(Marker::Tail).unwrap();

        let err = list.extend(&mut tape).unwrap_err();
        assert!(!err.is_invariant_violation());
        assert_eq!(list.tail(), 45);
        assert_eq!(tape.read(), Ok(Cell::Marker(Marker::Tail)));
        assert_eq!(tape.read_at(STRIDE), Ok(Cell::Value(0)));
    }

    #[test]
    fn test_ripple_carries_across_blocks() {
        let mut tape = Tape::new(200);
        DigitList::load(&mut tape, &[], &[0, 0, 0]).unwrap();
        tape.add(QUOTIENT, 255).unwrap();
        tape.add(STRIDE + QUOTIENT, 255).unwrap();

        ripple_increment(&mut tape, 0, QUOTIENT).unwrap();

        assert_eq!(tape.position(), 27);
        assert_eq!(tape.read(), Ok(Cell::Value(0)));
        assert_eq!(tape.value_at(QUOTIENT), Ok(0));
        assert_eq!(tape.value_at(STRIDE + QUOTIENT), Ok(0));
        assert_eq!(tape.value_at(2 * STRIDE + QUOTIENT), Ok(1));
        for k in 0..4 {
            assert_eq!(tape.value_at(k * STRIDE + CARRY), Ok(0));
            assert_eq!(tape.value_at(k * STRIDE + SUM), Ok(0));
        }
    }
}
