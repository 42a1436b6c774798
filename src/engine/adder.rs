//! Addition engine
//!
//! One addition round replaces the lanes (previous, current) with
//! (current, previous + current). The walk goes from the least-significant
//! block to the tail; each block adds its two limbs plus the carry left in the
//! block below:
//!
//! ```text
//! SUM   ← PREVIOUS            (copy)
//! WORK  ← CURRENT             (copy)
//! (CARRY, SUM) += WORK        one stroke at a time
//! (CARRY, SUM) += CARRY[k-1]  consuming the carry-in
//! PREVIOUS ← CURRENT
//! CURRENT  ← SUM              CARRY stays behind for block k+1
//! ```
//!
//! On reaching the tail, the list grows by one block if the sum has spread
//! into the top data block, which restores the zero-top-block invariant.

use super::digits::{DigitList, CARRY, CURRENT, PREVIOUS, SUM, WORK};
use super::tally;
use crate::tape::constants::STRIDE;
use crate::tape::{Marker, Tape, TapeError};

/// Run one addition round
///
/// The cursor must be on the first data block and is returned there.
pub fn add(tape: &mut Tape, list: &mut DigitList) -> Result<(), TapeError> {
    tape.repeat_until(Marker::Tail, |t| {
        add_block(t)?;
        t.shift(STRIDE)
    })?;

    // the tail block's own scratch cells test the top limb
    tally::copy(tape, CURRENT - STRIDE, CARRY, SUM)?;
    tally::if_nonzero(tape, CARRY, |t| list.extend(t))?;

    tape.scan_backward_until(Marker::Head)?;
    tape.shift(STRIDE)
}

fn add_block(tape: &mut Tape) -> Result<(), TapeError> {
    tally::copy(tape, PREVIOUS, SUM, CARRY)?;
    tally::copy(tape, CURRENT, WORK, CARRY)?;
    tally::for_each(tape, WORK, |t| tally::increment_wide(t, SUM, CARRY))?;
    tally::if_nonzero(tape, CARRY - STRIDE, |t| tally::increment_wide(t, SUM, CARRY))?;

    tally::move_to(tape, CURRENT, PREVIOUS)?;
    tally::move_to(tape, SUM, CURRENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::digits::Lane;

    fn add_limbs(previous: &[u8], current: &[u8]) -> (Vec<u8>, Vec<u8>, DigitList) {
        let mut tape = Tape::new(1_000);
        let mut list = DigitList::load(&mut tape, previous, current).unwrap();
        let start = tape.position();
        add(&mut tape, &mut list).unwrap();
        assert_eq!(tape.position(), start);
        (
            list.limbs(&tape, Lane::Previous).unwrap(),
            list.limbs(&tape, Lane::Current).unwrap(),
            list,
        )
    }

    #[test]
    fn test_single_block_sum() {
        let (previous, current, list) = add_limbs(&[20], &[22]);
        assert_eq!(previous, vec![22]);
        assert_eq!(current, vec![42]);
        assert_eq!(list.blocks(), 2);
    }

    #[test]
    fn test_carry_between_blocks() {
        // 0x01ff + 0x0001 = 0x0200
        let (_, current, _) = add_limbs(&[0xff, 0x01], &[0x01]);
        assert_eq!(current, vec![0x00, 0x02]);
    }

    #[test]
    fn test_growth_when_sum_reaches_top_block() {
        let (previous, current, list) = add_limbs(&[0xff], &[0x01]);
        assert_eq!(previous, vec![0x01]);
        assert_eq!(current, vec![0x00, 0x01]);
        assert_eq!(list.blocks(), 3);
    }

    #[test]
    fn test_scratch_is_clean_after_round() {
        let mut tape = Tape::new(1_000);
        let mut list = DigitList::load(&mut tape, &[0xff, 0xff], &[0xff, 0xff]).unwrap();
        add(&mut tape, &mut list).unwrap();

        for k in -1..=list.blocks() as isize {
            for field in [CARRY, SUM, WORK] {
                assert_eq!(tape.value_at(k * STRIDE + field), Ok(0));
            }
        }
        assert_eq!(list.limbs(&tape, Lane::Current), Ok(vec![0xfe, 0xff, 0x01]));
    }
}
