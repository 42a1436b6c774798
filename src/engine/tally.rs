//! Tally transfer and the cell-level idioms built on it
//!
//! The tape has no native copy or assignment; a count can only be moved by
//! decrementing one cell and incrementing others until the source is empty.
//! Everything in this module is that idiom in some form:
//!
//! ```text
//! transfer(s, [d1, d2])   s → 0, d1 += s, d2 += s
//! move_to(s, d)           d → 0, then transfer(s, [d])
//! copy(s, d, t)           transfer(s, [d, t]), transfer(t, [s])
//! ```
//!
//! All offsets are relative to the cursor, and every function returns the
//! cursor to where it found it.

use crate::tape::{Tape, TapeError};

/// Drain `source` into every cell of `destinations`
///
/// Leaves `source` at zero and adds its former count to each destination.
/// With two destinations this doubles the count into two places.
pub fn transfer(tape: &mut Tape, source: isize, destinations: &[isize]) -> Result<(), TapeError> {
    tape.shift(source)?;
    tape.repeat_while_nonzero(|t| {
        t.dec(0)?;
        for &destination in destinations {
            t.inc(destination - source)?;
        }
        Ok(())
    })?;
    tape.shift(-source)
}

/// Decrement the cell at `at` down to zero
pub fn clear(tape: &mut Tape, at: isize) -> Result<(), TapeError> {
    tape.shift(at)?;
    tape.repeat_while_nonzero(|t| t.dec(0))?;
    tape.shift(-at)
}

/// Clear the cell at `at`, then count it up to `value`
pub fn set(tape: &mut Tape, at: isize, value: u8) -> Result<(), TapeError> {
    clear(tape, at)?;
    tape.add(at, value)
}

/// Replace `destination` with the count in `source`, emptying `source`
pub fn move_to(tape: &mut Tape, source: isize, destination: isize) -> Result<(), TapeError> {
    clear(tape, destination)?;
    transfer(tape, source, &[destination])
}

/// Copy `source` into `destination` using `temp`, leaving `source` intact
pub fn copy(
    tape: &mut Tape,
    source: isize,
    destination: isize,
    temp: isize,
) -> Result<(), TapeError> {
    clear(tape, temp)?;
    clear(tape, destination)?;
    transfer(tape, source, &[destination, temp])?;
    transfer(tape, temp, &[source])
}

/// Logical not: `at` becomes 1 if it was zero, otherwise 0
pub fn negate(tape: &mut Tape, at: isize, temp: isize) -> Result<(), TapeError> {
    set(tape, temp, 1)?;
    if_nonzero(tape, at, |t| t.dec(temp))?;
    move_to(tape, temp, at)
}

/// Run `body` once if `at` is nonzero, consuming the flag
///
/// `body` runs with the cursor back on the reference cell.
pub fn if_nonzero<F>(tape: &mut Tape, at: isize, body: F) -> Result<(), TapeError>
where
    F: FnOnce(&mut Tape) -> Result<(), TapeError>,
{
    if tape.read_at(at)?.is_zero() {
        return Ok(());
    }
    clear(tape, at)?;
    body(tape)
}

/// Run `body` while the cell at `at` is nonzero
///
/// `body` runs with the cursor on the reference cell and is responsible for
/// eventually zeroing the flag.
pub fn while_nonzero<F>(tape: &mut Tape, at: isize, mut body: F) -> Result<(), TapeError>
where
    F: FnMut(&mut Tape) -> Result<(), TapeError>,
{
    tape.shift(at)?;
    tape.repeat_while_nonzero(|t| {
        t.shift(-at)?;
        body(t)?;
        t.shift(at)
    })?;
    tape.shift(-at)
}

/// Decrement `at` one stroke at a time, running `body` once per stroke
pub fn for_each<F>(tape: &mut Tape, at: isize, mut body: F) -> Result<(), TapeError>
where
    F: FnMut(&mut Tape) -> Result<(), TapeError>,
{
    while_nonzero(tape, at, |t| {
        t.dec(at)?;
        body(t)
    })
}

/// Increment the two-cell counter (`high`, `low`), carrying on wrap
pub fn increment_wide(tape: &mut Tape, low: isize, high: isize) -> Result<(), TapeError> {
    tape.inc(low)?;
    if tape.read_at(low)?.is_zero() {
        tape.inc(high)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tape::Cell;

    fn tape_with(values: &[(isize, u8)]) -> Tape {
        let mut tape = Tape::new(16);
        tape.seek(4).unwrap();
        for &(at, value) in values {
            tape.add(at, value).unwrap();
        }
        tape
    }

    #[test]
    fn test_transfer_single_destination() {
        let mut tape = tape_with(&[(0, 37), (3, 5)]);
        transfer(&mut tape, 0, &[3]).unwrap();
        assert_eq!(tape.value_at(0), Ok(0));
        assert_eq!(tape.value_at(3), Ok(42));
        assert_eq!(tape.position(), 4);
    }

    #[test]
    fn test_transfer_doubles_into_two_destinations() {
        for (count, d1, d2) in [(0u8, 0u8, 0u8), (1, 9, 0), (200, 12, 55), (255, 0, 0)] {
            let mut tape = tape_with(&[(1, count), (-2, d1), (5, d2)]);
            transfer(&mut tape, 1, &[-2, 5]).unwrap();
            assert_eq!(tape.value_at(1), Ok(0));
            assert_eq!(tape.value_at(-2), Ok(d1.wrapping_add(count)));
            assert_eq!(tape.value_at(5), Ok(d2.wrapping_add(count)));
        }
    }

    #[test]
    fn test_copy_preserves_source() {
        let mut tape = tape_with(&[(0, 99), (1, 7), (2, 3)]);
        copy(&mut tape, 0, 1, 2).unwrap();
        assert_eq!(tape.value_at(0), Ok(99));
        assert_eq!(tape.value_at(1), Ok(99));
        assert_eq!(tape.value_at(2), Ok(0));
    }

    #[test]
    fn test_negate() {
        let mut tape = tape_with(&[(0, 0), (1, 17)]);
        negate(&mut tape, 0, 2).unwrap();
        negate(&mut tape, 1, 2).unwrap();
        assert_eq!(tape.value_at(0), Ok(1));
        assert_eq!(tape.value_at(1), Ok(0));
        assert_eq!(tape.value_at(2), Ok(0));
    }

    #[test]
    fn test_if_nonzero_consumes_flag() {
        let mut tape = tape_with(&[(0, 3)]);
        if_nonzero(&mut tape, 0, |t| t.inc(1)).unwrap();
        if_nonzero(&mut tape, 0, |t| t.inc(1)).unwrap();
        assert_eq!(tape.value_at(0), Ok(0));
        assert_eq!(tape.value_at(1), Ok(1));
    }

    #[test]
    fn test_for_each_runs_once_per_stroke() {
        let mut tape = tape_with(&[(2, 6)]);
        for_each(&mut tape, 2, |t| t.add(3, 2)).unwrap();
        assert_eq!(tape.value_at(2), Ok(0));
        assert_eq!(tape.value_at(3), Ok(12));
    }

    #[test]
    fn test_increment_wide_carries() {
        let mut tape = tape_with(&[(0, 254), (1, 0)]);
        increment_wide(&mut tape, 0, 1).unwrap();
        assert_eq!(tape.read_at(0), Ok(Cell::Value(255)));
        increment_wide(&mut tape, 0, 1).unwrap();
        assert_eq!(tape.value_at(0), Ok(0));
        assert_eq!(tape.value_at(1), Ok(1));
    }
}
