//! Tally-to-decimal emitter
//!
//! Converts the current lane into decimal digits without ever leaving the
//! tape. Each digit is produced by a long division by ten spread over the
//! blocks:
//!
//! 1. Starting at the top block, the block counts its `REMAINDER` back one
//!    stroke at a time; each full ten strokes become one unit of `QUOTIENT`
//!    (rippling upward on overflow).
//! 2. The remainder of the block above is folded in, using
//!    `r·256 = 25·10·r + 6·r`: 25 quotient strokes and 6 remainder strokes per
//!    unit. The block is then divided again.
//! 3. The walk moves one block down and repeats. Once it reaches the first
//!    block, every remainder but the first is zero and the first is below
//!    ten. That remainder is the next digit.
//!
//! Digits come out least-significant first. They are pushed as ASCII cells on
//! a stack that starts one block past the tail, and printed top-down so the
//! output reads most-significant first. The quotient then becomes the new
//! remainder and the division repeats until the quotient is zero.
//!
//! The emitter's control flags live in the head block's scratch fields, which
//! sit at fixed offsets from the first data block.

use super::digits::{
    ripple_increment, DigitList, CARRY, CURRENT, PROBE, QUOTIENT, REMAINDER, WORK,
};
use super::tally;
use crate::tape::constants::{DIGIT_ZERO, STRIDE, TERM_SEPARATOR};
use crate::tape::{Marker, Tape, TapeError};

const HEAD: isize = -STRIDE;
const KEEP_DIGITIZING: isize = HEAD + QUOTIENT;
const FLAG: isize = HEAD + PROBE;
const PENDING: isize = HEAD + WORK;

/// Strokes of quotient and remainder that one unit of a higher block is worth
/// in the block below it
const FOLD_QUOTIENT: u8 = 25;
const FOLD_REMAINDER: u8 = 6;

/// Append the decimal form of the current lane plus the separator to `out`
///
/// The cursor must be on the first data block and is returned there. Nothing
/// is appended unless the whole term was produced.
pub fn emit(tape: &mut Tape, out: &mut Vec<u8>) -> Result<(), TapeError> {
    let mut term = Vec::new();

    DigitList::for_each_block(tape, |t| tally::copy(t, CURRENT, REMAINDER, CARRY))?;

    tally::set(tape, KEEP_DIGITIZING, 1)?;
    tally::while_nonzero(tape, KEEP_DIGITIZING, |t| digitize(t, &mut term))?;

    out.extend_from_slice(&term);
    out.push(TERM_SEPARATOR);
    Ok(())
}

/// Produce one digit; print the stack once the quotient is exhausted
fn digitize(tape: &mut Tape, term: &mut Vec<u8>) -> Result<(), TapeError> {
    divide(tape)?;
    push_digit(tape)?;

    tally::set(tape, FLAG, 1)?;
    clear_flag_if_any(tape, QUOTIENT)?;

    tally::set(tape, PENDING, 1)?;
    tally::if_nonzero(tape, FLAG, |t| {
        tally::clear(t, KEEP_DIGITIZING)?;
        tally::clear(t, PENDING)?;
        print_stack(t, term)
    })?;
    tally::if_nonzero(tape, PENDING, |t| {
        DigitList::for_each_block(t, |t| tally::move_to(t, QUOTIENT, REMAINDER))
    })
}

/// Divide the remainder lane by ten, leaving the last digit in the first block
///
/// One pass from the top block down: each block is divided, then takes in the
/// remainder of the block above it and is divided again.
fn divide(tape: &mut Tape) -> Result<(), TapeError> {
    tape.scan_forward_until(Marker::Tail)?;
    tape.shift(-STRIDE)?;
    tape.repeat_until(Marker::Head, |t| {
        divide_block(t)?;
        fold_from_above(t)?;
        divide_block(t)?;
        t.shift(-STRIDE)
    })?;
    tape.shift(STRIDE)
}

fn divide_block(tape: &mut Tape) -> Result<(), TapeError> {
    tally::move_to(tape, REMAINDER, WORK)?;
    tally::while_nonzero(tape, WORK, take_ten)
}

/// Move up to ten strokes from `WORK` to `REMAINDER`; ten strokes make one
/// unit of quotient
fn take_ten(tape: &mut Tape) -> Result<(), TapeError> {
    for _ in 0..10 {
        if tape.read_at(WORK)?.is_zero() {
            return Ok(());
        }
        tape.dec(WORK)?;
        tape.inc(REMAINDER)?;
    }
    tally::clear(tape, REMAINDER)?;
    ripple_increment(tape, 0, QUOTIENT)
}

/// Fold the remainder of the block above into this one
///
/// The remainder above is below ten and this quotient is at most 25, so the
/// quotient stays within 250 and needs no ripple.
fn fold_from_above(tape: &mut Tape) -> Result<(), TapeError> {
    tally::for_each(tape, STRIDE + REMAINDER, |t| {
        t.add(QUOTIENT, FOLD_QUOTIENT)?;
        t.add(REMAINDER, FOLD_REMAINDER)
    })
}

/// Clear `FLAG` if any block from the cursor's upward holds a nonzero `field`
///
/// On the first hit the walk glides to the head to clear the flag, then jumps
/// to the top data block so the walk ends there.
fn clear_flag_if_any(tape: &mut Tape, field: isize) -> Result<(), TapeError> {
    DigitList::for_each_block(tape, |t| {
        tally::copy(t, field, PROBE, CARRY)?;
        tally::if_nonzero(t, PROBE, |t| {
            t.scan_backward_until(Marker::Head)?;
            t.shift(STRIDE)?;
            tally::clear(t, FLAG)?;
            t.scan_forward_until(Marker::Tail)?;
            t.shift(-STRIDE)
        })
    })
}

/// Walk from the first data block to the free slot above the digit stack
fn to_stack_top(tape: &mut Tape) -> Result<(), TapeError> {
    tape.scan_forward_until(Marker::Tail)?;
    tape.shift(STRIDE)?;
    tape.skip_nonzero()
}

/// Walk from anywhere in the digit stack back to the first data block
fn from_stack(tape: &mut Tape) -> Result<(), TapeError> {
    tape.scan_back_to(Marker::Tail)?;
    tape.scan_backward_until(Marker::Head)?;
    tape.shift(STRIDE)
}

/// Push `'0' + REMAINDER` of the first block onto the digit stack
fn push_digit(tape: &mut Tape) -> Result<(), TapeError> {
    to_stack_top(tape)?;
    tape.add(0, DIGIT_ZERO)?;
    from_stack(tape)?;

    tally::for_each(tape, REMAINDER, |t| {
        to_stack_top(t)?;
        t.shift(-1)?;
        t.inc(0)?;
        from_stack(t)
    })
}

/// Pop every digit off the stack, most-significant first
fn print_stack(tape: &mut Tape, term: &mut Vec<u8>) -> Result<(), TapeError> {
    to_stack_top(tape)?;
    tape.shift(-1)?;
    tape.repeat_while_nonzero(|t| {
        term.push(t.value_at(0)?);
        tally::clear(t, 0)?;
        t.shift(-1)
    })?;
    from_stack(tape)
}
