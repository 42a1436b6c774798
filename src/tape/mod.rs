//! Tape model for the automaton
//!
//! This module provides the storage the whole program runs on:
//! - [`cell`]: Tagged cell representation (counts and structural markers)
//! - [`store`]: Fixed-capacity, zero-initialised array of cells
//! - [`cursor`]: The [`Tape`], a store plus the single movable cursor and its
//!   primitive operations
//! - [`errors`]: Errors raised by checked tape access
//!
//! # Primitives
//!
//! Every higher-level algorithm is built from four primitives:
//!
//! ```text
//! shift(n)             cursor += n
//! inc(n) / dec(n)      cell[cursor + n] ± 1   (wrapping)
//! is_zero()            cell[cursor] == 0
//! repeat_while_nonzero { body }
//! ```
//!
//! plus the marker scans, which glide one block stride at a time until a given
//! marker sits under the cursor.
//!
//! # Addressing
//!
//! Unlike a raw byte tape, every relative access is checked. Running past the
//! end of the store is reported as [`TapeError::CapacityExceeded`]; running
//! before the start, or failing to find a marker, means the list structure is
//! corrupt and is reported as an internal-consistency error.

pub mod cell;
pub mod constants;
pub mod cursor;
pub mod errors;
pub mod store;

pub use cell::{Cell, Marker};
pub use cursor::Tape;
pub use errors::TapeError;
pub use store::CellStore;
