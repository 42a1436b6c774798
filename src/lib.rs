//! # Introduction
//!
//! fibtape prints the Fibonacci sequence without bound using nothing but a
//! tape automaton: a flat array of byte cells and a single cursor that can
//! move, increment, decrement, test for zero, and loop. Big integers live on
//! the tape as a chain of 9-cell blocks, addition is done by moving tallies
//! between cells, and decimal output comes from repeated division by ten on
//! the tape itself.
//!
//! ## Pipeline
//!
//! ```text
//! seed(0, 1) → emit current → add → emit current → add → ...
//! ```
//!
//! 1. [`tape`]: tagged cells, the fixed-capacity store, and the checked cursor.
//! 2. [`engine`]: tally idioms, the digit list, the adder, the decimal emitter,
//!    and the [`engine::Machine`] that drives rounds.
//! 3. [`snapshot`]: per-round snapshots, the output log, and the diagnostic
//!    dump observer.
//! 4. [`ui`]: ratatui viewer that steps the machine forward and back; not part
//!    of the stable library API.
//! 5. [`config`]: machine capacity and run limits.
//!
//! ## Example
//!
//! ```
//! use fibtape::config::{MachineConfig, RunLimit};
//! use fibtape::engine::{CancelToken, Machine};
//!
//! let mut machine = Machine::new(&MachineConfig::default()).unwrap();
//! let mut out = Vec::new();
//! machine
//!     .run(&mut out, RunLimit::Terms(5), &CancelToken::new(), &mut ())
//!     .unwrap();
//! assert_eq!(out, b"1\n1\n2\n3\n5\n");
//! ```

pub mod config;
pub mod engine;
pub mod snapshot;
pub mod tape;
pub mod ui;
