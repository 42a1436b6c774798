//! The Fibonacci automaton built on the tape
//!
//! Layers, bottom-up:
//! - [`tally`]: count-moving idioms (transfer, copy, clear, conditionals)
//! - [`digits`]: the block chain holding both live terms, and its growth
//! - [`adder`]: one addition round over the chain
//! - [`emitter`]: decimal conversion by repeated division by ten
//! - [`machine`]: the round driver with limits, cancellation and observers
//!
//! ```text
//! seed(0, 1) → [ emit current → add ] → [ emit current → add ] → ...
//! ```

pub mod adder;
pub mod control;
pub mod digits;
pub mod emitter;
pub mod errors;
pub mod machine;
pub mod tally;

pub use control::{CancelToken, Observer, ObserverAction, RunSummary, StopReason};
pub use digits::{DigitList, Lane};
pub use errors::RunError;
pub use machine::Machine;
