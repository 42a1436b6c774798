// Layout constants for the tape automaton

/// Number of cells in one block of the digit list
pub const BLOCK_STRIDE: usize = 9;

/// Block stride as a signed cursor offset
pub const STRIDE: isize = BLOCK_STRIDE as isize;

/// Default number of cells in the store
pub const DEFAULT_CAPACITY: usize = 1_000_000;

/// Cell index of the head marker
/// Two empty blocks are left in front of the head so diagnostic dumps show context
pub const HEAD_INDEX: usize = 2 * BLOCK_STRIDE;

/// Added to a digit count to obtain its ASCII character
pub const DIGIT_ZERO: u8 = b'0';

/// Byte written after every emitted term
pub const TERM_SEPARATOR: u8 = b'\n';

/// Number of diagnostic dumps before the dump observer asks the run to stop
pub const DEFAULT_DUMP_LIMIT: u64 = 100_000;
