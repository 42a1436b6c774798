//! Tape cell representation
//!
//! This module defines the [`Cell`] enum. A raw byte tape stores list structure
//! as reserved byte values; here structure and counts are separate variants so
//! a marker can never be mistaken for a tally.
//!
//! # Cell Kinds
//!
//! - [`Cell::Value`]: an 8-bit tally count, manipulated by increment/decrement
//! - [`Cell::Marker`]: a structural sentinel (see [`Marker`])
//!
//! # Raw Codes
//!
//! For diagnostic output each marker still has the byte code it would occupy on
//! a plain byte tape: head `255`, tail `254`, delimiter `253`.

use std::fmt;

/// Structural sentinels of the digit list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// First block of the list; never moves once placed
    Head,
    /// Block after the last data block; moves forward as the list grows
    Tail,
    /// Temporary return point while a carry ripples forward
    Delimiter,
}

impl Marker {
    /// Byte code shown in diagnostic dumps
    pub fn raw(self) -> u8 {
        match self {
            Marker::Head => 255,
            Marker::Tail => 254,
            Marker::Delimiter => 253,
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marker::Head => write!(f, "head marker"),
            Marker::Tail => write!(f, "tail marker"),
            Marker::Delimiter => write!(f, "delimiter"),
        }
    }
}

/// A single tape cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Value(u8),
    Marker(Marker),
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Value(0)
    }
}

impl Cell {
    /// True only for `Value(0)`; markers always count as nonzero
    pub fn is_zero(&self) -> bool {
        matches!(self, Cell::Value(0))
    }

    /// Check whether this cell holds the given marker
    pub fn is_marker(&self, marker: Marker) -> bool {
        *self == Cell::Marker(marker)
    }

    /// Get the tally, returns None for markers
    pub fn as_value(&self) -> Option<u8> {
        match self {
            Cell::Value(n) => Some(*n),
            Cell::Marker(_) => None,
        }
    }

    /// Byte code of this cell as it would appear on a plain byte tape
    pub fn raw(&self) -> u8 {
        match self {
            Cell::Value(n) => *n,
            Cell::Marker(m) => m.raw(),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Value(n) => write!(f, "{}", n),
            Cell::Marker(m) => write!(f, "{}", m),
        }
    }
}
