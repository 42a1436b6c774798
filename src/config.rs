// Machine configuration

use crate::tape::constants::DEFAULT_CAPACITY;

/// Settings fixed for the lifetime of a machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MachineConfig {
    /// Number of cells in the store
    pub capacity: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        MachineConfig {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

/// How many terms a run may write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunLimit {
    /// Run until cancelled, stopped by an observer, or out of cells
    #[default]
    Unbounded,
    /// Stop after this many terms
    Terms(u64),
}

impl RunLimit {
    /// True once `written` terms satisfy the limit
    pub fn reached(self, written: u64) -> bool {
        match self {
            RunLimit::Unbounded => false,
            RunLimit::Terms(limit) => written >= limit,
        }
    }
}

impl From<Option<u64>> for RunLimit {
    fn from(terms: Option<u64>) -> Self {
        terms.map_or(RunLimit::Unbounded, RunLimit::Terms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_reached() {
        assert!(!RunLimit::Unbounded.reached(u64::MAX));
        assert!(!RunLimit::Terms(3).reached(2));
        assert!(RunLimit::Terms(3).reached(3));
        assert!(RunLimit::Terms(0).reached(0));
        assert_eq!(RunLimit::from(Some(4)), RunLimit::Terms(4));
        assert_eq!(RunLimit::from(None), RunLimit::Unbounded);
    }
}
