// Sequence driver: owns the tape and runs emit/add rounds

use super::adder;
use super::control::{CancelToken, Observer, ObserverAction, RunSummary, StopReason};
use super::digits::{DigitList, Lane};
use super::emitter;
use super::errors::RunError;
use crate::config::{MachineConfig, RunLimit};
use crate::tape::{Tape, TapeError};
use std::io::Write;
use tracing::{debug, info, warn};

/// The automaton: one tape, one digit list, and the round counter
///
/// Each round writes the current term and then advances the pair
/// (previous, current) to (current, previous + current). Between rounds the
/// cursor rests on the first data block.
#[derive(Debug, Clone)]
pub struct Machine {
    tape: Tape,
    list: DigitList,
    round: u64,
}

impl Machine {
    /// Create a machine seeded with the terms 0 and 1
    pub fn new(config: &MachineConfig) -> Result<Self, TapeError> {
        Self::with_operands(config, &[0], &[1])
    }

    /// Create a machine from arbitrary little-endian base-256 operands
    pub fn with_operands(
        config: &MachineConfig,
        previous: &[u8],
        current: &[u8],
    ) -> Result<Self, TapeError> {
        let mut tape = Tape::new(config.capacity);
        let list = DigitList::load(&mut tape, previous, current)?;
        debug!(
            capacity = config.capacity,
            blocks = list.blocks(),
            "machine seeded"
        );
        Ok(Machine {
            tape,
            list,
            round: 0,
        })
    }

    /// Append the current term and its separator to `out`
    pub fn emit_current(&mut self, out: &mut Vec<u8>) -> Result<(), TapeError> {
        emitter::emit(&mut self.tape, out)
    }

    /// Run one addition round without emitting anything
    pub fn add(&mut self) -> Result<(), TapeError> {
        adder::add(&mut self.tape, &mut self.list)
    }

    /// One full round: write the current term to `sink`, then add
    ///
    /// The term is produced into a buffer first so that a failure part way
    /// through never leaves a partial term on the sink.
    pub fn step<W: Write>(&mut self, sink: &mut W) -> Result<(), RunError> {
        let mut term = Vec::new();
        self.emit_current(&mut term)?;
        sink.write_all(&term)?;
        self.add()?;
        self.round += 1;

        debug!(round = self.round, blocks = self.list.blocks(), "round complete");
        Ok(())
    }

    /// Run rounds until the limit, the cancel token, or the observer stops it
    ///
    /// The limit and token are checked before every round and the observer is
    /// consulted after every round. The sink is flushed before returning, also
    /// when a round fails.
    pub fn run<W: Write>(
        &mut self,
        sink: &mut W,
        limit: RunLimit,
        cancel: &CancelToken,
        observer: &mut dyn Observer,
    ) -> Result<RunSummary, RunError> {
        let mut terms = 0;
        let outcome = loop {
            if limit.reached(terms) {
                break Ok(StopReason::Limit);
            }
            if cancel.is_cancelled() {
                break Ok(StopReason::Cancelled);
            }
            if let Err(err) = self.step(sink) {
                break Err(err);
            }
            terms += 1;
            if observer.observe(self) == ObserverAction::Stop {
                break Ok(StopReason::Observer);
            }
        };
        let flushed = sink.flush();

        match outcome {
            Ok(stop) => {
                flushed?;
                info!(terms, round = self.round, ?stop, "run finished");
                Ok(RunSummary { terms, stop })
            }
            Err(err) => {
                warn!(terms, round = self.round, error = %err, "run stopped");
                Err(err)
            }
        }
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn list(&self) -> &DigitList {
        &self.list
    }

    /// Number of completed rounds
    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn current_limbs(&self) -> Result<Vec<u8>, TapeError> {
        self.list.limbs(&self.tape, Lane::Current)
    }

    pub fn previous_limbs(&self) -> Result<Vec<u8>, TapeError> {
        self.list.limbs(&self.tape, Lane::Previous)
    }
}
