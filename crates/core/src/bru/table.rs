//! Pattern history table of saturating counters.

use super::counter::SaturatingCounter;
use crate::common::{Outcome, mask};

/// A `2^bits`-entry table of [`SaturatingCounter`]s.
///
/// Every index passed in is masked to `bits` before use, so no lookup can
/// fall outside the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PredictionTable {
    counters: Vec<SaturatingCounter>,
    bits: u32,
}

impl PredictionTable {
    /// Allocates `2^bits` counters, all set to `init`.
    pub fn new(bits: u32, init: SaturatingCounter) -> Self {
        Self {
            counters: vec![init; 1 << bits],
            bits,
        }
    }

    #[inline(always)]
    const fn slot(&self, index: u64) -> usize {
        (index & mask(self.bits)) as usize
    }

    /// Returns the counter at `index`.
    #[inline(always)]
    pub fn get(&self, index: u64) -> SaturatingCounter {
        self.counters[self.slot(index)]
    }

    /// Returns the predicted direction of the counter at `index`.
    #[inline(always)]
    pub fn read(&self, index: u64) -> Outcome {
        self.get(index).read()
    }

    /// Moves the counter at `index` one step toward `outcome`.
    #[inline(always)]
    pub fn bump(&mut self, index: u64, outcome: Outcome) {
        let slot = self.slot(index);
        self.counters[slot] = self.counters[slot].bump(outcome);
    }

    /// Index width in bits.
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    /// Number of counters.
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    /// Always `false`; the table holds at least one counter.
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Read-only view of every counter.
    pub fn counters(&self) -> &[SaturatingCounter] {
        &self.counters
    }

    /// Storage cost in bits (two per counter).
    pub fn storage_bits(&self) -> usize {
        self.counters.len() * 2
    }
}
