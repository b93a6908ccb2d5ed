//! GShare Branch Predictor.
//!
//! GShare correlates global branch history with the program counter using an XOR
//! hash. This allows the predictor to distinguish the same branch instruction
//! in different execution contexts.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `predict()`: O(1)
//!   - `train()`: O(1)
//! - **Space Complexity:** O(2^G) 2-bit counters plus a G-bit history register
//! - **Best Case:** Correlated branches where outcome depends on recent history
//! - **Worst Case:** Uncorrelated branches or history length too short/long for pattern

use super::{
    BranchPredictor, counter::SaturatingCounter, history::HistoryRegister, table::PredictionTable,
};
use crate::common::{Outcome, mask};

/// GShare Predictor structure.
#[derive(Clone, Debug)]
pub struct GSharePredictor {
    /// Global History Register storing recent branch outcomes.
    ghr: HistoryRegister,
    /// Pattern History Table containing 2-bit saturating counters.
    pht: PredictionTable,
    /// Global history width in bits.
    bits: u32,
}

impl GSharePredictor {
    /// Creates a GShare Predictor with a `2^bits`-entry table, all counters weakly not-taken.
    pub fn new(bits: u32) -> Self {
        Self {
            ghr: HistoryRegister::new(bits),
            pht: PredictionTable::new(bits, SaturatingCounter::WeakNotTaken),
            bits,
        }
    }

    /// Calculates the index into the Pattern History Table.
    ///
    /// XORs the current (pre-update) global history with the pc.
    #[inline(always)]
    pub const fn index(&self, pc: u32) -> u64 {
        (self.ghr.value() ^ pc as u64) & mask(self.bits)
    }

    /// Global history register.
    pub const fn history(&self) -> &HistoryRegister {
        &self.ghr
    }

    /// Pattern history table.
    pub const fn table(&self) -> &PredictionTable {
        &self.pht
    }

    /// Global history width in bits.
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    /// Direction of the counter `pc` currently maps to.
    #[inline(always)]
    pub fn lookup(&self, pc: u32) -> Outcome {
        self.pht.read(self.index(pc))
    }
}

impl BranchPredictor for GSharePredictor {
    /// Predicts taken if the counter at the hashed index is weakly or strongly taken.
    fn predict(&mut self, pc: u32) -> Outcome {
        self.lookup(pc)
    }

    /// Updates the counter at the hashed index, then shifts the outcome into the history.
    ///
    /// The index is taken before the history moves, so it is the same one
    /// `predict` used.
    fn train(&mut self, pc: u32, outcome: Outcome) {
        let idx = self.index(pc);
        self.pht.bump(idx, outcome);
        self.ghr.push(outcome);
    }

    fn name(&self) -> &'static str {
        "Gshare"
    }

    fn storage_bits(&self) -> usize {
        self.pht.storage_bits() + self.bits as usize
    }
}
