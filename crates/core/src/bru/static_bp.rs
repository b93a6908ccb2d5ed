//! Static Branch Predictor.
//!
//! Implements an "Always Taken" policy for conditional branches. It holds no
//! state, so training is a no-op.

use super::BranchPredictor;
use crate::common::Outcome;

/// Static Branch Predictor structure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StaticPredictor;

impl StaticPredictor {
    /// Creates a new Static Predictor.
    pub const fn new() -> Self {
        Self
    }
}

impl BranchPredictor for StaticPredictor {
    /// Always predicts taken.
    fn predict(&mut self, _pc: u32) -> Outcome {
        Outcome::Taken
    }

    /// Does nothing; there is no direction state to train.
    fn train(&mut self, _pc: u32, _outcome: Outcome) {}

    fn name(&self) -> &'static str {
        "Static"
    }

    fn storage_bits(&self) -> usize {
        0
    }
}

/// Predictor used when the configuration could not be honoured.
///
/// Always predicts not-taken and ignores training.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FallbackPredictor;

impl BranchPredictor for FallbackPredictor {
    fn predict(&mut self, _pc: u32) -> Outcome {
        Outcome::NotTaken
    }

    fn train(&mut self, _pc: u32, _outcome: Outcome) {}

    fn name(&self) -> &'static str {
        "Fallback"
    }

    fn storage_bits(&self) -> usize {
        0
    }
}
