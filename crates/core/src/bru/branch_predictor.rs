//! Branch Predictor Interface.
//!
//! This module defines the `BranchPredictor` trait that every direction
//! predictor implements, and the calling protocol a driver must follow.

use crate::common::Outcome;

/// Trait for branch direction prediction algorithms.
///
/// # Calling protocol
///
/// A driver issues exactly one [`predict`](Self::predict) for a branch and
/// then exactly one [`train`](Self::train) with the same `pc` and the
/// resolved outcome, before predicting the next branch. Only one branch is
/// ever in flight.
///
/// The perceptron predictor records per-query scratch state in `predict`
/// that its `train` consumes. Calling `train` without the matching
/// `predict`, or predicting twice in a row, trains against stale scratch
/// state. This is not detected at runtime.
pub trait BranchPredictor {
    /// Predicts the direction of the conditional branch at `pc`.
    ///
    /// # Arguments
    ///
    /// * `pc` - Address of the branch instruction
    fn predict(&mut self, pc: u32) -> Outcome;

    /// Trains the predictor with the resolved outcome of the branch at `pc`.
    ///
    /// # Arguments
    ///
    /// * `pc` - Address of the branch instruction, as passed to `predict`
    /// * `outcome` - The direction the branch actually took
    fn train(&mut self, pc: u32, outcome: Outcome);

    /// Short display name of the algorithm.
    fn name(&self) -> &'static str;

    /// Bits of predictor state a hardware implementation would need.
    fn storage_bits(&self) -> usize;
}
