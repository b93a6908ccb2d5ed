//! Perceptron Branch Predictor.
//!
//! Uses a single-layer perceptron to predict branch direction. Instead of
//! saturating counters, it keeps a bank of weight vectors, one per address
//! slot. The prediction is the sign of the dot product of the selected
//! weights with the global history, where a taken history bit contributes
//! `+w` and a not-taken bit `-w`.
//!
//! Weights are only trained when the prediction was wrong or the output
//! magnitude fell below the threshold θ, so confidently correct branches
//! leave the bank untouched.
//!
//! See "Dynamic Branch Prediction with Perceptrons" (Jiménez and Lin, 2001).

use tracing::{debug, trace};

use super::{BranchPredictor, history::HistoryRegister};
use crate::common::Outcome;
use crate::config::PerceptronConfig;

/// Multiplier of the address hash (Knuth's multiplicative constant).
pub const HASH_MULTIPLIER: u64 = 2_654_435_761;

/// Coefficient used to calculate the training threshold.
const THETA_COEFF: f64 = 1.93;
/// Bias used to calculate the training threshold.
const THETA_BIAS: f64 = 14.0;

/// Returns the training threshold θ for a history of `history_length` bits.
pub fn training_threshold(history_length: u32) -> i32 {
    THETA_COEFF.mul_add(f64::from(history_length), THETA_BIAS) as i32
}

/// Scratch state recorded by `predict` for the matching `train`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PerceptronScratch {
    /// Dot product computed by the last prediction.
    pub output: i32,
    /// Direction returned by the last prediction.
    pub prediction: Outcome,
    /// Set when `|output| < θ`.
    pub needs_train: bool,
}

/// Perceptron Predictor structure.
#[derive(Clone, Debug)]
pub struct PerceptronPredictor {
    /// Global History Register; bit `i` is the `i+1`-th most recent outcome.
    ghr: HistoryRegister,
    /// Table of weights (flattened). Each row is the bias followed by the history weights.
    table: Vec<i16>,
    /// Length of the history vector.
    history_length: u32,
    /// Number of perceptrons in the bank.
    slots: usize,
    /// Size of a single row in the table (history length + bias).
    row_size: usize,
    /// Training threshold (theta).
    threshold: i32,
    /// Smallest representable weight.
    weight_min: i16,
    /// Largest representable weight.
    weight_max: i16,
    /// Width of a weight in bits.
    weight_bits: u32,
    /// State carried from `predict` to `train`.
    scratch: PerceptronScratch,
}

impl PerceptronPredictor {
    /// Creates a new Perceptron Predictor with every weight at zero.
    ///
    /// The configuration is expected to have passed
    /// [`PerceptronConfig::validate`].
    pub fn new(config: &PerceptronConfig) -> Self {
        let history_length = config.history_length;
        let row_size = history_length as usize + 1;
        let threshold = training_threshold(history_length);
        let weight_max = ((1i32 << (config.weight_bits - 1)) - 1) as i16;
        let weight_min = (-(1i32 << (config.weight_bits - 1))) as i16;

        debug!(
            history_length,
            slots = config.slots,
            weight_bits = config.weight_bits,
            threshold,
            "building perceptron predictor"
        );

        Self {
            ghr: HistoryRegister::new(history_length),
            table: vec![0; config.slots * row_size],
            history_length,
            slots: config.slots,
            row_size,
            threshold,
            weight_min,
            weight_max,
            weight_bits: config.weight_bits,
            scratch: PerceptronScratch::default(),
        }
    }

    /// Maps an address onto its perceptron: `(pc * HASH_MULTIPLIER) mod slots`.
    ///
    /// Addresses that are congruent modulo `slots` share a perceptron.
    #[inline(always)]
    pub fn slot(&self, pc: u32) -> usize {
        ((u64::from(pc) * HASH_MULTIPLIER) % self.slots as u64) as usize
    }

    /// Computes the perceptron output (dot product) for a given slot.
    ///
    /// Sums the bias weight and, for each history bit, `+w` when the bit is
    /// taken and `-w` otherwise.
    pub fn output(&self, slot: usize) -> i32 {
        let row = self.weights(slot);
        let mut y = i32::from(row[0]);

        for (age, &w) in row[1..].iter().enumerate() {
            let w = i32::from(w);
            y += if self.ghr.outcome(age as u32).is_taken() {
                w
            } else {
                -w
            };
        }
        y
    }

    /// Weights of one perceptron: index 0 is the bias, index `i` pairs with history bit `i - 1`.
    pub fn weights(&self, slot: usize) -> &[i16] {
        let base = slot * self.row_size;
        &self.table[base..base + self.row_size]
    }

    /// Shared global history.
    pub const fn history(&self) -> &HistoryRegister {
        &self.ghr
    }

    /// Training threshold θ.
    pub const fn threshold(&self) -> i32 {
        self.threshold
    }

    /// Inclusive weight range.
    pub const fn weight_range(&self) -> (i16, i16) {
        (self.weight_min, self.weight_max)
    }

    /// Number of perceptrons in the bank.
    pub const fn slots(&self) -> usize {
        self.slots
    }

    /// Scratch state recorded by the last `predict`.
    pub const fn scratch(&self) -> PerceptronScratch {
        self.scratch
    }

    #[inline(always)]
    fn nudge(&self, w: i16, up: bool) -> i16 {
        if up {
            w.saturating_add(1).min(self.weight_max)
        } else {
            w.saturating_sub(1).max(self.weight_min)
        }
    }
}

impl BranchPredictor for PerceptronPredictor {
    /// Predicts taken if the perceptron output is non-negative.
    ///
    /// Records the output, the prediction and whether the output fell below
    /// the training threshold.
    fn predict(&mut self, pc: u32) -> Outcome {
        let y = self.output(self.slot(pc));
        let prediction = Outcome::from(y >= 0);
        self.scratch = PerceptronScratch {
            output: y,
            prediction,
            needs_train: y.abs() < self.threshold,
        };
        prediction
    }

    /// Updates the weights of `pc`'s perceptron, then shifts the outcome into the history.
    ///
    /// Trains only if the recorded prediction was wrong or below threshold.
    /// The bias moves toward the outcome; each history weight moves up when
    /// its history bit agreed with the outcome and down otherwise.
    fn train(&mut self, pc: u32, outcome: Outcome) {
        let scratch = self.scratch;
        if scratch.prediction != outcome || scratch.needs_train {
            let slot = self.slot(pc);
            let base = slot * self.row_size;
            trace!(
                pc,
                slot,
                output = scratch.output,
                mispredicted = scratch.prediction != outcome,
                "training perceptron"
            );

            self.table[base] = self.nudge(self.table[base], outcome.is_taken());
            for age in 0..self.history_length {
                let idx = base + 1 + age as usize;
                let agrees = self.ghr.outcome(age) == outcome;
                self.table[idx] = self.nudge(self.table[idx], agrees);
            }
        }

        self.ghr.push(outcome);
    }

    fn name(&self) -> &'static str {
        "Custom"
    }

    fn storage_bits(&self) -> usize {
        self.table.len() * self.weight_bits as usize + self.history_length as usize
    }
}
