//! Prediction statistics collection and reporting.
//!
//! Tracks how many conditional branches were predicted and how many of those
//! predictions were wrong, and prints the classic misprediction report.

use std::fmt;

/// Running branch prediction counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PredictionStats {
    /// Conditional branches predicted.
    pub branches: u64,
    /// Predictions that disagreed with the resolved outcome.
    pub mispredictions: u64,
}

impl PredictionStats {
    /// Records one predicted branch.
    #[inline(always)]
    pub const fn record(&mut self, mispredicted: bool) {
        self.branches += 1;
        if mispredicted {
            self.mispredictions += 1;
        }
    }

    /// Predictions that matched the resolved outcome.
    pub const fn correct(&self) -> u64 {
        self.branches - self.mispredictions
    }

    /// Mispredictions as a percentage of branches; `0.0` when nothing was predicted.
    pub fn misprediction_rate(&self) -> f64 {
        if self.branches == 0 {
            0.0
        } else {
            100.0 * self.mispredictions as f64 / self.branches as f64
        }
    }

    /// Correct predictions as a percentage of branches; `0.0` when nothing was predicted.
    pub fn accuracy(&self) -> f64 {
        if self.branches == 0 {
            0.0
        } else {
            100.0 - self.misprediction_rate()
        }
    }

    /// Prints the report to stdout.
    pub fn print(&self) {
        print!("{self}");
    }
}

impl fmt::Display for PredictionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Branches:        {:10}", self.branches)?;
        writeln!(f, "Incorrect:       {:10}", self.mispredictions)?;
        writeln!(f, "Misprediction Rate: {:7.3}", self.misprediction_rate())
    }
}
