//! Two-bit saturating counter.
//!
//! The leaf component of every predictor in this crate. A counter holds one
//! of four ordered states and moves one step toward the observed outcome,
//! clamping at either end instead of wrapping. The upper two states predict
//! taken, the lower two not-taken, which gives each entry one outcome of
//! hysteresis before its prediction flips.

use serde::Deserialize;

use crate::common::Outcome;

/// Four-state saturating counter, ordered `StrongNotTaken < ... < StrongTaken`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[repr(u8)]
pub enum SaturatingCounter {
    /// Strongly predicts not-taken (0).
    StrongNotTaken = 0,
    /// Weakly predicts not-taken (1).
    #[default]
    WeakNotTaken = 1,
    /// Weakly predicts taken (2).
    WeakTaken = 2,
    /// Strongly predicts taken (3).
    StrongTaken = 3,
}

impl SaturatingCounter {
    /// All states in ascending order.
    pub const ALL: [Self; 4] = [
        Self::StrongNotTaken,
        Self::WeakNotTaken,
        Self::WeakTaken,
        Self::StrongTaken,
    ];

    /// Returns the state one step toward `outcome`, clamped at the extremes.
    #[inline(always)]
    #[must_use]
    pub const fn bump(self, outcome: Outcome) -> Self {
        match (self, outcome) {
            (Self::StrongNotTaken | Self::WeakNotTaken, Outcome::NotTaken) => Self::StrongNotTaken,
            (Self::WeakTaken, Outcome::NotTaken) => Self::WeakNotTaken,
            (Self::StrongTaken, Outcome::NotTaken) => Self::WeakTaken,
            (Self::StrongNotTaken, Outcome::Taken) => Self::WeakNotTaken,
            (Self::WeakNotTaken, Outcome::Taken) => Self::WeakTaken,
            (Self::WeakTaken | Self::StrongTaken, Outcome::Taken) => Self::StrongTaken,
        }
    }

    /// Returns the predicted direction: taken iff the state is at least `WeakTaken`.
    #[inline(always)]
    pub const fn read(self) -> Outcome {
        match self {
            Self::StrongNotTaken | Self::WeakNotTaken => Outcome::NotTaken,
            Self::WeakTaken | Self::StrongTaken => Outcome::Taken,
        }
    }

    /// Returns the ordinal value (0..=3).
    #[inline(always)]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Builds a counter from its ordinal value, saturating anything above 3.
    pub const fn from_value(value: u8) -> Self {
        match value {
            0 => Self::StrongNotTaken,
            1 => Self::WeakNotTaken,
            2 => Self::WeakTaken,
            _ => Self::StrongTaken,
        }
    }

    /// Returns `true` for the two strong states.
    pub const fn is_strong(self) -> bool {
        matches!(self, Self::StrongNotTaken | Self::StrongTaken)
    }
}
