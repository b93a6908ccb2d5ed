//! Branch direction.

use std::fmt;
use std::ops::Not;

/// Direction of a conditional branch, either predicted or resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Outcome {
    /// The branch falls through.
    #[default]
    NotTaken,
    /// The branch jumps to its target.
    Taken,
}

impl Outcome {
    /// Returns the outcome as a history bit (Taken = 1).
    #[inline(always)]
    pub const fn bit(self) -> u64 {
        match self {
            Self::Taken => 1,
            Self::NotTaken => 0,
        }
    }

    /// Returns `true` for [`Outcome::Taken`].
    #[inline(always)]
    pub const fn is_taken(self) -> bool {
        matches!(self, Self::Taken)
    }

    /// Decodes a history bit; any non-zero value is Taken.
    #[inline(always)]
    pub const fn from_bit(bit: u64) -> Self {
        if bit & 1 != 0 {
            Self::Taken
        } else {
            Self::NotTaken
        }
    }
}

impl From<bool> for Outcome {
    fn from(taken: bool) -> Self {
        if taken { Self::Taken } else { Self::NotTaken }
    }
}

impl From<Outcome> for bool {
    fn from(outcome: Outcome) -> Self {
        outcome.is_taken()
    }
}

impl Not for Outcome {
    type Output = Self;

    fn not(self) -> Self {
        match self {
            Self::Taken => Self::NotTaken,
            Self::NotTaken => Self::Taken,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Taken => write!(f, "Taken"),
            Self::NotTaken => write!(f, "NotTaken"),
        }
    }
}
