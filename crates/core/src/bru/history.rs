//! Branch history registers.
//!
//! A history register is a shift register of the last `W` outcomes, newest in
//! bit 0. Gshare and the tournament's global side use one for the global
//! history; the tournament's local side keeps one per address slot in a
//! [`LocalHistoryTable`]; the perceptron keeps one as its input vector.

use crate::common::{Outcome, mask, shift_in};

/// A `width`-bit outcome history, most recent outcome in bit 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HistoryRegister {
    /// Current history bits; nothing above `width` is ever set.
    value: u64,
    /// Number of outcomes retained (1..=64).
    width: u32,
}

impl HistoryRegister {
    /// Creates an all-not-taken history of `width` bits.
    ///
    /// Widths above 64 are clamped to 64.
    pub const fn new(width: u32) -> Self {
        let width = if width > u64::BITS { u64::BITS } else { width };
        Self { value: 0, width }
    }

    /// Shifts `outcome` in, evicting the oldest outcome.
    #[inline(always)]
    pub const fn push(&mut self, outcome: Outcome) {
        self.value = shift_in(self.value, self.width, outcome);
    }

    /// Returns the raw history bits.
    #[inline(always)]
    pub const fn value(&self) -> u64 {
        self.value
    }

    /// Returns the register width in bits.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Returns the `age`-th most recent outcome (`age == 0` is the newest).
    ///
    /// Ages at or beyond the width read as not-taken.
    #[inline(always)]
    pub const fn outcome(&self, age: u32) -> Outcome {
        if age >= self.width {
            Outcome::NotTaken
        } else {
            Outcome::from_bit(self.value >> age)
        }
    }

    /// Returns the low `bits` of the history, for use as a table index.
    #[inline(always)]
    pub const fn low_bits(&self, bits: u32) -> u64 {
        self.value & mask(bits)
    }
}

/// Per-address history registers, `2^index_bits` of them, each `width` bits.
#[derive(Clone, Debug)]
pub struct LocalHistoryTable {
    registers: Vec<HistoryRegister>,
    index_bits: u32,
}

impl LocalHistoryTable {
    /// Allocates `2^index_bits` all-not-taken registers of `width` bits.
    pub fn new(index_bits: u32, width: u32) -> Self {
        Self {
            registers: vec![HistoryRegister::new(width); 1 << index_bits],
            index_bits,
        }
    }

    /// Maps an address onto its register slot (`pc & mask(index_bits)`).
    #[inline(always)]
    pub const fn slot(&self, pc: u32) -> usize {
        (pc as u64 & mask(self.index_bits)) as usize
    }

    /// Returns the history register for `pc`.
    #[inline(always)]
    pub fn get(&self, pc: u32) -> &HistoryRegister {
        &self.registers[self.slot(pc)]
    }

    /// Shifts `outcome` into the register for `pc`.
    #[inline(always)]
    pub fn push(&mut self, pc: u32, outcome: Outcome) {
        let slot = self.slot(pc);
        self.registers[slot].push(outcome);
    }

    /// Number of registers.
    pub fn len(&self) -> usize {
        self.registers.len()
    }

    /// Always `false`; the table holds at least one register.
    pub fn is_empty(&self) -> bool {
        self.registers.is_empty()
    }

    /// Storage cost in bits.
    pub fn storage_bits(&self) -> usize {
        self.registers.len() * self.registers.first().map_or(0, |r| r.width() as usize)
    }
}
