//! Fixed-width bit helpers.
//!
//! Every table in the crate is sized `2^bits` and every index is produced by
//! masking, so these two functions carry the out-of-range guarantee for the
//! whole predictor engine.

use super::Outcome;

/// Returns a mask with the `bits` least-significant bits set.
///
/// `bits` of 64 or more yields `u64::MAX`; `bits == 0` yields `0`.
///
/// # Examples
///
/// ```
/// use bpsim_core::common::mask;
///
/// assert_eq!(mask(0), 0);
/// assert_eq!(mask(3), 0b111);
/// assert_eq!(mask(64), u64::MAX);
/// ```
#[inline(always)]
pub const fn mask(bits: u32) -> u64 {
    if bits >= u64::BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Shifts `outcome` into bit 0 of a `bits`-wide history value.
///
/// The oldest outcome (bit `bits - 1`) is evicted and anything above the
/// width is cleared: `((history << 1) | outcome) & mask(bits)`.
#[inline(always)]
pub const fn shift_in(history: u64, bits: u32, outcome: Outcome) -> u64 {
    ((history << 1) | outcome.bit()) & mask(bits)
}
