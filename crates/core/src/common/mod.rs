//! Common utilities and types shared by every predictor.
//!
//! This module provides the building blocks used across the crate. It includes:
//! 1. **Bit Helpers:** Width masks and history shift-in on fixed-width integers.
//! 2. **Outcome:** The resolved (or predicted) direction of a conditional branch.
//! 3. **Error Handling:** Configuration and trace ingestion errors.

/// Fixed-width mask and shift helpers.
pub mod bits;

/// Error types for configuration and trace parsing.
pub mod error;

/// Branch direction type.
pub mod outcome;

pub use bits::{mask, shift_in};
pub use error::{ConfigError, TraceError};
pub use outcome::Outcome;
