//! Error definitions.
//!
//! The predictor engine itself has no runtime failure modes: indices are
//! always masked to the table width. Faults are confined to two places:
//! 1. **Configuration:** An unknown predictor variant or an unusable table width,
//!    detected when a predictor is constructed.
//! 2. **Trace Ingestion:** I/O failures and malformed lines while reading a branch trace.

use std::io;

use thiserror::Error;

/// Fault detected while validating a predictor configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configured variant name is not one of the known predictors.
    #[error("unknown predictor type `{0}` (expected static, gshare, tournament or custom)")]
    UnknownPredictor(String),

    /// A width required by the selected variant is zero.
    #[error("`{field}` must be at least 1 bit")]
    ZeroWidth {
        /// Name of the offending configuration field.
        field: &'static str,
    },

    /// A width exceeds what the table allocation can sensibly hold.
    #[error("`{field}` is {bits} bits, maximum is {max}")]
    WidthTooLarge {
        /// Name of the offending configuration field.
        field: &'static str,
        /// Configured width.
        bits: u32,
        /// Largest accepted width.
        max: u32,
    },

    /// Perceptron weights must be between 2 and 16 bits wide.
    #[error("perceptron weight width must be in 2..=16 bits, got {0}")]
    InvalidWeightBits(u32),

    /// The perceptron bank has no slots.
    #[error("perceptron bank must have at least one slot")]
    ZeroSlots,

    /// The command-line shorthand could not be parsed.
    #[error("invalid predictor shorthand `{0}`")]
    Parse(String),

    /// The JSON configuration could not be deserialized.
    #[error("invalid predictor configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Fault raised while reading a branch trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The underlying reader failed.
    #[error("failed to read trace: {0}")]
    Io(#[from] io::Error),

    /// A line did not match `<hex pc> <0|1>`.
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number in the trace.
        line: usize,
        /// Description of what was wrong.
        message: String,
    },
}
