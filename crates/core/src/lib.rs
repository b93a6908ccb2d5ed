//! Branch direction predictor library.
//!
//! This crate implements trace-driven conditional branch predictors with the following:
//! 1. **Primitives:** Two-bit saturating counters, history registers and pattern tables.
//! 2. **Predictors:** Static (always taken), gshare, tournament and perceptron, behind one trait.
//! 3. **Configuration:** Variant selection and table sizing, from JSON or command-line shorthand.
//! 4. **Simulation:** Branch trace reading and the predict/train driver loop.
//! 5. **Statistics:** Misprediction counts and reporting.

/// Branch predictors and their shared primitives.
pub mod bru;
/// Common types (outcome, bit helpers, errors).
pub mod common;
/// Predictor configuration (defaults, variant selector, validation).
pub mod config;
/// Trace reading and the driver loop.
pub mod sim;
/// Prediction statistics collection and reporting.
pub mod stats;

/// Trait implemented by every predictor.
pub use crate::bru::{BranchPredictor, Predictor};
/// Branch direction and error types.
pub use crate::common::{ConfigError, Outcome, TraceError};
/// Root configuration type; use `PredictorConfig::default()`, parse shorthand, or deserialize JSON.
pub use crate::config::{PredictorConfig, PredictorKind};
/// Prediction counts.
pub use crate::stats::PredictionStats;
