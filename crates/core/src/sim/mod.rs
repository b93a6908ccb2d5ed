//! Trace-driven simulation.
//!
//! Everything the predictor engine deliberately knows nothing about lives
//! here: reading branch traces and driving a predictor over them.

/// Predict/train loop over a stream of branch events.
pub mod driver;

/// Branch trace reader.
pub mod trace;

pub use driver::run;
pub use trace::{BranchEvent, TraceReader};
