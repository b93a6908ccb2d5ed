//! Predict/train loop.

use tracing::trace;

use super::trace::BranchEvent;
use crate::bru::BranchPredictor;
use crate::common::TraceError;
use crate::stats::PredictionStats;

/// Drives `predictor` over `events`, predicting then training each branch.
///
/// Follows the [`BranchPredictor`] calling protocol: every `predict` is
/// immediately followed by the matching `train`.
///
/// # Errors
///
/// Stops at the first trace error and returns it.
pub fn run<P, I>(predictor: &mut P, events: I) -> Result<PredictionStats, TraceError>
where
    P: BranchPredictor + ?Sized,
    I: IntoIterator<Item = Result<BranchEvent, TraceError>>,
{
    let mut stats = PredictionStats::default();

    for event in events {
        let BranchEvent { pc, outcome } = event?;
        let prediction = predictor.predict(pc);
        let mispredicted = prediction != outcome;
        if mispredicted {
            trace!(pc, %prediction, %outcome, "mispredicted");
        }
        stats.record(mispredicted);
        predictor.train(pc, outcome);
    }

    Ok(stats)
}
