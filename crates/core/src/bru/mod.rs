//! Branch prediction unit (BRU) implementations.
//!
//! This module contains the direction predictors: static, gshare,
//! tournament and perceptron, together with the primitives they share
//! (saturating counters, history registers and pattern tables).

pub use self::branch_predictor::BranchPredictor;

/// Branch predictor trait and calling protocol.
pub mod branch_predictor;

/// Two-bit saturating counter.
pub mod counter;

/// Global history branch predictor (gshare algorithm).
pub mod gshare;

/// Global and per-address history registers.
pub mod history;

/// Perceptron-based neural branch predictor.
pub mod perceptron;

/// Static branch predictor (always taken).
pub mod static_bp;

/// Pattern history table of saturating counters.
pub mod table;

/// Tournament branch predictor (combines local and global predictors).
pub mod tournament;

use tracing::{debug, warn};

use self::{
    gshare::GSharePredictor,
    perceptron::PerceptronPredictor,
    static_bp::{FallbackPredictor, StaticPredictor},
    tournament::TournamentPredictor,
};
use crate::common::{ConfigError, Outcome};
use crate::config::{PredictorConfig, PredictorKind};

/// Enum wrapper for static dispatch of Branch Predictors.
///
/// Each variant owns all of its tables; separate instances share nothing.
#[derive(Clone, Debug)]
pub enum Predictor {
    /// Always taken.
    Static(StaticPredictor),
    /// Gshare.
    Gshare(GSharePredictor),
    /// Tournament.
    Tournament(TournamentPredictor),
    /// Perceptron.
    Custom(PerceptronPredictor),
    /// Always not-taken; stands in for a configuration that was rejected.
    Fallback(FallbackPredictor),
}

impl Predictor {
    /// Builds the predictor selected by `config`, allocating and resetting all of its state.
    ///
    /// # Errors
    ///
    /// Returns the fault reported by [`PredictorConfig::validate`]; nothing is
    /// allocated in that case.
    pub fn new(config: &PredictorConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let predictor = match config.kind {
            PredictorKind::Static => Self::Static(StaticPredictor::new()),
            PredictorKind::Gshare => Self::Gshare(GSharePredictor::new(config.ghistory_bits)),
            PredictorKind::Tournament => Self::Tournament(TournamentPredictor::new(
                config.ghistory_bits,
                config.lhistory_bits,
                config.pc_index_bits,
                config.chooser_init,
            )),
            PredictorKind::Custom => Self::Custom(PerceptronPredictor::new(&config.perceptron)),
            PredictorKind::Unrecognized => {
                return Err(ConfigError::UnknownPredictor(config.kind.name().to_owned()));
            }
        };

        debug!(
            predictor = predictor.name(),
            storage_bits = predictor.storage_bits(),
            "predictor initialized"
        );
        Ok(predictor)
    }

    /// Builds the predictor selected by `config`, or an always-not-taken
    /// [`Predictor::Fallback`] if the configuration is rejected.
    pub fn new_or_fallback(config: &PredictorConfig) -> Self {
        Self::new(config).unwrap_or_else(|err| {
            warn!(%err, "falling back to not-taken predictor");
            Self::Fallback(FallbackPredictor)
        })
    }
}

impl BranchPredictor for Predictor {
    #[inline(always)]
    fn predict(&mut self, pc: u32) -> Outcome {
        match self {
            Self::Static(bp) => bp.predict(pc),
            Self::Gshare(bp) => bp.predict(pc),
            Self::Tournament(bp) => bp.predict(pc),
            Self::Custom(bp) => bp.predict(pc),
            Self::Fallback(bp) => bp.predict(pc),
        }
    }

    #[inline(always)]
    fn train(&mut self, pc: u32, outcome: Outcome) {
        match self {
            Self::Static(bp) => bp.train(pc, outcome),
            Self::Gshare(bp) => bp.train(pc, outcome),
            Self::Tournament(bp) => bp.train(pc, outcome),
            Self::Custom(bp) => bp.train(pc, outcome),
            Self::Fallback(bp) => bp.train(pc, outcome),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Static(bp) => bp.name(),
            Self::Gshare(bp) => bp.name(),
            Self::Tournament(bp) => bp.name(),
            Self::Custom(bp) => bp.name(),
            Self::Fallback(bp) => bp.name(),
        }
    }

    fn storage_bits(&self) -> usize {
        match self {
            Self::Static(bp) => bp.storage_bits(),
            Self::Gshare(bp) => bp.storage_bits(),
            Self::Tournament(bp) => bp.storage_bits(),
            Self::Custom(bp) => bp.storage_bits(),
            Self::Fallback(bp) => bp.storage_bits(),
        }
    }
}
