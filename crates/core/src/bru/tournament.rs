//! Tournament Branch Predictor.
//!
//! A hybrid predictor that employs a meta-predictor (the chooser) to select
//! between a Global predictor (gshare) and a Local predictor (per-address
//! history feeding a shared pattern table). This allows the predictor to
//! adapt to different types of branch behaviors.

use tracing::debug;

use super::{
    BranchPredictor,
    counter::SaturatingCounter,
    gshare::GSharePredictor,
    history::LocalHistoryTable,
    table::PredictionTable,
};
use crate::common::Outcome;

/// Tournament Predictor structure.
#[derive(Clone, Debug)]
pub struct TournamentPredictor {
    /// Global component; its history also indexes the chooser.
    global: GSharePredictor,

    /// Local History Table storing history patterns per branch.
    local_history: LocalHistoryTable,

    /// Local Pattern History Table indexed by local history patterns.
    local_pht: PredictionTable,

    /// Choice Prediction Table (2-bit counters).
    /// Selects between Local (0,1) and Global (2,3) predictors.
    chooser: PredictionTable,
}

/// Both component predictions for one branch, taken before any update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComponentPredictions {
    /// Prediction of the global (gshare) component.
    pub global: Outcome,
    /// Prediction of the local component.
    pub local: Outcome,
    /// `true` if the chooser currently selects the global component.
    pub use_global: bool,
}

impl TournamentPredictor {
    /// Creates a new Tournament Predictor.
    ///
    /// # Arguments
    ///
    /// * `ghistory_bits` - Global history width; sizes the gshare table and the chooser
    /// * `lhistory_bits` - Local history width; sizes the local pattern table
    /// * `pc_index_bits` - Address bits selecting a local history register
    /// * `chooser_init` - Initial state of every chooser entry
    pub fn new(
        ghistory_bits: u32,
        lhistory_bits: u32,
        pc_index_bits: u32,
        chooser_init: SaturatingCounter,
    ) -> Self {
        debug!(
            ghistory_bits,
            lhistory_bits,
            pc_index_bits,
            ?chooser_init,
            "building tournament predictor"
        );
        Self {
            global: GSharePredictor::new(ghistory_bits),
            local_history: LocalHistoryTable::new(pc_index_bits, lhistory_bits),
            local_pht: PredictionTable::new(lhistory_bits, SaturatingCounter::WeakNotTaken),
            chooser: PredictionTable::new(ghistory_bits, chooser_init),
        }
    }

    /// Index into the chooser: the global history alone, masked to its width.
    #[inline(always)]
    fn choice_index(&self) -> u64 {
        let ghr = self.global.history();
        ghr.low_bits(self.global.bits())
    }

    /// Retrieves the prediction from the Local component.
    #[inline(always)]
    fn local_prediction(&self, pc: u32) -> Outcome {
        let pattern = self.local_history.get(pc).value();
        self.local_pht.read(pattern)
    }

    /// Queries both components and the chooser without changing any state.
    pub fn components(&self, pc: u32) -> ComponentPredictions {
        ComponentPredictions {
            global: self.global.lookup(pc),
            local: self.local_prediction(pc),
            use_global: self.chooser.read(self.choice_index()).is_taken(),
        }
    }

    /// Global (gshare) component.
    pub const fn global(&self) -> &GSharePredictor {
        &self.global
    }

    /// Per-address local history registers.
    pub const fn local_history(&self) -> &LocalHistoryTable {
        &self.local_history
    }

    /// Local pattern history table.
    pub const fn local_table(&self) -> &PredictionTable {
        &self.local_pht
    }

    /// Chooser table; taken-leaning entries select the global component.
    pub const fn chooser(&self) -> &PredictionTable {
        &self.chooser
    }
}

impl BranchPredictor for TournamentPredictor {
    /// Uses the chooser entry for the current global history to pick the
    /// global or the local prediction.
    fn predict(&mut self, pc: u32) -> Outcome {
        let c = self.components(pc);
        if c.use_global { c.global } else { c.local }
    }

    /// Updates the Choice PHT based on which predictor was correct, then
    /// updates both the Global and Local predictor tables and histories.
    ///
    /// The chooser only moves when exactly one component was right.
    fn train(&mut self, pc: u32, outcome: Outcome) {
        let choice_idx = self.choice_index();
        let c = self.components(pc);

        let global_correct = c.global == outcome;
        let local_correct = c.local == outcome;

        if global_correct != local_correct {
            let toward = if global_correct {
                Outcome::Taken
            } else {
                Outcome::NotTaken
            };
            self.chooser.bump(choice_idx, toward);
        }

        self.global.train(pc, outcome);

        let pattern = self.local_history.get(pc).value();
        self.local_pht.bump(pattern, outcome);
        self.local_history.push(pc, outcome);
    }

    fn name(&self) -> &'static str {
        "Tournament"
    }

    fn storage_bits(&self) -> usize {
        self.global.storage_bits()
            + self.local_history.storage_bits()
            + self.local_pht.storage_bits()
            + self.chooser.storage_bits()
    }
}
