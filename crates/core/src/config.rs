//! Configuration system for the branch predictors.
//!
//! This module defines the configuration structures used to select and size a
//! predictor. It provides:
//! 1. **Defaults:** Baseline table widths and perceptron geometry.
//! 2. **Structures:** `PredictorConfig` and its nested `PerceptronConfig`.
//! 3. **Enums:** The predictor variant selector.
//! 4. **Validation:** Width and geometry checks performed before any table is allocated.
//!
//! Configuration is supplied as JSON (`PredictorConfig::from_json`), as the
//! command-line shorthand (`"gshare:13"`, parsed via `FromStr`), or built from
//! `PredictorConfig::default()`.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::bru::counter::SaturatingCounter;
use crate::common::ConfigError;

/// Default configuration constants.
mod defaults {
    use crate::bru::counter::SaturatingCounter;

    /// Global history width for gshare and the tournament's global side (16K entries).
    pub const GHISTORY_BITS: u32 = 14;

    /// Local history width in the tournament predictor (1K-entry local table).
    pub const LHISTORY_BITS: u32 = 10;

    /// Address bits selecting a local history register (1K registers).
    pub const PC_INDEX_BITS: u32 = 10;

    /// Initial state of every chooser entry (leaning toward the global predictor).
    pub const CHOOSER_INIT: SaturatingCounter = SaturatingCounter::WeakTaken;

    /// Perceptron global history length.
    pub const PERCEPTRON_HISTORY: u32 = 31;

    /// Number of perceptrons in the bank.
    ///
    /// With 31 history weights plus the bias at 8 bits each this is a 64 Kbit budget.
    pub const PERCEPTRON_SLOTS: usize = 256;

    /// Width of each perceptron weight in bits.
    pub const PERCEPTRON_WEIGHT_BITS: u32 = 8;
}

/// Largest accepted width for a counter table or local history table.
pub const MAX_TABLE_BITS: u32 = 30;

/// Largest accepted perceptron history length (one `u64` history register).
pub const MAX_PERCEPTRON_HISTORY: u32 = 64;

/// Branch predictor variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum PredictorKind {
    /// Always predicts taken.
    #[default]
    #[serde(alias = "static", alias = "STATIC")]
    Static,
    /// Global history XOR pc indexed table of 2-bit counters.
    #[serde(alias = "gshare", alias = "GShare", alias = "GSHARE")]
    Gshare,
    /// Chooser arbitrating between a gshare and a local-history predictor.
    #[serde(alias = "tournament", alias = "TOURNAMENT")]
    Tournament,
    /// Perceptron predictor over global history.
    #[serde(alias = "custom", alias = "CUSTOM", alias = "Perceptron", alias = "perceptron")]
    Custom,
    /// Any name not listed above; rejected by [`PredictorConfig::validate`].
    #[serde(other)]
    Unrecognized,
}

impl PredictorKind {
    /// Returns the display name used in reports.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Static => "Static",
            Self::Gshare => "Gshare",
            Self::Tournament => "Tournament",
            Self::Custom => "Custom",
            Self::Unrecognized => "Unrecognized",
        }
    }
}

impl fmt::Display for PredictorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Root predictor configuration.
///
/// # Examples
///
/// ```
/// use bpsim_core::config::{PredictorConfig, PredictorKind};
///
/// let json = r#"{
///     "kind": "Tournament",
///     "ghistory_bits": 9,
///     "lhistory_bits": 10,
///     "pc_index_bits": 10
/// }"#;
///
/// let config = PredictorConfig::from_json(json).unwrap();
/// assert_eq!(config.kind, PredictorKind::Tournament);
/// assert_eq!(config.ghistory_bits, 9);
/// assert_eq!(config.perceptron.history_length, 31);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PredictorConfig {
    /// Predictor variant
    #[serde(default)]
    pub kind: PredictorKind,

    /// Global history width in bits (gshare and tournament)
    #[serde(default = "PredictorConfig::default_ghistory_bits")]
    pub ghistory_bits: u32,

    /// Local history width in bits (tournament)
    #[serde(default = "PredictorConfig::default_lhistory_bits")]
    pub lhistory_bits: u32,

    /// Address bits selecting a local history register (tournament)
    #[serde(default = "PredictorConfig::default_pc_index_bits")]
    pub pc_index_bits: u32,

    /// Initial chooser state (tournament)
    #[serde(default = "PredictorConfig::default_chooser_init")]
    pub chooser_init: SaturatingCounter,

    /// Perceptron geometry (custom)
    #[serde(default)]
    pub perceptron: PerceptronConfig,
}

impl PredictorConfig {
    fn default_ghistory_bits() -> u32 {
        defaults::GHISTORY_BITS
    }

    fn default_lhistory_bits() -> u32 {
        defaults::LHISTORY_BITS
    }

    fn default_pc_index_bits() -> u32 {
        defaults::PC_INDEX_BITS
    }

    fn default_chooser_init() -> SaturatingCounter {
        defaults::CHOOSER_INIT
    }

    /// Creates a default configuration for `kind`.
    pub fn for_kind(kind: PredictorKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Deserializes and validates a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] on malformed input and any error
    /// [`validate`](Self::validate) reports.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every width the selected variant uses is allocatable.
    ///
    /// Widths belonging to other variants are not inspected.
    ///
    /// # Errors
    ///
    /// Returns the first fault found, see [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.kind {
            PredictorKind::Static => Ok(()),
            PredictorKind::Gshare => check_width("ghistory_bits", self.ghistory_bits, MAX_TABLE_BITS),
            PredictorKind::Tournament => {
                check_width("ghistory_bits", self.ghistory_bits, MAX_TABLE_BITS)?;
                check_width("lhistory_bits", self.lhistory_bits, MAX_TABLE_BITS)?;
                check_width("pc_index_bits", self.pc_index_bits, MAX_TABLE_BITS)
            }
            PredictorKind::Custom => self.perceptron.validate(),
            PredictorKind::Unrecognized => {
                Err(ConfigError::UnknownPredictor(self.kind.name().to_owned()))
            }
        }
    }
}

impl Default for PredictorConfig {
    /// Creates a static predictor configuration with default table widths.
    fn default() -> Self {
        Self {
            kind: PredictorKind::default(),
            ghistory_bits: defaults::GHISTORY_BITS,
            lhistory_bits: defaults::LHISTORY_BITS,
            pc_index_bits: defaults::PC_INDEX_BITS,
            chooser_init: defaults::CHOOSER_INIT,
            perceptron: PerceptronConfig::default(),
        }
    }
}

impl FromStr for PredictorConfig {
    type Err = ConfigError;

    /// Parses the command-line shorthand.
    ///
    /// Accepted forms: `static`, `gshare:<G>`, `tournament:<G>:<L>:<P>`,
    /// `custom` (alias `perceptron`). Names are case-insensitive; omitted
    /// widths take their defaults.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split(':');
        let name = parts.next().unwrap_or_default().to_ascii_lowercase();

        let mut widths = Vec::new();
        for part in parts {
            let bits = part
                .parse::<u32>()
                .map_err(|_| ConfigError::Parse(s.to_owned()))?;
            widths.push(bits);
        }

        let mut config = match name.as_str() {
            "static" => Self::for_kind(PredictorKind::Static),
            "gshare" => Self::for_kind(PredictorKind::Gshare),
            "tournament" => Self::for_kind(PredictorKind::Tournament),
            "custom" | "perceptron" => Self::for_kind(PredictorKind::Custom),
            _ => return Err(ConfigError::UnknownPredictor(name)),
        };

        match (config.kind, widths.as_slice()) {
            (_, []) => {}
            (PredictorKind::Gshare, [g]) => config.ghistory_bits = *g,
            (PredictorKind::Tournament, [g, l, p]) => {
                config.ghistory_bits = *g;
                config.lhistory_bits = *l;
                config.pc_index_bits = *p;
            }
            _ => return Err(ConfigError::Parse(s.to_owned())),
        }

        config.validate()?;
        Ok(config)
    }
}

impl fmt::Display for PredictorConfig {
    /// Formats the configuration back into its command-line shorthand.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            PredictorKind::Static => write!(f, "static"),
            PredictorKind::Gshare => write!(f, "gshare:{}", self.ghistory_bits),
            PredictorKind::Tournament => write!(
                f,
                "tournament:{}:{}:{}",
                self.ghistory_bits, self.lhistory_bits, self.pc_index_bits
            ),
            PredictorKind::Custom => write!(f, "custom"),
            PredictorKind::Unrecognized => write!(f, "unrecognized"),
        }
    }
}

/// Perceptron branch predictor configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PerceptronConfig {
    /// Global history length
    #[serde(default = "PerceptronConfig::default_history")]
    pub history_length: u32,

    /// Number of perceptrons in the bank
    #[serde(default = "PerceptronConfig::default_slots")]
    pub slots: usize,

    /// Width of each signed weight in bits
    #[serde(default = "PerceptronConfig::default_weight_bits")]
    pub weight_bits: u32,
}

impl PerceptronConfig {
    fn default_history() -> u32 {
        defaults::PERCEPTRON_HISTORY
    }

    fn default_slots() -> usize {
        defaults::PERCEPTRON_SLOTS
    }

    fn default_weight_bits() -> u32 {
        defaults::PERCEPTRON_WEIGHT_BITS
    }

    /// Checks history length, slot count and weight width.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroWidth`] / [`ConfigError::WidthTooLarge`] for
    /// the history, [`ConfigError::ZeroSlots`] or [`ConfigError::InvalidWeightBits`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_width("history_length", self.history_length, MAX_PERCEPTRON_HISTORY)?;
        if self.slots == 0 {
            return Err(ConfigError::ZeroSlots);
        }
        if !(2..=16).contains(&self.weight_bits) {
            return Err(ConfigError::InvalidWeightBits(self.weight_bits));
        }
        Ok(())
    }
}

impl Default for PerceptronConfig {
    fn default() -> Self {
        Self {
            history_length: defaults::PERCEPTRON_HISTORY,
            slots: defaults::PERCEPTRON_SLOTS,
            weight_bits: defaults::PERCEPTRON_WEIGHT_BITS,
        }
    }
}

fn check_width(field: &'static str, bits: u32, max: u32) -> Result<(), ConfigError> {
    if bits == 0 {
        Err(ConfigError::ZeroWidth { field })
    } else if bits > max {
        Err(ConfigError::WidthTooLarge { field, bits, max })
    } else {
        Ok(())
    }
}
