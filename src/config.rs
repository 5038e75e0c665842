//! Predictor configuration.
//!
//! A [`PredictorConfig`] is supplied once when a predictor is built and is
//! never changed afterwards. It can be deserialized with serde, where any
//! missing width falls back to a default.

use std::str::FromStr;
use serde::Deserialize;
use crate::error::ConfigError;

/// Default configuration constants.
mod defaults {
    /// Global history width (16K-entry global tables).
    pub const GHISTORY_BITS: usize = 14;

    /// Local history width (1K-entry local pattern table).
    pub const LHISTORY_BITS: usize = 10;

    /// Program counter bits used to select a local history register.
    pub const PC_INDEX_BITS: usize = 10;

    /// History width of the custom predictor's gshare component.
    pub const GSHARE_BITS: usize = 13;
}

/// Largest supported width for any table or history register.
pub const MAX_HISTORY_BITS: usize = 24;

/// The available branch predictors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum PredictorKind {
    /// Always predict taken.
    Static,
    /// Counter table indexed by PC XOR global history.
    #[default]
    #[serde(alias = "GShare")]
    Gshare,
    /// Choice table selecting between global and local predictors.
    Tournament,
    /// Per-branch voting between global, gshare and local predictors.
    Custom,
}
impl PredictorKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Static => "Static",
            Self::Gshare => "Gshare",
            Self::Tournament => "Tournament",
            Self::Custom => "Custom",
        }
    }
}

impl std::fmt::Display for PredictorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PredictorKind {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "static" => Ok(Self::Static),
            "gshare" => Ok(Self::Gshare),
            "tournament" => Ok(Self::Tournament),
            "custom" => Ok(Self::Custom),
            _ => Err(ConfigError::UnknownPredictor(s.to_string())),
        }
    }
}

/// Parameters used to build a predictor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PredictorConfig {
    /// Which predictor to build.
    #[serde(default)]
    pub kind: PredictorKind,

    /// Number of bits of global history.
    #[serde(default = "PredictorConfig::default_ghistory_bits")]
    pub ghistory_bits: usize,

    /// Number of bits of per-branch (local) history.
    #[serde(default = "PredictorConfig::default_lhistory_bits")]
    pub lhistory_bits: usize,

    /// Number of program counter bits used to select local history.
    #[serde(default = "PredictorConfig::default_pc_index_bits")]
    pub pc_index_bits: usize,

    /// Number of bits of history used by the custom predictor's gshare
    /// component.
    #[serde(default = "PredictorConfig::default_gshare_bits")]
    pub gshare_bits: usize,
}

impl PredictorConfig {
    fn default_ghistory_bits() -> usize { defaults::GHISTORY_BITS }
    fn default_lhistory_bits() -> usize { defaults::LHISTORY_BITS }
    fn default_pc_index_bits() -> usize { defaults::PC_INDEX_BITS }
    fn default_gshare_bits() -> usize { defaults::GSHARE_BITS }

    /// Default widths for the given predictor.
    pub fn new(kind: PredictorKind) -> Self {
        Self { kind, ..Self::default() }
    }

    pub fn with_ghistory_bits(mut self, bits: usize) -> Self {
        self.ghistory_bits = bits;
        self
    }

    pub fn with_lhistory_bits(mut self, bits: usize) -> Self {
        self.lhistory_bits = bits;
        self
    }

    pub fn with_pc_index_bits(mut self, bits: usize) -> Self {
        self.pc_index_bits = bits;
        self
    }

    pub fn with_gshare_bits(mut self, bits: usize) -> Self {
        self.gshare_bits = bits;
        self
    }

    /// The widths read by the selected predictor, paired with their names.
    fn used_widths(&self) -> Vec<(&'static str, usize)> {
        match self.kind {
            PredictorKind::Static => vec![],
            PredictorKind::Gshare => vec![
                ("ghistory_bits", self.ghistory_bits),
            ],
            PredictorKind::Tournament => vec![
                ("ghistory_bits", self.ghistory_bits),
                ("lhistory_bits", self.lhistory_bits),
                ("pc_index_bits", self.pc_index_bits),
            ],
            PredictorKind::Custom => vec![
                ("ghistory_bits", self.ghistory_bits),
                ("lhistory_bits", self.lhistory_bits),
                ("pc_index_bits", self.pc_index_bits),
                ("gshare_bits", self.gshare_bits),
            ],
        }
    }

    /// Check that every width used by the selected predictor is in the
    /// range `1..=MAX_HISTORY_BITS`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, bits) in self.used_widths() {
            if bits == 0 {
                return Err(ConfigError::ZeroWidth {
                    field,
                    predictor: self.kind.name(),
                });
            }
            if bits > MAX_HISTORY_BITS {
                return Err(ConfigError::WidthTooLarge {
                    field,
                    bits,
                    max: MAX_HISTORY_BITS,
                });
            }
        }
        Ok(())
    }
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            kind: PredictorKind::default(),
            ghistory_bits: defaults::GHISTORY_BITS,
            lhistory_bits: defaults::LHISTORY_BITS,
            pc_index_bits: defaults::PC_INDEX_BITS,
            gshare_bits: defaults::GSHARE_BITS,
        }
    }
}
