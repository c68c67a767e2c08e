use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use versus_core::Piece;
use versus_eval::EvalWeights;

const AGGRESSIVE_PREFERENCE: &[Piece] = &[Piece::S, Piece::Z, Piece::T, Piece::J, Piece::L];
const DEFENSIVE_PREFERENCE: &[Piece] = &[Piece::I, Piece::O];

/// An agent's personality: how it scores its own placements and which
/// pieces it hands to the opponent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Strategy {
    #[default]
    Balanced,
    Aggressive,
    Defensive,
    Custom {
        weights: EvalWeights,
        #[serde(default)]
        preference: Vec<Piece>,
    },
}

impl Strategy {
    pub fn weights(&self) -> EvalWeights {
        match self {
            Strategy::Balanced => EvalWeights::balanced(),
            Strategy::Aggressive => EvalWeights::aggressive(),
            Strategy::Defensive => EvalWeights::defensive(),
            Strategy::Custom { weights, .. } => *weights,
        }
    }

    /// Ranked piece types this strategy sends to the opponent. Aggressive
    /// leads with the awkward S/Z/T, Defensive with the easy I/O, Balanced
    /// has no preference.
    pub fn preferred_opponent_pieces(&self) -> &[Piece] {
        match self {
            Strategy::Balanced => &[],
            Strategy::Aggressive => AGGRESSIVE_PREFERENCE,
            Strategy::Defensive => DEFENSIVE_PREFERENCE,
            Strategy::Custom { preference, .. } => preference,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Balanced => "balanced",
            Strategy::Aggressive => "aggressive",
            Strategy::Defensive => "defensive",
            Strategy::Custom { .. } => "custom",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown strategy `{0}` (expected balanced, aggressive or defensive)")]
pub struct StrategyParseError(pub String);

impl FromStr for Strategy {
    type Err = StrategyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "balanced" | "greedy" => Ok(Strategy::Balanced),
            "aggressive" => Ok(Strategy::Aggressive),
            "defensive" => Ok(Strategy::Defensive),
            _ => Err(StrategyParseError(s.to_string())),
        }
    }
}
