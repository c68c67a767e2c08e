//! versus eval crate - weighted board heuristics.

use serde::{Deserialize, Serialize};
use versus_core::Board;

/// Coefficients applied to each [`Features`] term. Higher totals are better,
/// so penalties carry negative weights.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvalWeights {
    pub height: f32,
    pub holes: f32,
    pub bumpiness: f32,
    pub lines_cleared: f32,
}

impl EvalWeights {
    pub const fn new(height: f32, holes: f32, bumpiness: f32, lines_cleared: f32) -> Self {
        Self {
            height,
            holes,
            bumpiness,
            lines_cleared,
        }
    }

    pub const fn balanced() -> Self {
        Self::new(-4.0, -7.0, -3.0, 2.0)
    }

    /// Tolerates tall stacks in exchange for clears.
    pub const fn aggressive() -> Self {
        Self::new(3.0, -5.0, 0.5, 5.0)
    }

    /// Keeps the surface flat and hole free.
    pub const fn defensive() -> Self {
        Self::new(-3.0, -10.0, -6.0, 1.5)
    }
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self::balanced()
    }
}

/// Board features measured after a placement has been locked and its rows
/// cleared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Features {
    pub aggregate_height: u32,
    pub holes: u32,
    pub bumpiness: u32,
    pub lines_cleared: u8,
}

impl Features {
    pub fn extract(board: &Board, lines_cleared: u8) -> Self {
        let heights = board.height_map();
        Self {
            aggregate_height: heights.aggregate(),
            holes: board.hole_count(),
            bumpiness: heights.bumpiness(),
            lines_cleared,
        }
    }

    pub fn score(&self, weights: &EvalWeights) -> f32 {
        self.aggregate_height as f32 * weights.height
            + self.holes as f32 * weights.holes
            + self.bumpiness as f32 * weights.bumpiness
            + self.lines_cleared as f32 * weights.lines_cleared
    }
}

pub fn evaluate(board: &Board, weights: &EvalWeights) -> f32 {
    evaluate_with_clear(board, 0, weights)
}

pub fn evaluate_with_clear(board: &Board, lines: u8, weights: &EvalWeights) -> f32 {
    Features::extract(board, lines).score(weights)
}
