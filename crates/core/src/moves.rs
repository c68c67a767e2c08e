//! Placement value type.

use crate::{Piece, Rotation};
use serde::{Deserialize, Serialize};

/// Final resting position of a piece.
/// `column` is the left edge and `row` the bottom edge of the piece's
/// bounding box after it has been dropped.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub piece: Piece,
    pub rotation: Rotation,
    pub column: usize,
    pub row: usize,
}

impl Placement {
    pub fn new(piece: Piece, rotation: Rotation, column: usize, row: usize) -> Self {
        Self {
            piece,
            rotation,
            column,
            row,
        }
    }

    /// Absolute `(x, y)` cells covered by this placement.
    pub fn cells(&self) -> [(usize, usize); 4] {
        self.piece
            .cells(self.rotation)
            .map(|(dx, dy)| (self.column + dx as usize, self.row + dy as usize))
    }
}
