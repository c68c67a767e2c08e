//! Legal placement generation.

use versus_core::{Board, Piece, Placement};

use crate::collision::landing_row;

/// Every legal resting placement of `piece`, rotation-major then left to
/// right. The order is stable and defines tie-breaking in the search.
pub fn generate_placements(board: &Board, piece: Piece) -> Vec<Placement> {
    let mut placements = Vec::with_capacity(piece.rotation_count() * Board::WIDTH);
    for &rotation in piece.rotations() {
        for column in 0..Board::WIDTH {
            if let Some(row) = landing_row(board, piece, rotation, column) {
                placements.push(Placement::new(piece, rotation, column, row));
            }
        }
    }
    placements
}
