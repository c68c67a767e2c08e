use serde::{Deserialize, Serialize};
use versus_core::{Board, Cell, Piece, Placement, Rotation};

use crate::collision::landing_row;
use crate::error::EngineError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementResult {
    /// Rows removed by this placement (0-4).
    pub rows_cleared: u8,
    /// Bottom row of the piece's bounding box where it came to rest.
    pub final_row: usize,
}

fn lock(board: &mut Board, placement: &Placement) {
    for (x, y) in placement.cells() {
        board.set_cell(x, y, Cell::Block(placement.piece));
    }
}

/// Drop `piece` into `column`, lock it, and clear full rows.
///
/// Fails without touching the board when the piece cannot enter the column.
pub fn place(
    board: &mut Board,
    piece: Piece,
    rotation: Rotation,
    column: usize,
) -> Result<PlacementResult, EngineError> {
    let row = landing_row(board, piece, rotation, column).ok_or(EngineError::IllegalPlacement {
        piece,
        rotation,
        column,
    })?;
    lock(board, &Placement::new(piece, rotation, column, row));
    let rows_cleared = board.clear_lines();
    Ok(PlacementResult {
        rows_cleared,
        final_row: row,
    })
}

/// Apply an already resolved placement to a copy of the board and return
/// the resulting board and lines cleared.
pub fn apply_placement(board: &Board, placement: &Placement) -> (Board, u8) {
    let mut next = board.clone();
    lock(&mut next, placement);
    let lines = next.clear_lines();
    (next, lines)
}
