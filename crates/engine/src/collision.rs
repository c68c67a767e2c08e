//! collision detection - walls, floor, other blocks

use versus_core::{Board, Piece, Rotation};

/// does the piece overlap a wall, the floor, the ceiling or a block
/// with its bounding box at `(x, y)`?
pub fn collides(board: &Board, piece: Piece, rotation: Rotation, x: i32, y: i32) -> bool {
    piece.cells(rotation).iter().any(|&(dx, dy)| {
        let cx = x + dx as i32;
        let cy = y + dy as i32;
        cx < 0
            || cy < 0
            || cx >= Board::WIDTH as i32
            || cy >= Board::HEIGHT as i32
            || board.get(cx as usize, cy as usize)
    })
}

/// Row where the piece enters: bounding box flush with the top of the grid.
pub fn spawn_row(piece: Piece, rotation: Rotation) -> i32 {
    (Board::HEIGHT - piece.height(rotation)) as i32
}

/// Drops the piece straight down from `y` and returns the last row before
/// it would collide.
pub fn hard_drop_row(board: &Board, piece: Piece, rotation: Rotation, x: i32, y: i32) -> i32 {
    let mut landing_y = y;
    while !collides(board, piece, rotation, x, landing_y - 1) {
        landing_y -= 1;
    }
    landing_y
}

/// Resting row for the piece dropped from spawn in `column`, or `None` when
/// it cannot even enter there. Columns off the grid never can.
pub fn landing_row(board: &Board, piece: Piece, rotation: Rotation, column: usize) -> Option<usize> {
    if column >= Board::WIDTH {
        return None;
    }
    let x = column as i32;
    let y = spawn_row(piece, rotation);
    if collides(board, piece, rotation, x, y) {
        return None;
    }
    Some(hard_drop_row(board, piece, rotation, x, y) as usize)
}

/// can the piece enter at the top of `column` and drop to a resting row?
pub fn can_place(board: &Board, piece: Piece, rotation: Rotation, column: usize) -> bool {
    landing_row(board, piece, rotation, column).is_some()
}
