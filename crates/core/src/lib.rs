//! versus core crate - piece catalog and grid types shared by both players.

mod board;
mod board_heights;
mod moves;
mod piece;

pub use board::{Board, Cell, Row};
pub use board_heights::HeightMap;
pub use moves::Placement;
pub use piece::{ParsePieceError, Piece, Rotation};
