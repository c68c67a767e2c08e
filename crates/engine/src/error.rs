use thiserror::Error;
use versus_core::{Piece, Rotation};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// `place` was called for a placement `can_place` rejects.
    #[error("illegal placement: {piece} {rotation:?} in column {column}")]
    IllegalPlacement {
        piece: Piece,
        rotation: Rotation,
        column: usize,
    },
}
