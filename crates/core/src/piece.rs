//! Piece catalog - the seven tetromino shapes and their rotation states.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Board;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Serialize, Deserialize)]
pub enum Piece {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Default, Serialize, Deserialize,
)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Cell offsets per piece, indexed by rotation. Offsets are `(dx, dy)` with
/// `dy` growing upward and the bounding box anchored at `(0, 0)`.
/// Pieces with fewer than four distinct states only use the leading entries.
type ShapeTable = [[(u8, u8); 4]; 4];

const I_SHAPES: ShapeTable = [
    [(0, 0), (1, 0), (2, 0), (3, 0)],
    [(0, 0), (0, 1), (0, 2), (0, 3)],
    [(0, 0), (1, 0), (2, 0), (3, 0)],
    [(0, 0), (0, 1), (0, 2), (0, 3)],
];

const O_SHAPES: ShapeTable = [[(0, 0), (1, 0), (0, 1), (1, 1)]; 4];

const T_SHAPES: ShapeTable = [
    [(0, 0), (1, 0), (2, 0), (1, 1)],
    [(0, 0), (0, 1), (1, 1), (0, 2)],
    [(1, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (0, 1), (1, 1), (1, 2)],
];

const S_SHAPES: ShapeTable = [
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(1, 0), (0, 1), (1, 1), (0, 2)],
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(1, 0), (0, 1), (1, 1), (0, 2)],
];

const Z_SHAPES: ShapeTable = [
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    [(0, 0), (0, 1), (1, 1), (1, 2)],
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    [(0, 0), (0, 1), (1, 1), (1, 2)],
];

const J_SHAPES: ShapeTable = [
    [(0, 0), (1, 0), (2, 0), (0, 1)],
    [(0, 0), (0, 1), (0, 2), (1, 2)],
    [(2, 0), (0, 1), (1, 1), (2, 1)],
    [(0, 0), (1, 0), (1, 1), (1, 2)],
];

const L_SHAPES: ShapeTable = [
    [(0, 0), (1, 0), (2, 0), (2, 1)],
    [(0, 0), (1, 0), (0, 1), (0, 2)],
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (0, 2), (1, 2)],
];

impl Piece {
    pub const ALL: [Piece; 7] = [
        Piece::I,
        Piece::O,
        Piece::T,
        Piece::S,
        Piece::Z,
        Piece::J,
        Piece::L,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Piece> {
        Self::ALL.get(index).copied()
    }

    pub fn letter(self) -> char {
        match self {
            Piece::I => 'I',
            Piece::O => 'O',
            Piece::T => 'T',
            Piece::S => 'S',
            Piece::Z => 'Z',
            Piece::J => 'J',
            Piece::L => 'L',
        }
    }

    pub fn from_letter(c: char) -> Option<Piece> {
        Self::ALL
            .into_iter()
            .find(|p| p.letter() == c.to_ascii_uppercase())
    }

    /// Number of distinct rotation states searched for this piece.
    /// O has one, I/S/Z two, T/J/L four.
    pub fn rotation_count(self) -> usize {
        match self {
            Piece::O => 1,
            Piece::I | Piece::S | Piece::Z => 2,
            Piece::T | Piece::J | Piece::L => 4,
        }
    }

    /// Legal rotations in enumeration order.
    pub fn rotations(self) -> &'static [Rotation] {
        &Rotation::ALL[..self.rotation_count()]
    }

    fn shapes(self) -> &'static ShapeTable {
        match self {
            Piece::I => &I_SHAPES,
            Piece::O => &O_SHAPES,
            Piece::T => &T_SHAPES,
            Piece::S => &S_SHAPES,
            Piece::Z => &Z_SHAPES,
            Piece::J => &J_SHAPES,
            Piece::L => &L_SHAPES,
        }
    }

    /// Occupied `(dx, dy)` offsets relative to the bottom-left of the
    /// bounding box.
    pub fn cells(self, rot: Rotation) -> [(u8, u8); 4] {
        self.shapes()[rot.index()]
    }

    pub fn width(self, rot: Rotation) -> usize {
        self.cells(rot).iter().map(|&(dx, _)| dx as usize + 1).max().unwrap_or(0)
    }

    pub fn height(self, rot: Rotation) -> usize {
        self.cells(rot).iter().map(|&(_, dy)| dy as usize + 1).max().unwrap_or(0)
    }

    /// Left column of the horizontally centered spawn box.
    pub fn spawn_column(self) -> usize {
        (Board::WIDTH - self.width(Rotation::North)) / 2
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsePieceError(pub String);

impl fmt::Display for ParsePieceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown piece type `{}`", self.0)
    }
}

impl std::error::Error for ParsePieceError {}

impl FromStr for Piece {
    type Err = ParsePieceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Piece::from_letter(c).ok_or_else(|| ParsePieceError(s.to_string())),
            _ => Err(ParsePieceError(s.to_string())),
        }
    }
}
