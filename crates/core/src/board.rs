//! board representation - tagged cells plus column-major occupancy masks
//! zobrist hash of occupancy maintained incrementally on every cell change

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::board_heights::HeightMap;
use crate::Piece;

/// Precomputed random values for Zobrist hashing, one per (column, row).
/// Generated from a fixed seed so hashes are deterministic across runs.
const ZOBRIST_TABLE: [[u64; Board::HEIGHT]; Board::WIDTH] = {
    // xorshift64 PRNG with fixed seed
    let mut table = [[0u64; Board::HEIGHT]; Board::WIDTH];
    let mut state: u64 = 0xdeadbeefcafe1234;
    let mut col = 0;
    while col < Board::WIDTH {
        let mut row = 0;
        while row < Board::HEIGHT {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            table[col][row] = state;
            row += 1;
        }
        col += 1;
    }
    table
};

fn compute_zobrist_hash(cols: &[u64; Board::WIDTH]) -> u64 {
    let mut hash = 0u64;
    for (x, &col) in cols.iter().enumerate() {
        let mut bits = col;
        while bits != 0 {
            let row = bits.trailing_zeros() as usize;
            hash ^= ZOBRIST_TABLE[x][row];
            bits &= bits - 1;
        }
    }
    hash
}

/// Contents of a single grid cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    /// Block left by a placed piece.
    Block(Piece),
    /// Obstruction block injected by an attack.
    Garbage,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Block(piece) => piece.letter(),
            Cell::Garbage => 'G',
        }
    }

    pub fn from_symbol(c: char) -> Option<Cell> {
        match c {
            '.' => Some(Cell::Empty),
            'G' => Some(Cell::Garbage),
            other => Piece::from_letter(other).map(Cell::Block),
        }
    }
}

pub type Row = [Cell; Board::WIDTH];

/// 10x22 grid. Row 0 is the bottom; rows 0-19 are visible and rows 20-21
/// form the hidden spawn region. Any block in the spawn region means the
/// board has topped out.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct Board {
    cells: [Row; Board::HEIGHT],
    cols: [u64; Board::WIDTH],
    hash: u64,
    overflowed: bool,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            cells: [[Cell::Empty; Board::WIDTH]; Board::HEIGHT],
            cols: [0; Board::WIDTH],
            hash: 0,
            overflowed: false,
        }
    }
}

impl Board {
    pub const WIDTH: usize = 10;
    pub const VISIBLE_HEIGHT: usize = 20;
    pub const SPAWN_ROWS: usize = 2;
    pub const HEIGHT: usize = Self::VISIBLE_HEIGHT + Self::SPAWN_ROWS;

    pub fn new() -> Self {
        Self::default()
    }

    /// Incremental Zobrist hash of occupancy, O(1)
    #[inline(always)]
    pub fn zobrist_hash(&self) -> u64 {
        self.hash
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        (self.cols[x] >> y) & 1 == 1
    }

    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.cells[y][x]
    }

    pub fn set_cell(&mut self, x: usize, y: usize, cell: Cell) {
        let was_set = self.get(x, y);
        self.cells[y][x] = cell;
        if was_set == cell.is_empty() {
            self.cols[x] ^= 1u64 << y;
            self.hash ^= ZOBRIST_TABLE[x][y];
        }
    }

    pub fn row(&self, y: usize) -> &Row {
        &self.cells[y]
    }

    /// Occupancy bits of column `x`, bit `y` set when row `y` is filled
    #[inline]
    pub fn column(&self, x: usize) -> u64 {
        self.cols[x]
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        self.cells[y].iter().all(|c| !c.is_empty())
    }

    pub fn is_row_empty(&self, y: usize) -> bool {
        self.cells[y].iter().all(|c| c.is_empty())
    }

    /// Number of rows holding at least one block.
    pub fn used_rows(&self) -> usize {
        (0..Self::HEIGHT).filter(|&y| !self.is_row_empty(y)).count()
    }

    pub fn filled_cells(&self) -> u32 {
        self.cols.iter().map(|c| c.count_ones()).sum()
    }

    /// Removes every full row, compacting the rows above downward in order.
    /// Returns how many rows were removed.
    pub fn clear_lines(&mut self) -> u8 {
        let mut write = 0;
        let mut cleared = 0u8;
        for read in 0..Self::HEIGHT {
            if self.is_row_full(read) {
                cleared += 1;
                continue;
            }
            if write != read {
                self.cells[write] = self.cells[read];
            }
            write += 1;
        }
        if cleared == 0 {
            return 0;
        }
        for y in write..Self::HEIGHT {
            self.cells[y] = [Cell::Empty; Self::WIDTH];
        }
        self.rebuild_masks();
        cleared
    }

    /// Pushes `row` in at the bottom, shifting everything else up by one.
    /// Returns true when an occupied top row was pushed off the grid; that
    /// also latches [`Board::is_topped_out`].
    pub fn push_bottom_row(&mut self, row: Row) -> bool {
        let lost = !self.is_row_empty(Self::HEIGHT - 1);
        self.cells.copy_within(0..Self::HEIGHT - 1, 1);
        self.cells[0] = row;
        self.rebuild_masks();
        if lost {
            self.overflowed = true;
        }
        lost
    }

    fn rebuild_masks(&mut self) {
        let mut cols = [0u64; Self::WIDTH];
        for (y, row) in self.cells.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if !cell.is_empty() {
                    cols[x] |= 1u64 << y;
                }
            }
        }
        self.cols = cols;
        self.hash = compute_zobrist_hash(&cols);
    }

    /// True once any block sits in the spawn region or was pushed past the
    /// top by incoming garbage.
    pub fn is_topped_out(&self) -> bool {
        self.overflowed || (Self::VISIBLE_HEIGHT..Self::HEIGHT).any(|y| !self.is_row_empty(y))
    }

    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    pub fn height_map(&self) -> HeightMap {
        HeightMap::new(self)
    }

    pub fn aggregate_height(&self) -> u32 {
        self.height_map().aggregate()
    }

    pub fn max_height(&self) -> u8 {
        self.height_map().max_height()
    }

    pub fn bumpiness(&self) -> u32 {
        self.height_map().bumpiness()
    }

    /// Empty cells with at least one block above them in the same column.
    pub fn hole_count(&self) -> u32 {
        self.cols
            .iter()
            .map(|&col| {
                let height = u64::BITS - col.leading_zeros();
                height - col.count_ones()
            })
            .sum()
    }
}

/// Serde form: one string per row, bottom first, plus the overflow latch.
#[derive(Serialize, Deserialize)]
struct BoardRepr {
    rows: Vec<String>,
    #[serde(default)]
    overflowed: bool,
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let rows: Vec<String> = self
            .cells
            .iter()
            .map(|row| row.iter().map(|c| c.symbol()).collect())
            .collect();
        BoardRepr {
            rows,
            overflowed: self.overflowed,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let BoardRepr { rows, overflowed } = BoardRepr::deserialize(deserializer)?;
        if rows.len() != Board::HEIGHT {
            return Err(serde::de::Error::custom(format!(
                "expected {} rows, got {}",
                Board::HEIGHT,
                rows.len()
            )));
        }
        let mut board = Board::new();
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != Board::WIDTH {
                return Err(serde::de::Error::custom(format!(
                    "row {y} must have {} cells",
                    Board::WIDTH
                )));
            }
            for (x, c) in row.chars().enumerate() {
                let cell = Cell::from_symbol(c).ok_or_else(|| {
                    serde::de::Error::custom(format!("invalid cell symbol `{c}` at ({x}, {y})"))
                })?;
                board.cells[y][x] = cell;
            }
        }
        board.rebuild_masks();
        board.overflowed = overflowed;
        Ok(board)
    }
}
