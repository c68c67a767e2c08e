//! Per-column heights, computed once from the occupancy masks

use serde::{Deserialize, Serialize};

use crate::Board;

/// Column heights of a board snapshot.
/// Height of column `x` is one past its topmost block, 0 for an empty column.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct HeightMap {
    heights: [u8; Board::WIDTH],
}

impl HeightMap {
    pub fn new(board: &Board) -> Self {
        let mut heights = [0u8; Board::WIDTH];
        for (x, height) in heights.iter_mut().enumerate() {
            *height = (u64::BITS - board.column(x).leading_zeros()) as u8;
        }
        Self { heights }
    }

    #[inline(always)]
    pub fn height(&self, x: usize) -> u8 {
        self.heights[x]
    }

    #[inline(always)]
    pub fn max_height(&self) -> u8 {
        self.heights.iter().copied().max().unwrap_or(0)
    }

    /// Sum of all column heights
    pub fn aggregate(&self) -> u32 {
        self.heights.iter().map(|&h| h as u32).sum()
    }

    /// Sum of height differences between neighbouring columns
    pub fn bumpiness(&self) -> u32 {
        self.heights
            .windows(2)
            .map(|pair| pair[0].abs_diff(pair[1]) as u32)
            .sum()
    }

    #[inline(always)]
    pub fn as_array(&self) -> &[u8; Board::WIDTH] {
        &self.heights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cell;

    #[test]
    fn test_empty_board_heights() {
        let board = Board::new();
        let hm = HeightMap::new(&board);
        for x in 0..Board::WIDTH {
            assert_eq!(hm.height(x), 0);
        }
        assert_eq!(hm.max_height(), 0);
        assert_eq!(hm.aggregate(), 0);
        assert_eq!(hm.bumpiness(), 0);
    }

    #[test]
    fn test_single_cell_height() {
        let mut board = Board::new();
        board.set_cell(5, 3, Cell::Garbage);
        let hm = HeightMap::new(&board);
        assert_eq!(hm.height(5), 4); // y + 1
        assert_eq!(hm.max_height(), 4);
        assert_eq!(hm.aggregate(), 4);
        assert_eq!(hm.bumpiness(), 8);
    }

    #[test]
    fn test_bumpiness() {
        let mut board = Board::new();
        // Column heights: [1, 3, 1, 3, 1, 3, 1, 3, 1, 3]
        for x in (1..10).step_by(2) {
            for y in 0..3 {
                board.set_cell(x, y, Cell::Garbage);
            }
        }
        for x in (0..10).step_by(2) {
            board.set_cell(x, 0, Cell::Garbage);
        }
        let hm = board.height_map();
        assert_eq!(hm.bumpiness(), 18);
        assert_eq!(hm.aggregate(), 20);
        assert_eq!(hm.as_array(), &[1, 3, 1, 3, 1, 3, 1, 3, 1, 3]);
    }

    #[test]
    fn test_queries_are_idempotent() {
        let mut board = Board::new();
        board.set_cell(2, 5, Cell::Garbage);
        board.set_cell(7, 1, Cell::Block(crate::Piece::Z));
        assert_eq!(board.height_map(), board.height_map());
        assert_eq!(board.hole_count(), board.hole_count());
        assert_eq!(board.bumpiness(), board.bumpiness());
    }
}
