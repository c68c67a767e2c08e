use serde::{Deserialize, Serialize};
use versus_core::{Board, Cell, Row};

/// What an injection did to the receiving board.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GarbageReport {
    /// Empty column of each injected row, in injection order (the last one
    /// ends up at the bottom).
    pub holes: Vec<u8>,
    /// An occupied row was pushed off the top of the grid.
    pub overflowed: bool,
}

/// Push `lines` garbage rows in from the bottom.
///
/// Every row asks `pick_hole` for its own empty column, so consecutive rows
/// may have different holes. `pick_hole` receives the board width and must
/// return a column below it; out of range answers wrap.
pub fn inject_garbage<F>(board: &mut Board, lines: u8, mut pick_hole: F) -> GarbageReport
where
    F: FnMut(usize) -> usize,
{
    let mut report = GarbageReport::default();
    for _ in 0..lines {
        let hole = pick_hole(Board::WIDTH) % Board::WIDTH;
        let mut row: Row = [Cell::Garbage; Board::WIDTH];
        row[hole] = Cell::Empty;
        report.overflowed |= board.push_bottom_row(row);
        report.holes.push(hole as u8);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use versus_core::Piece;

    #[test]
    fn test_rows_have_single_hole() {
        let mut board = Board::new();
        let report = inject_garbage(&mut board, 3, |_| 6);
        assert_eq!(report.holes, vec![6, 6, 6]);
        assert!(!report.overflowed);
        for y in 0..3 {
            for x in 0..Board::WIDTH {
                let expected = if x == 6 { Cell::Empty } else { Cell::Garbage };
                assert_eq!(board.cell(x, y), expected);
            }
        }
        assert!(board.is_row_empty(3));
    }

    #[test]
    fn test_each_row_picks_its_own_hole() {
        let mut board = Board::new();
        let mut next = 0;
        let report = inject_garbage(&mut board, 2, |_| {
            next += 3;
            next
        });
        assert_eq!(report.holes, vec![3, 6]);
        // last injected row is at the bottom
        assert!(!board.get(6, 0));
        assert!(!board.get(3, 1));
    }

    #[test]
    fn test_existing_content_shifts_up() {
        let mut board = Board::new();
        board.set_cell(2, 0, Cell::Block(Piece::O));
        board.set_cell(2, 4, Cell::Block(Piece::O));
        let used = board.used_rows();
        inject_garbage(&mut board, 2, |_| 0);
        assert_eq!(board.cell(2, 2), Cell::Block(Piece::O));
        assert_eq!(board.cell(2, 6), Cell::Block(Piece::O));
        assert_eq!(board.used_rows(), used + 2);
    }

    #[test]
    fn test_out_of_range_hole_wraps() {
        let mut board = Board::new();
        let report = inject_garbage(&mut board, 1, |w| w + 1);
        assert_eq!(report.holes, vec![1]);
    }

    #[test]
    fn test_overflow_tops_out() {
        let mut board = Board::new();
        board.set_cell(0, Board::VISIBLE_HEIGHT - 1, Cell::Garbage);
        let report = inject_garbage(&mut board, 1, |_| 0);
        assert!(!report.overflowed);
        assert!(board.is_topped_out());

        let report = inject_garbage(&mut board, 2, |_| 0);
        assert!(report.overflowed);
        assert!(board.is_topped_out());
    }
}
