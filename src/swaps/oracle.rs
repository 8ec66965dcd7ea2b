//! Swap validation and enumeration.
//!
//! A swap is valid when the two cells are adjacent, both hold usable tiles,
//! and exchanging them leaves at least one of the two moved tiles in a run
//! of `match_length` or more. The same predicate drives both hints and
//! accept/reject, so any suggested swap is one the engine accepts.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::chains::max_run_length;
use crate::core::{Position, Tile};

/// A proposed exchange of two tiles.
///
/// `legal` only reflects adjacency; whether the swap makes a chain is the
/// oracle's question.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingSwap {
    pub from: Tile,
    pub to: Tile,
    pub legal: bool,
}

impl PendingSwap {
    #[must_use]
    pub fn new(from: Tile, to: Tile) -> Self {
        Self {
            from,
            to,
            legal: from.position().is_adjacent(to.position()),
        }
    }

    /// The two cells involved, as recorded when the swap was proposed.
    #[must_use]
    pub fn cells(&self) -> (Position, Position) {
        (self.from.position(), self.to.position())
    }

    /// Check if both swaps exchange the same pair of cells, in either order.
    #[must_use]
    pub fn same_cells(&self, a: Position, b: Position) -> bool {
        let (from, to) = self.cells();
        (from == a && to == b) || (from == b && to == a)
    }
}

/// Answers whether swaps produce chains.
#[derive(Clone, Copy, Debug)]
pub struct SwapOracle {
    match_length: usize,
}

impl SwapOracle {
    #[must_use]
    pub fn new(match_length: usize) -> Self {
        Self { match_length }
    }

    /// Every valid swap on the board, each unordered pair once.
    ///
    /// Pairs are tried right and down from each cell in row-major order.
    /// The board is provisionally swapped and restored for each test, so
    /// it is unchanged on return.
    pub fn find_available_swaps(&self, board: &mut Board) -> Vec<PendingSwap> {
        let mut swaps = Vec::new();
        let positions: Vec<Position> = board.positions().collect();

        for a in positions {
            let Some(first) = board.usable(a) else {
                continue;
            };
            for b in [a.offset(1, 0), a.offset(0, 1)].into_iter().flatten() {
                if !board.in_bounds(b) {
                    continue;
                }
                let Some(second) = board.usable(b) else {
                    continue;
                };
                if self.creates_chain(board, a, b) {
                    swaps.push(PendingSwap::new(first, second));
                }
            }
        }

        swaps
    }

    /// Check one proposed swap. Argument order does not matter.
    pub fn is_valid_swap(&self, board: &mut Board, a: Position, b: Position) -> bool {
        board.in_bounds(a)
            && board.in_bounds(b)
            && a.is_adjacent(b)
            && board.is_usable(a)
            && board.is_usable(b)
            && self.creates_chain(board, a, b)
    }

    /// Provisionally swap, measure the runs through both moved tiles, swap back.
    fn creates_chain(&self, board: &mut Board, a: Position, b: Position) -> bool {
        board.swap_positions(a, b);
        let result = max_run_length(board, a) >= self.match_length
            || max_run_length(board, b) >= self.match_length;
        board.swap_positions(a, b);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(col: usize, row: usize) -> Position {
        Position::new(col, row)
    }

    #[test]
    fn test_pending_swap_adjacency() {
        let board = Board::parse(&["RG", "BV"]).unwrap();
        let tl = board.get(pos(0, 0)).unwrap();
        let tr = board.get(pos(1, 0)).unwrap();
        let br = board.get(pos(1, 1)).unwrap();

        assert!(PendingSwap::new(tl, tr).legal);
        assert!(!PendingSwap::new(tl, br).legal);
        assert!(PendingSwap::new(tl, tr).same_cells(pos(1, 0), pos(0, 0)));
    }

    #[test]
    fn test_valid_swap_completes_row() {
        let mut board = Board::parse(&["RRG", "GBR", "BGB"]).unwrap();
        let oracle = SwapOracle::new(3);
        let before = board.clone();

        assert!(oracle.is_valid_swap(&mut board, pos(2, 0), pos(2, 1)));
        assert!(oracle.is_valid_swap(&mut board, pos(2, 1), pos(2, 0)));
        assert!(!oracle.is_valid_swap(&mut board, pos(0, 0), pos(1, 0)));
        assert_eq!(board, before);
    }

    #[test]
    fn test_non_adjacent_never_valid() {
        let mut board = Board::parse(&["RRGR"]).unwrap();
        let oracle = SwapOracle::new(3);
        // Swapping G with the far R would make RRR, but the cells are two apart
        assert!(!oracle.is_valid_swap(&mut board, pos(2, 0), pos(0, 0)));
        assert!(oracle.is_valid_swap(&mut board, pos(2, 0), pos(3, 0)));
    }

    #[test]
    fn test_busy_tiles_excluded() {
        let mut board = Board::parse(&["RRGR"]).unwrap();
        let green = board.get(pos(2, 0)).unwrap().id;
        board.mark_busy(green);
        let oracle = SwapOracle::new(3);

        assert!(!oracle.is_valid_swap(&mut board, pos(2, 0), pos(3, 0)));
        assert!(oracle.find_available_swaps(&mut board).is_empty());
    }

    #[test]
    fn test_find_available_swaps() {
        let mut board = Board::parse(&["RRGR", "GBVB", "BGBG"]).unwrap();
        let oracle = SwapOracle::new(3);
        let before = board.clone();

        let swaps = oracle.find_available_swaps(&mut board);
        assert_eq!(board, before);
        assert!(swaps.iter().any(|s| s.same_cells(pos(2, 0), pos(3, 0))));
        for swap in &swaps {
            let (a, b) = swap.cells();
            assert!(swap.legal);
            assert!(oracle.is_valid_swap(&mut board, a, b));
        }
    }

    #[test]
    fn test_stable_board_has_no_swaps_listed_twice() {
        let mut board = Board::parse(&["RGRG", "GRGR", "RGRG"]).unwrap();
        let swaps = SwapOracle::new(3).find_available_swaps(&mut board);
        for (i, a) in swaps.iter().enumerate() {
            let (x, y) = a.cells();
            assert!(!swaps[i + 1..].iter().any(|b| b.same_cells(x, y)));
        }
    }
}
