//! Chain detection.
//!
//! Rows are scanned left to right and columns top to bottom. A run grows
//! while consecutive cells hold usable tiles of the run's type; an empty
//! cell, a busy tile or a type change ends it. Runs reaching the match
//! length become chains.
//!
//! Horizontal and vertical chains of the same type that share a cell are
//! then merged into one intersection chain. Pairing is first-match: each
//! chain joins at most one intersection.

use crate::board::Board;
use crate::core::{Position, TileType};

use super::chain::{Chain, ChainTiles, Orientation};

/// Finds chains on a board.
#[derive(Clone, Copy, Debug)]
pub struct ChainFinder {
    match_length: usize,
}

impl ChainFinder {
    #[must_use]
    pub fn new(match_length: usize) -> Self {
        Self { match_length }
    }

    /// Return every maximal chain on the board.
    ///
    /// Order: unmerged vertical chains, unmerged horizontal chains,
    /// then intersections.
    #[must_use]
    pub fn find(&self, board: &Board) -> Vec<Chain> {
        let mut vertical: Vec<Option<Chain>> = self
            .scan(board, Orientation::Vertical)
            .into_iter()
            .map(Some)
            .collect();
        let mut horizontal: Vec<Option<Chain>> = self
            .scan(board, Orientation::Horizontal)
            .into_iter()
            .map(Some)
            .collect();
        let mut intersections = Vec::new();

        for v in vertical.iter_mut() {
            for h in horizontal.iter_mut() {
                let (Some(vc), Some(hc)) = (v.as_ref(), h.as_ref()) else {
                    continue;
                };
                if let Some(shared) = vc.crossing_tile(hc) {
                    intersections.push(Chain::intersection(vc, hc, shared));
                    *v = None;
                    *h = None;
                    break;
                }
            }
        }

        vertical
            .into_iter()
            .flatten()
            .chain(horizontal.into_iter().flatten())
            .chain(intersections)
            .collect()
    }

    fn scan(&self, board: &Board, orientation: Orientation) -> Vec<Chain> {
        let (lines, cells) = match orientation {
            Orientation::Horizontal => (board.height(), board.width()),
            _ => (board.width(), board.height()),
        };
        let at = |line: usize, i: usize| match orientation {
            Orientation::Horizontal => Position::new(i, line),
            _ => Position::new(line, i),
        };

        let mut chains = Vec::new();
        for line in 0..lines {
            let mut i = 0;
            while i < cells {
                let Some(first) = board.usable(at(line, i)) else {
                    i += 1;
                    continue;
                };

                let mut run: ChainTiles = ChainTiles::new();
                run.push(first);
                i += 1;
                while i < cells {
                    match board.usable(at(line, i)) {
                        Some(tile) if tile.tile_type == first.tile_type => {
                            run.push(tile);
                            i += 1;
                        }
                        _ => break,
                    }
                }

                if run.len() >= self.match_length {
                    chains.push(Chain::straight(run, orientation, self.match_length));
                }
            }
        }
        chains
    }
}

/// Length of the same-type run through `position` along one axis,
/// counting the cell itself as `tile_type`.
///
/// Neighbours must be usable to count.
#[must_use]
pub fn run_length(board: &Board, position: Position, tile_type: TileType, orientation: Orientation) -> usize {
    let (dc, dr) = match orientation {
        Orientation::Horizontal => (1, 0),
        _ => (0, 1),
    };
    1 + extent(board, position, tile_type, dc, dr) + extent(board, position, tile_type, -dc, -dr)
}

/// Longest run through the tile at `position` in either direction.
///
/// Returns 0 for an empty cell.
#[must_use]
pub fn max_run_length(board: &Board, position: Position) -> usize {
    match board.get(position) {
        Some(tile) => run_length(board, position, tile.tile_type, Orientation::Horizontal)
            .max(run_length(board, position, tile.tile_type, Orientation::Vertical)),
        None => 0,
    }
}

fn extent(board: &Board, from: Position, tile_type: TileType, dc: isize, dr: isize) -> usize {
    let mut count = 0;
    let mut cursor = from;
    while let Some(next) = cursor.offset(dc, dr).filter(|p| board.in_bounds(*p)) {
        match board.usable(next) {
            Some(tile) if tile.tile_type == tile_type => {
                count += 1;
                cursor = next;
            }
            _ => break,
        }
    }
    count
}
