//! Initial board generation.
//!
//! Fills the grid row-major, drawing a random type per cell and redrawing
//! while the candidate would complete a run with the cells immediately to
//! its left or above. Only the `match_length - 1` preceding neighbours are
//! examined; nothing is placed after the current cell yet, so no look-ahead
//! is needed and the result never contains a chain.
//!
//! Retries are unbounded. With a palette of at least three types at most two
//! are ever forbidden for a cell, so a legal draw always exists.

use crate::core::{BonusKind, EngineConfig, GameRng, Position, TileType};

use super::Board;

/// Produces chain-free starting boards.
#[derive(Clone, Debug)]
pub struct BoardGenerator {
    width: usize,
    height: usize,
    palette_size: usize,
    match_length: usize,
}

impl BoardGenerator {
    /// Create a generator for a validated configuration.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            palette_size: config.palette_size,
            match_length: config.match_length,
        }
    }

    /// Generate a full board with no pre-existing chain.
    pub fn generate(&self, rng: &mut GameRng) -> Board {
        let mut board = Board::new(self.width, self.height);
        let look_back = self.match_length - 1;

        for row in 0..self.height {
            for col in 0..self.width {
                let tile_type = loop {
                    let candidate = TileType::random(rng, self.palette_size);
                    let completes_row = col >= look_back
                        && (1..=look_back)
                            .all(|d| board.type_at(Position::new(col - d, row)) == Some(candidate));
                    let completes_col = row >= look_back
                        && (1..=look_back)
                            .all(|d| board.type_at(Position::new(col, row - d)) == Some(candidate));
                    if !completes_row && !completes_col {
                        break candidate;
                    }
                };
                board.place(Position::new(col, row), tile_type, BonusKind::None);
            }
        }

        board
    }
}
