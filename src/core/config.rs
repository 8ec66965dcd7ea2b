//! Engine configuration.
//!
//! Games configure board size, palette, match length and the chain
//! lengths that earn bonuses. Everything has a default matching the
//! classic 8x8, five-color, match-three setup.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::tile::TileType;

/// Reasons a configuration is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board dimensions must be non-zero, got {width}x{height}")]
    EmptyBoard { width: usize, height: usize },

    #[error("palette size must be between 3 and {max}, got {got}")]
    Palette { got: usize, max: usize },

    #[error("match length must be at least 3, got {0}")]
    MatchLength(usize),

    #[error("bonus thresholds must satisfy match ({match_length}) <= line ({line}) < bomb ({bomb})")]
    BonusThresholds {
        match_length: usize,
        line: usize,
        bomb: usize,
    },
}

/// Configuration for a [`CascadeEngine`](crate::engine::CascadeEngine).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of columns.
    pub width: usize,

    /// Number of rows.
    pub height: usize,

    /// Minimum run length that counts as a chain.
    pub match_length: usize,

    /// How many tile types are in play (prefix of [`TileType::ALL`]).
    pub palette_size: usize,

    /// Straight chains at least this long spawn a line bonus.
    pub line_bonus_length: usize,

    /// Chains at least this long spawn a bomb.
    /// Takes precedence over the line bonus.
    pub bomb_bonus_length: usize,

    /// Seed for board generation, refills and bonus placement.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 8,
            height: 8,
            match_length: 3,
            palette_size: TileType::ALL.len(),
            line_bonus_length: 4,
            bomb_bonus_length: 5,
            seed: 42,
        }
    }
}

impl EngineConfig {
    /// Set board dimensions.
    #[must_use]
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the palette size.
    #[must_use]
    pub fn with_palette(mut self, palette_size: usize) -> Self {
        self.palette_size = palette_size;
        self
    }

    /// Set the minimum chain length.
    #[must_use]
    pub fn with_match_length(mut self, match_length: usize) -> Self {
        self.match_length = match_length;
        self
    }

    /// Set the bonus thresholds.
    #[must_use]
    pub fn with_bonus_lengths(mut self, line: usize, bomb: usize) -> Self {
        self.line_bonus_length = line;
        self.bomb_bonus_length = bomb;
        self
    }

    /// Set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check the configuration for values the engine cannot run with.
    ///
    /// Fewer than three colors can leave the generator with no legal draw.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyBoard {
                width: self.width,
                height: self.height,
            });
        }
        if !(3..=TileType::ALL.len()).contains(&self.palette_size) {
            return Err(ConfigError::Palette {
                got: self.palette_size,
                max: TileType::ALL.len(),
            });
        }
        if self.match_length < 3 {
            return Err(ConfigError::MatchLength(self.match_length));
        }
        if self.line_bonus_length < self.match_length
            || self.bomb_bonus_length <= self.line_bonus_length
        {
            return Err(ConfigError::BonusThresholds {
                match_length: self.match_length,
                line: self.line_bonus_length,
                bomb: self.bomb_bonus_length,
            });
        }
        Ok(())
    }
}
