//! Which bonus, if any, a cleared chain leaves behind.

use serde::{Deserialize, Serialize};

use crate::chains::{Chain, Orientation};
use crate::core::{BonusKind, EngineConfig, GameRng, Position, TileType};

/// A bonus tile queued for the next collapse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingBonus {
    pub kind: BonusKind,
    pub tile_type: TileType,
    pub position: Position,
}

/// Decides bonus spawns from chain shape and length.
///
/// - Intersection: bomb at the shared tile
/// - Length at least `bomb_length`: bomb at a random tile of the chain
/// - Length at least `line_length`: line bonus matching the chain's axis
///   at a random tile of the chain
/// - Otherwise: nothing
#[derive(Clone, Copy, Debug)]
pub struct BonusPolicy {
    line_length: usize,
    bomb_length: usize,
}

impl BonusPolicy {
    #[must_use]
    pub fn new(line_length: usize, bomb_length: usize) -> Self {
        Self {
            line_length,
            bomb_length,
        }
    }

    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.line_bonus_length, config.bomb_bonus_length)
    }

    /// Decide the bonus for one cleared chain. At most one per chain.
    pub fn decide(&self, chain: &Chain, rng: &mut GameRng) -> Option<PendingBonus> {
        if let Some(shared) = chain.intersection_tile() {
            return Some(PendingBonus {
                kind: BonusKind::Bomb,
                tile_type: shared.tile_type,
                position: shared.position(),
            });
        }

        let kind = if chain.len() >= self.bomb_length {
            BonusKind::Bomb
        } else if chain.len() >= self.line_length {
            match chain.orientation() {
                Orientation::Horizontal => BonusKind::HorizontalLine,
                _ => BonusKind::VerticalLine,
            }
        } else {
            return None;
        };

        let tile = rng.choose(chain.tiles())?;
        Some(PendingBonus {
            kind,
            tile_type: chain.tile_type(),
            position: tile.position(),
        })
    }
}

impl Default for BonusPolicy {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}
