//! Bonus blast resolution.
//!
//! Collecting a bonus tile also collects everything in its area; any bonus
//! tile caught in that area fires in turn. Resolution is an explicit work
//! queue rather than recursion. A tile enters the queued set at most once,
//! which bounds the work by the board size and stops a bonus from
//! re-triggering the one that caught it.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use crate::board::Board;
use crate::core::{BonusKind, Position, Tile, TileId};

/// One fired bonus and the tiles it newly claimed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Activation {
    pub trigger: Tile,
    /// Usable tiles in the blast area, including the trigger and tiles
    /// claimed before this bonus fired.
    pub area: usize,
    /// Tiles queued by this activation, excluding the trigger itself.
    pub affected: Vec<Tile>,
}

impl Activation {
    /// Tiles cleared by this bonus, counting the trigger.
    #[must_use]
    pub fn cleared_count(&self) -> usize {
        self.affected.len() + 1
    }
}

/// Usable tiles inside a bonus tile's area, including the tile itself if usable.
///
/// - `Bomb`: the 3x3 square around the tile, clipped to the board
/// - `HorizontalLine`: the tile's row
/// - `VerticalLine`: the tile's column
#[must_use]
pub fn affected_tiles(board: &Board, bonus_tile: &Tile) -> Vec<Tile> {
    let origin = bonus_tile.position();
    match bonus_tile.bonus {
        BonusKind::None => Vec::new(),
        BonusKind::Bomb => (-1..=1)
            .flat_map(|dr| (-1..=1).map(move |dc| (dc, dr)))
            .filter_map(|(dc, dr)| origin.offset(dc, dr))
            .filter(|p| board.in_bounds(*p))
            .filter_map(|p| board.usable(p))
            .collect(),
        BonusKind::HorizontalLine => (0..board.width())
            .filter_map(|col| board.usable(Position::new(col, origin.row)))
            .collect(),
        BonusKind::VerticalLine => (0..board.height())
            .filter_map(|row| board.usable(Position::new(origin.col, row)))
            .collect(),
    }
}

/// Fire every bonus among `seeds`, then every bonus those blasts reach.
///
/// `queued` holds ids already claimed for collection (the seeds
/// themselves should be in it). Claimed tiles are added as they are found.
pub fn chain_reaction(
    board: &Board,
    queued: &mut FxHashSet<TileId>,
    seeds: impl IntoIterator<Item = Tile>,
) -> Vec<Activation> {
    let mut work: VecDeque<Tile> = seeds.into_iter().filter(Tile::has_bonus).collect();
    let mut activations = Vec::new();

    while let Some(trigger) = work.pop_front() {
        let area = affected_tiles(board, &trigger);
        let area_size = area.len();
        let affected: Vec<Tile> = area
            .into_iter()
            .filter(|tile| tile.id != trigger.id && queued.insert(tile.id))
            .collect();
        work.extend(affected.iter().copied().filter(Tile::has_bonus));
        activations.push(Activation {
            trigger,
            area: area_size,
            affected,
        });
    }

    activations
}
