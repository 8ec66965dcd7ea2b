//! Chain values.
//!
//! A chain is immutable once built, and only [`ChainFinder`](super::ChainFinder)
//! builds them. Construction checks the shape invariants in debug builds.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Position, Tile, TileType};

/// Inline capacity for chain tiles; longer chains spill to the heap.
pub(crate) type ChainTiles = SmallVec<[Tile; 8]>;

/// Shape of a chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
    /// A horizontal and a vertical run of the same type sharing one tile.
    Intersection,
}

/// A run of same-typed tiles, or a crossing pair of runs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Chain {
    tiles: ChainTiles,
    orientation: Orientation,
    tile_type: TileType,
    intersection: Option<Tile>,
}

impl Chain {
    /// Build a horizontal or vertical chain from tiles in scan order.
    pub(crate) fn straight(tiles: ChainTiles, orientation: Orientation, match_length: usize) -> Self {
        debug_assert!(orientation != Orientation::Intersection);
        debug_assert!(
            tiles.len() >= match_length,
            "chain of {} shorter than match length {}",
            tiles.len(),
            match_length
        );
        let tile_type = tiles[0].tile_type;
        debug_assert!(tiles.iter().all(|t| t.tile_type == tile_type), "mixed tile types in chain");
        debug_assert!(
            tiles.iter().all(|t| match orientation {
                Orientation::Horizontal => t.position().row == tiles[0].position().row,
                _ => t.position().col == tiles[0].position().col,
            }),
            "chain tiles not collinear"
        );

        Self {
            tiles,
            orientation,
            tile_type,
            intersection: None,
        }
    }

    /// Merge a vertical and a horizontal chain that share `shared`.
    ///
    /// The shared tile appears once; vertical tiles come first.
    pub(crate) fn intersection(vertical: &Chain, horizontal: &Chain, shared: Tile) -> Self {
        debug_assert_eq!(vertical.orientation, Orientation::Vertical);
        debug_assert_eq!(horizontal.orientation, Orientation::Horizontal);
        debug_assert!(vertical.contains(shared.position()) && horizontal.contains(shared.position()));

        let mut tiles = vertical.tiles.clone();
        tiles.extend(horizontal.tiles.iter().copied().filter(|t| t.id != shared.id));

        Self {
            tiles,
            orientation: Orientation::Intersection,
            tile_type: vertical.tile_type,
            intersection: Some(shared),
        }
    }

    /// The tile both halves of a crossing share, if `self` and `other`
    /// are perpendicular straight chains of the same type.
    #[must_use]
    pub fn crossing_tile(&self, other: &Chain) -> Option<Tile> {
        if self.tile_type != other.tile_type
            || self.orientation == other.orientation
            || self.orientation == Orientation::Intersection
            || other.orientation == Orientation::Intersection
        {
            return None;
        }
        self.tiles
            .iter()
            .find(|tile| other.contains(tile.position()))
            .copied()
    }

    /// Tiles in scan order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Number of distinct tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always false for chains built by the finder.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[must_use]
    pub fn tile_type(&self) -> TileType {
        self.tile_type
    }

    /// The shared tile of an intersection chain.
    #[must_use]
    pub fn intersection_tile(&self) -> Option<Tile> {
        self.intersection
    }

    /// Check whether a cell belongs to this chain.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.tiles.iter().any(|tile| tile.position() == position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BonusKind, TileId};

    fn tile(id: u32, col: usize, row: usize) -> Tile {
        Tile::new(TileId(id), TileType::Red, BonusKind::None, Position::new(col, row))
    }

    fn row_chain() -> Chain {
        let tiles: ChainTiles = (0..3).map(|c| tile(c as u32, c, 1)).collect();
        Chain::straight(tiles, Orientation::Horizontal, 3)
    }

    fn column_chain() -> Chain {
        let tiles: ChainTiles = [tile(10, 1, 0), tile(1, 1, 1), tile(11, 1, 2)].into_iter().collect();
        Chain::straight(tiles, Orientation::Vertical, 3)
    }

    #[test]
    fn test_straight_chain_accessors() {
        let chain = row_chain();
        assert_eq!(chain.len(), 3);
        assert!(!chain.is_empty());
        assert_eq!(chain.orientation(), Orientation::Horizontal);
        assert_eq!(chain.tile_type(), TileType::Red);
        assert_eq!(chain.intersection_tile(), None);
        assert!(chain.contains(Position::new(2, 1)));
        assert!(!chain.contains(Position::new(2, 2)));
    }

    #[test]
    fn test_crossing_and_merge() {
        let horizontal = row_chain();
        let vertical = column_chain();

        let shared = vertical.crossing_tile(&horizontal).unwrap();
        assert_eq!(shared.position(), Position::new(1, 1));

        let merged = Chain::intersection(&vertical, &horizontal, shared);
        assert_eq!(merged.orientation(), Orientation::Intersection);
        assert_eq!(merged.len(), 5);
        assert_eq!(merged.intersection_tile(), Some(shared));
    }

    #[test]
    fn test_parallel_chains_do_not_cross() {
        let a = row_chain();
        let b = row_chain();
        assert_eq!(a.crossing_tile(&b), None);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "mixed tile types")]
    fn test_mixed_types_rejected() {
        let mut tiles: ChainTiles = (0..3).map(|c| tile(c as u32, c, 0)).collect();
        tiles[2].tile_type = TileType::Blue;
        let _ = Chain::straight(tiles, Orientation::Horizontal, 3);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "shorter than match length")]
    fn test_short_chain_rejected() {
        let tiles: ChainTiles = (0..2).map(|c| tile(c as u32, c, 0)).collect();
        let _ = Chain::straight(tiles, Orientation::Horizontal, 3);
    }
}
