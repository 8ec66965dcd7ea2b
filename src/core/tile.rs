//! Tiles and grid coordinates.
//!
//! A [`Tile`] is a small `Copy` record. Its identity is its [`TileId`], not
//! its value: two tiles may share type and bonus and still be different
//! tiles. The board hands out ids, so ids are unique per board.
//!
//! ## Coordinates
//!
//! Positions are `(col, row)` with `(0, 0)` at the top-left cell. Rows grow
//! downward, so "falling" means increasing `row`.

use serde::{Deserialize, Serialize};

use super::rng::GameRng;

/// Unique identifier for a tile instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u32);

impl TileId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// A grid coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub col: usize,
    pub row: usize,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    /// Manhattan distance between two cells.
    #[must_use]
    pub fn manhattan(self, other: Position) -> usize {
        self.col.abs_diff(other.col) + self.row.abs_diff(other.row)
    }

    /// Check whether two cells share an edge.
    #[must_use]
    pub fn is_adjacent(self, other: Position) -> bool {
        self.manhattan(other) == 1
    }

    /// Offset by a signed delta, returning `None` below zero.
    ///
    /// The upper bound is not checked here; the board does that.
    #[must_use]
    pub fn offset(self, dcol: isize, drow: isize) -> Option<Position> {
        let col = self.col.checked_add_signed(dcol)?;
        let row = self.row.checked_add_signed(drow)?;
        Some(Position { col, row })
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Color category of a tile. Closed set, compared only for equality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    Red,
    Green,
    Blue,
    Violet,
    Black,
}

impl TileType {
    /// Every tile type, in palette order.
    pub const ALL: [TileType; 5] = [
        TileType::Red,
        TileType::Green,
        TileType::Blue,
        TileType::Violet,
        TileType::Black,
    ];

    /// Draw a uniformly random type from the first `palette_size` types.
    ///
    /// Panics if `palette_size` is zero or larger than [`TileType::ALL`].
    pub fn random(rng: &mut GameRng, palette_size: usize) -> Self {
        assert!(
            (1..=Self::ALL.len()).contains(&palette_size),
            "palette size {} out of range",
            palette_size
        );
        Self::ALL[rng.gen_range_usize(0..palette_size)]
    }

    /// Single-letter code used by the board text layout.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            TileType::Red => 'R',
            TileType::Green => 'G',
            TileType::Blue => 'B',
            TileType::Violet => 'V',
            TileType::Black => 'K',
        }
    }

    /// Parse a letter code (case-insensitive).
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'R' => Some(TileType::Red),
            'G' => Some(TileType::Green),
            'B' => Some(TileType::Blue),
            'V' => Some(TileType::Violet),
            'K' => Some(TileType::Black),
            _ => None,
        }
    }
}

/// Extra clear effect carried by a tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusKind {
    #[default]
    None,
    /// Clears the tile's whole row.
    HorizontalLine,
    /// Clears the tile's whole column.
    VerticalLine,
    /// Clears the 3x3 neighbourhood.
    Bomb,
}

impl BonusKind {
    /// True for either line bonus.
    #[must_use]
    pub const fn is_line(self) -> bool {
        matches!(self, BonusKind::HorizontalLine | BonusKind::VerticalLine)
    }
}

/// A tile on the board.
///
/// `position` always equals the board slot holding the tile. Only the
/// board writes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub tile_type: TileType,
    pub bonus: BonusKind,
    pub(crate) position: Position,
}

impl Tile {
    pub(crate) fn new(id: TileId, tile_type: TileType, bonus: BonusKind, position: Position) -> Self {
        Self {
            id,
            tile_type,
            bonus,
            position,
        }
    }

    /// Grid slot currently holding this tile.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Check whether this tile carries a bonus.
    #[must_use]
    pub fn has_bonus(&self) -> bool {
        self.bonus != BonusKind::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacency() {
        let center = Position::new(2, 2);
        assert!(center.is_adjacent(Position::new(3, 2)));
        assert!(center.is_adjacent(Position::new(2, 1)));
        assert!(!center.is_adjacent(Position::new(3, 3)));
        assert!(!center.is_adjacent(Position::new(4, 2)));
        assert!(!center.is_adjacent(center));
    }

    #[test]
    fn test_offset_underflow() {
        let origin = Position::new(0, 0);
        assert_eq!(origin.offset(-1, 0), None);
        assert_eq!(origin.offset(1, 1), Some(Position::new(1, 1)));
    }

    #[test]
    fn test_letters_roundtrip() {
        for tile_type in TileType::ALL {
            assert_eq!(TileType::from_letter(tile_type.letter()), Some(tile_type));
        }
        assert_eq!(TileType::from_letter('r'), Some(TileType::Red));
        assert_eq!(TileType::from_letter('x'), None);
    }

    #[test]
    fn test_random_respects_palette() {
        let mut rng = GameRng::new(7);
        for _ in 0..200 {
            let tile_type = TileType::random(&mut rng, 3);
            assert!(TileType::ALL[..3].contains(&tile_type));
        }
    }

    #[test]
    #[should_panic(expected = "palette size")]
    fn test_random_rejects_empty_palette() {
        let mut rng = GameRng::new(7);
        let _ = TileType::random(&mut rng, 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", TileId(4)), "Tile(4)");
        assert_eq!(format!("{}", Position::new(1, 2)), "(1, 2)");
    }
}
