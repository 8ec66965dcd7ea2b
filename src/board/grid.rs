//! The tile grid.
//!
//! `Board` is the sole owner of tile placement. Every relocation goes
//! through [`Board::swap_positions`], [`Board::relocate`] or
//! [`Board::set`], each of which rewrites the tile's stored position to
//! match its new slot, so a tile and its slot can never disagree.
//!
//! Cells are stored row-major in a flat `Vec` (`row * width + col`).
//!
//! ## Busy tiles
//!
//! The board does not animate anything. The engine marks a tile busy when
//! it hands the tile to the presentation layer and clears the mark when
//! the presentation reports completion. A busy tile is still on the board
//! but is not *usable*: chain detection and swap checks skip it.
//!
//! ## Text layout
//!
//! ```
//! use match3_engine::board::Board;
//! use match3_engine::core::{Position, TileType};
//!
//! let board = Board::parse(&["RGB", "R.B"]).unwrap();
//! assert_eq!(board.type_at(Position::new(0, 1)), Some(TileType::Red));
//! assert!(board.get(Position::new(1, 1)).is_none());
//! assert_eq!(board.to_string(), "RGB\nR.B");
//! ```

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::core::{BonusKind, Position, Tile, TileId, TileType};

/// Reasons a text layout cannot be turned into a board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardParseError {
    #[error("layout has no cells")]
    Empty,

    #[error("row {row} has {got} cells, expected {expected}")]
    Ragged { row: usize, expected: usize, got: usize },

    #[error("unknown tile '{letter}' at {position}")]
    UnknownTile { letter: char, position: Position },
}

/// A `width x height` grid of optional tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    /// Row-major cells.
    cells: Vec<Option<Tile>>,
    /// Tiles currently handed to the presentation layer.
    busy: FxHashSet<TileId>,
    next_id: u32,
}

impl Board {
    /// Create an empty board.
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "board must have at least one cell");
        Self {
            width,
            height,
            cells: vec![None; width * height],
            busy: FxHashSet::default(),
            next_id: 0,
        }
    }

    /// Build a board from rows of tile letters.
    ///
    /// `R G B V K` (any case) place plain tiles, `.` leaves a cell empty.
    /// Tiles receive ids in row-major order starting at 0.
    ///
    /// The layout has no notation for bonus kinds. Place bonus tiles with
    /// [`Board::place`] after parsing.
    pub fn parse(rows: &[&str]) -> Result<Self, BoardParseError> {
        let width = rows.first().map_or(0, |row| row.chars().count());
        if width == 0 {
            return Err(BoardParseError::Empty);
        }

        let mut board = Self::new(width, rows.len());
        for (row, line) in rows.iter().enumerate() {
            let got = line.chars().count();
            if got != width {
                return Err(BoardParseError::Ragged {
                    row,
                    expected: width,
                    got,
                });
            }
            for (col, letter) in line.chars().enumerate() {
                let position = Position::new(col, row);
                if letter == '.' {
                    continue;
                }
                let tile_type = TileType::from_letter(letter)
                    .ok_or(BoardParseError::UnknownTile { letter, position })?;
                board.place(position, tile_type, BonusKind::None);
            }
        }
        Ok(board)
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Check if a position lies on the board.
    #[must_use]
    pub fn in_bounds(&self, position: Position) -> bool {
        position.col < self.width && position.row < self.height
    }

    #[inline]
    fn index(&self, position: Position) -> usize {
        assert!(
            self.in_bounds(position),
            "position {} outside {}x{} board",
            position,
            self.width,
            self.height
        );
        position.row * self.width + position.col
    }

    /// Get the tile at a position.
    ///
    /// Panics if the position is off the board.
    #[must_use]
    pub fn get(&self, position: Position) -> Option<Tile> {
        self.cells[self.index(position)]
    }

    /// Get the type of the tile at a position.
    #[must_use]
    pub fn type_at(&self, position: Position) -> Option<TileType> {
        self.get(position).map(|tile| tile.tile_type)
    }

    /// Get the tile at a position if it is occupied and not busy.
    #[must_use]
    pub fn usable(&self, position: Position) -> Option<Tile> {
        self.get(position).filter(|tile| !self.busy.contains(&tile.id))
    }

    /// Check whether a position holds a usable tile.
    #[must_use]
    pub fn is_usable(&self, position: Position) -> bool {
        self.usable(position).is_some()
    }

    /// Put a tile (or nothing) into a cell, returning the previous content.
    ///
    /// The stored tile's position is rewritten to `position`.
    pub fn set(&mut self, position: Position, tile: Option<Tile>) -> Option<Tile> {
        let idx = self.index(position);
        let tile = tile.map(|mut tile| {
            tile.position = position;
            tile
        });
        std::mem::replace(&mut self.cells[idx], tile)
    }

    /// Create a new tile in a cell, replacing whatever was there.
    ///
    /// Returns the new tile's id.
    pub fn place(&mut self, position: Position, tile_type: TileType, bonus: BonusKind) -> TileId {
        let id = TileId(self.next_id);
        self.next_id += 1;
        if let Some(old) = self.set(position, Some(Tile::new(id, tile_type, bonus, position))) {
            self.busy.remove(&old.id);
        }
        id
    }

    /// Remove the tile from a cell.
    ///
    /// A removed tile is no longer busy.
    pub fn take(&mut self, position: Position) -> Option<Tile> {
        let tile = self.set(position, None);
        if let Some(tile) = tile {
            self.busy.remove(&tile.id);
        }
        tile
    }

    /// Exchange the contents of two cells.
    ///
    /// Either cell may be empty. Positions of the moved tiles follow.
    pub fn swap_positions(&mut self, a: Position, b: Position) {
        let ia = self.index(a);
        let ib = self.index(b);
        self.cells.swap(ia, ib);
        if let Some(tile) = self.cells[ia].as_mut() {
            tile.position = a;
        }
        if let Some(tile) = self.cells[ib].as_mut() {
            tile.position = b;
        }
    }

    /// Move a tile to an empty cell, clearing its origin.
    ///
    /// Returns false if `from` was empty. Panics if `to` is occupied.
    pub fn relocate(&mut self, from: Position, to: Position) -> bool {
        if from == to {
            return self.get(from).is_some();
        }
        assert!(
            self.get(to).is_none(),
            "cannot relocate onto occupied cell {}",
            to
        );
        match self.set(from, None) {
            Some(tile) => {
                self.set(to, Some(tile));
                true
            }
            None => false,
        }
    }

    /// Check whether a tile is busy.
    #[must_use]
    pub fn is_busy(&self, id: TileId) -> bool {
        self.busy.contains(&id)
    }

    /// Mark a tile busy. Returns false if it already was.
    pub fn mark_busy(&mut self, id: TileId) -> bool {
        self.busy.insert(id)
    }

    /// Clear a tile's busy mark. Returns false if it was not busy.
    pub fn clear_busy(&mut self, id: TileId) -> bool {
        self.busy.remove(&id)
    }

    /// Check whether any tile is mid-presentation.
    #[must_use]
    pub fn is_any_tile_busy(&self) -> bool {
        !self.busy.is_empty()
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let width = self.width;
        (0..self.width * self.height).map(move |idx| Position::new(idx % width, idx / width))
    }

    /// All tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter().flatten()
    }

    /// Visit every tile in row-major order.
    pub fn for_each_tile(&self, mut f: impl FnMut(&Tile)) {
        for tile in self.tiles() {
            f(tile);
        }
    }

    /// Find where a tile currently sits.
    #[must_use]
    pub fn locate(&self, id: TileId) -> Option<Position> {
        self.tiles().find(|tile| tile.id == id).map(|tile| tile.position)
    }

    /// Number of empty cells.
    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    /// Check if every cell is occupied.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }
}

impl std::fmt::Display for Board {
    /// One line per row; bonus tiles are lowercase, empty cells are `.`.
    ///
    /// The bonus kind is not written, so parsing the output gives back
    /// plain tiles of the same types.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.height {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.width {
                let letter = match self.get(Position::new(col, row)) {
                    None => '.',
                    Some(tile) if tile.has_bonus() => tile.tile_type.letter().to_ascii_lowercase(),
                    Some(tile) => tile.tile_type.letter(),
                };
                write!(f, "{}", letter)?;
            }
        }
        Ok(())
    }
}
