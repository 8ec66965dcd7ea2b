//! Core types: tiles, coordinates, RNG, configuration.
//!
//! Everything else in the crate is built from these.

pub mod config;
pub mod rng;
pub mod tile;

pub use config::{ConfigError, EngineConfig};
pub use rng::{GameRng, GameRngState};
pub use tile::{BonusKind, Position, Tile, TileId, TileType};
