//! Board storage and generation.
//!
//! - [`Board`]: the grid of optional tiles and its placement primitives
//! - [`BoardGenerator`]: chain-free initial fill

mod generator;
mod grid;

pub use generator::BoardGenerator;
pub use grid::{Board, BoardParseError};
