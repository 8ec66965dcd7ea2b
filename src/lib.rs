//! # match3-engine
//!
//! The resolution core of a tile-matching puzzle: swap validation, chain
//! detection, bonus tiles and the collect/collapse/fill cascade.
//!
//! ## Design Principles
//!
//! 1. **Presentation-Driven**: The engine never animates or waits. It issues
//!    animation requests and advances only when every request of a phase
//!    has reported completion.
//!
//! 2. **Deterministic**: All randomness flows through a seeded, owned
//!    [`GameRng`], so a seed reproduces a game exactly.
//!
//! 3. **Raw Events**: The engine reports what was collected, with chain
//!    lengths and the cascade multiplier. Scoring, audio and UI are left to
//!    subscribers.
//!
//! ## Modules
//!
//! - `core`: Tiles, positions, configuration, RNG
//! - `board`: The grid and chain-free board generation
//! - `chains`: Horizontal, vertical and intersection chain detection
//! - `swaps`: Swap validation and hint enumeration
//! - `bonus`: Bonus spawn policy and blast resolution
//! - `events`: Domain events and publish/subscribe
//! - `engine`: The cascade state machine and presentation seam

pub mod board;
pub mod bonus;
pub mod chains;
pub mod core;
pub mod engine;
pub mod events;
pub mod swaps;

// Re-export commonly used types
pub use crate::core::{
    BonusKind, ConfigError, EngineConfig, GameRng, GameRngState, Position, Tile, TileId, TileType,
};

pub use crate::board::{Board, BoardGenerator, BoardParseError};

pub use crate::chains::{Chain, ChainFinder, Orientation};

pub use crate::swaps::{PendingSwap, SwapOracle};

pub use crate::bonus::{Activation, BonusPolicy, PendingBonus};

pub use crate::events::{CascadeEvent, EventBus, EventKind, ListenerId};

pub use crate::engine::{
    AnimationKind, AnimationRequest, CascadeEngine, CascadeState, ImmediatePresenter, Phase,
    Presenter, SwapResponse,
};
