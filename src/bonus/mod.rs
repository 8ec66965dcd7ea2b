//! Bonus tiles: when they spawn and what they clear.
//!
//! - [`BonusPolicy`]: chain shape/length to [`PendingBonus`]
//! - [`affected_tiles`], [`chain_reaction`]: blast areas and their cascade

mod activation;
mod policy;

pub use activation::{affected_tiles, chain_reaction, Activation};
pub use policy::{BonusPolicy, PendingBonus};
