//! Domain events raised by the cascade engine.
//!
//! Events carry raw data only: tiles, lengths, counts and the current
//! multiplier. Scoring, sound and UI live with the subscribers.

use serde::{Deserialize, Serialize};

use crate::chains::Orientation;
use crate::core::{Position, Tile, TileType};

/// Discriminant of a [`CascadeEvent`], used to filter subscriptions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    BlockCollected,
    LineBonusCollected,
    BombBonusCollected,
    ChainCollected,
    BonusSpawned,
    SwapReverted,
    CascadeSettled,
}

/// Something that happened on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CascadeEvent {
    /// A tile was queued for collection.
    BlockCollected { tile: Tile, multiplier: u32 },

    /// A line bonus fired; `count` includes the bonus tile.
    LineBonusCollected { tile: Tile, count: usize, multiplier: u32 },

    /// A bomb fired; `count` includes the bomb tile.
    BombBonusCollected { tile: Tile, count: usize, multiplier: u32 },

    /// A chain was cleared.
    ChainCollected {
        orientation: Orientation,
        tile_type: TileType,
        length: usize,
        multiplier: u32,
    },

    /// A pending bonus became a tile.
    BonusSpawned { tile: Tile },

    /// An adjacent swap that made no chain finished animating back.
    SwapReverted { from: Position, to: Position },

    /// The board is stable again after a committed swap.
    ///
    /// `rounds` is the number of collection rounds that cleared something.
    CascadeSettled { multiplier: u32, rounds: u32 },
}

impl CascadeEvent {
    /// The event's kind.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            CascadeEvent::BlockCollected { .. } => EventKind::BlockCollected,
            CascadeEvent::LineBonusCollected { .. } => EventKind::LineBonusCollected,
            CascadeEvent::BombBonusCollected { .. } => EventKind::BombBonusCollected,
            CascadeEvent::ChainCollected { .. } => EventKind::ChainCollected,
            CascadeEvent::BonusSpawned { .. } => EventKind::BonusSpawned,
            CascadeEvent::SwapReverted { .. } => EventKind::SwapReverted,
            CascadeEvent::CascadeSettled { .. } => EventKind::CascadeSettled,
        }
    }

    /// The multiplier in effect when the event was raised, for scoring events.
    #[must_use]
    pub fn multiplier(&self) -> Option<u32> {
        match self {
            CascadeEvent::BlockCollected { multiplier, .. }
            | CascadeEvent::LineBonusCollected { multiplier, .. }
            | CascadeEvent::BombBonusCollected { multiplier, .. }
            | CascadeEvent::ChainCollected { multiplier, .. }
            | CascadeEvent::CascadeSettled { multiplier, .. } => Some(*multiplier),
            CascadeEvent::BonusSpawned { .. } | CascadeEvent::SwapReverted { .. } => None,
        }
    }
}
