//! Animation requests and the presentation collaborator.
//!
//! The engine never animates. It hands out [`AnimationRequest`]s and waits
//! for one completion per request. A tile has at most one request in
//! flight, so completions are reported by tile id alone.

use serde::{Deserialize, Serialize};

use crate::core::{Position, TileId};

/// What the presentation layer should do with a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationKind {
    /// Fade or scale the tile in where it stands.
    Appear { at: Position },

    /// Remove the tile; its cell empties when the animation completes.
    Collect { at: Position },

    /// Slide the tile down during collapse.
    MoveTo { from: Position, to: Position },

    /// Slide the tile into its swap partner's cell (or back again).
    SwapTo { from: Position, to: Position },

    /// Drop a new tile from `drop` rows above the board into `to`.
    FallIn { to: Position, drop: usize },
}

/// A single animation to play for a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationRequest {
    pub tile: TileId,
    pub kind: AnimationKind,
}

/// The per-tile presentation collaborator.
///
/// Implementations start an animation in [`begin`](Presenter::begin) and
/// later report it from [`poll_finished`](Presenter::poll_finished),
/// exactly once per request, in any order.
pub trait Presenter {
    /// Start playing a request.
    fn begin(&mut self, request: &AnimationRequest);

    /// Tiles whose animation completed since the last poll.
    fn poll_finished(&mut self) -> Vec<TileId>;
}

/// Presenter that finishes every request on the next poll.
///
/// Useful for headless play, simulations and tests.
#[derive(Clone, Debug, Default)]
pub struct ImmediatePresenter {
    in_flight: Vec<TileId>,
    started: usize,
}

impl ImmediatePresenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total requests begun over the presenter's lifetime.
    #[must_use]
    pub fn started(&self) -> usize {
        self.started
    }
}

impl Presenter for ImmediatePresenter {
    fn begin(&mut self, request: &AnimationRequest) {
        self.in_flight.push(request.tile);
        self.started += 1;
    }

    fn poll_finished(&mut self) -> Vec<TileId> {
        std::mem::take(&mut self.in_flight)
    }
}
