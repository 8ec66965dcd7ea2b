//! Cascade phases and the state the engine exposes.

use serde::{Deserialize, Serialize};

/// Where the engine is in a swap's lifecycle.
///
/// ```text
/// Loading -> Idle -> AwaitingSwapAnimation -> Collecting -> Collapsing -> Filling
///             ^              |                    |                        |
///             +-- rejected --+                    +- no chains             |
///             +-------------------- Collecting <---------------------------+
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Every tile is playing its appear animation.
    Loading,

    /// Waiting for a swap request.
    Idle,

    /// The two swapped tiles are moving (or moving back).
    AwaitingSwapAnimation,

    /// Chain and bonus tiles are being collected.
    Collecting,

    /// Pending bonuses appear and tiles fall into the gaps.
    Collapsing,

    /// New tiles fall into the empty cells at the top.
    Filling,
}

impl Phase {
    /// Check if the engine will accept a swap request.
    #[must_use]
    pub fn accepts_swaps(self) -> bool {
        self == Phase::Idle
    }
}

/// Multiplier and phase of the current cascade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeState {
    /// Starts at 1 when a swap commits, +1 per collection round.
    pub multiplier: u32,
    pub phase: Phase,
    /// Collection rounds that cleared something since the last commit.
    pub rounds: u32,
}

impl CascadeState {
    pub(crate) fn new(phase: Phase) -> Self {
        Self {
            multiplier: 1,
            phase,
            rounds: 0,
        }
    }
}
