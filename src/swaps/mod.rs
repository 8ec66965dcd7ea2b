//! Swap legality.
//!
//! - [`PendingSwap`]: a proposed exchange of two tiles
//! - [`SwapOracle`]: which swaps create chains

mod oracle;

pub use oracle::{PendingSwap, SwapOracle};
