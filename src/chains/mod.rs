//! Chains: runs of same-typed tiles and their detection.
//!
//! - [`Chain`]: an immutable horizontal, vertical or intersection run
//! - [`ChainFinder`]: exhaustive scan of a board for chains
//! - [`run_length`], [`max_run_length`]: local run measurement used by swap checks

mod chain;
mod finder;

pub use chain::{Chain, Orientation};
pub use finder::{max_run_length, run_length, ChainFinder};
