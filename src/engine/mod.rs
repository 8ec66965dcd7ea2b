//! The cascade engine and its presentation seam.
//!
//! ## Key Components
//!
//! - [`CascadeEngine`]: owns the board, validates swaps, runs
//!   collect/collapse/fill rounds and raises events
//! - [`Phase`], [`CascadeState`]: where a cascade is and its multiplier
//! - [`AnimationRequest`], [`Presenter`]: work handed to the presentation
//!   layer and the completions that drive the engine forward
//!
//! ## Driving the engine
//!
//! Either pump a [`Presenter`] implementation, or drain
//! [`CascadeEngine::take_requests`] and report each completion through
//! [`CascadeEngine::animation_finished`] yourself.

mod cascade;
mod phase;
mod presentation;

pub use cascade::{CascadeEngine, SwapResponse};
pub use phase::{CascadeState, Phase};
pub use presentation::{AnimationKind, AnimationRequest, ImmediatePresenter, Presenter};
