//! Events raised by the engine and their subscribers.
//!
//! ## Key Components
//!
//! - [`CascadeEvent`]: block, bonus and chain collection plus phase milestones
//! - [`EventKind`]: event discriminant for filtered subscriptions
//! - [`EventBus`]: fire-and-forget delivery to zero or more listeners

mod bus;
mod event;

pub use bus::{EventBus, ListenerId};
pub use event::{CascadeEvent, EventKind};
