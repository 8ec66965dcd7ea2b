//! Publish/subscribe for cascade events.
//!
//! Listeners are plain closures. Delivery is synchronous and in
//! subscription order; listeners get a shared reference and cannot reach
//! back into the engine, so they cannot stall or reorder a phase.

use smallvec::SmallVec;

use super::event::{CascadeEvent, EventKind};

/// Handle returned by [`EventBus::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u32);

impl std::fmt::Display for ListenerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Listener({})", self.0)
    }
}

type Handler = Box<dyn FnMut(&CascadeEvent)>;

struct Listener {
    id: ListenerId,
    /// Empty means every kind.
    kinds: SmallVec<[EventKind; 4]>,
    handler: Handler,
}

impl Listener {
    fn wants(&self, kind: EventKind) -> bool {
        self.kinds.is_empty() || self.kinds.contains(&kind)
    }
}

/// Registry of event listeners.
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use match3_engine::events::{CascadeEvent, EventBus, EventKind};
///
/// let mut bus = EventBus::new();
/// let settled = Rc::new(Cell::new(0));
/// let counter = Rc::clone(&settled);
/// bus.subscribe_to(&[EventKind::CascadeSettled], move |_| counter.set(counter.get() + 1));
///
/// bus.publish(&CascadeEvent::CascadeSettled { multiplier: 2, rounds: 1 });
/// assert_eq!(settled.get(), 1);
/// ```
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Listener>,
    next_id: u32,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for every event.
    pub fn subscribe(&mut self, handler: impl FnMut(&CascadeEvent) + 'static) -> ListenerId {
        self.subscribe_to(&[], handler)
    }

    /// Register a listener for the given kinds only (all kinds if empty).
    pub fn subscribe_to(
        &mut self,
        kinds: &[EventKind],
        handler: impl FnMut(&CascadeEvent) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push(Listener {
            id,
            kinds: kinds.iter().copied().collect(),
            handler: Box::new(handler),
        });
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|listener| listener.id != id);
        self.listeners.len() != before
    }

    /// Deliver an event. Returns how many listeners received it.
    pub fn publish(&mut self, event: &CascadeEvent) -> usize {
        let kind = event.kind();
        let mut delivered = 0;
        for listener in self.listeners.iter_mut().filter(|l| l.wants(kind)) {
            (listener.handler)(event);
            delivered += 1;
        }
        delivered
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::core::Position;

    fn settled() -> CascadeEvent {
        CascadeEvent::CascadeSettled { multiplier: 1, rounds: 0 }
    }

    fn reverted() -> CascadeEvent {
        CascadeEvent::SwapReverted {
            from: Position::new(0, 0),
            to: Position::new(0, 1),
        }
    }

    #[test]
    fn test_publish_without_listeners() {
        let mut bus = EventBus::new();
        assert_eq!(bus.publish(&settled()), 0);
    }

    #[test]
    fn test_all_listeners_receive_in_order() {
        let mut bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for tag in 0..3 {
            let log = Rc::clone(&log);
            bus.subscribe(move |_| log.borrow_mut().push(tag));
        }

        assert_eq!(bus.publish(&settled()), 3);
        assert_eq!(*log.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn test_kind_filter() {
        let mut bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        bus.subscribe_to(&[EventKind::SwapReverted], move |e| sink.borrow_mut().push(e.kind()));

        bus.publish(&settled());
        bus.publish(&reverted());

        assert_eq!(*seen.borrow(), vec![EventKind::SwapReverted]);
    }

    #[test]
    fn test_unsubscribe() {
        let mut bus = EventBus::new();
        let id = bus.subscribe(|_| {});
        let other = bus.subscribe(|_| {});
        assert_eq!(bus.listener_count(), 2);

        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        assert_eq!(bus.listener_count(), 1);
        assert_eq!(bus.publish(&settled()), 1);
        assert_ne!(id, other);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ListenerId(3)), "Listener(3)");
    }
}
