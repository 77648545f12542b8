//! Explicit publish/subscribe list used by the session, loading, and
//! notification stores.
//!
//! DESIGN
//! ======
//! Subscribers are plain callbacks keyed by a `SubscriptionId`; teardown is an
//! explicit `unsubscribe`. Publishing snapshots the subscriber list first so a
//! callback may subscribe, unsubscribe, or publish again without a `RefCell`
//! double borrow.

#[cfg(test)]
#[path = "observer_test.rs"]
mod observer_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Handle returned by [`Observers::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback<T> = Rc<dyn Fn(&T)>;

/// A typed event with a defined set of subscribers.
pub struct Observers<T> {
    next_id: Cell<u64>,
    subscribers: RefCell<Vec<(SubscriptionId, Callback<T>)>>,
}

impl<T> Default for Observers<T> {
    fn default() -> Self {
        Self { next_id: Cell::new(0), subscribers: RefCell::new(Vec::new()) }
    }
}

impl<T> Observers<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.subscribers.borrow_mut().push((id, Rc::new(callback)));
        id
    }

    /// Remove a subscriber. Returns `false` if the id was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id);
        subscribers.len() != before
    }

    pub fn publish(&self, value: &T) {
        let snapshot: Vec<Callback<T>> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();
        for callback in snapshot {
            callback(value);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.subscribers.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscribers.borrow().is_empty()
    }
}
