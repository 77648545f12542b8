//! Global busy indicator driven by a pending-request counter.
//!
//! DESIGN
//! ======
//! Two states: idle (count 0) and busy (count > 0). Subscribers are told only
//! about transitions and message changes, not every increment. Decrements
//! clamp at zero so an unbalanced `hide` can never drive the count negative.

#[cfg(test)]
#[path = "loading_test.rs"]
mod loading_test;

use std::cell::{Cell, RefCell};

use crate::util::observer::{Observers, SubscriptionId};

pub const DEFAULT_LOADING_MESSAGE: &str = "Loading...";

/// What the overlay should show right now.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadingSnapshot {
    pub busy: bool,
    pub message: String,
}

#[derive(Default)]
pub struct LoadingTracker {
    pending: Cell<usize>,
    message: RefCell<String>,
    observers: Observers<LoadingSnapshot>,
}

impl LoadingTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more outstanding operation.
    pub fn begin(&self) {
        self.begin_with(DEFAULT_LOADING_MESSAGE);
    }

    pub fn begin_with(&self, message: &str) {
        let was_idle = self.pending.get() == 0;
        self.pending.set(self.pending.get() + 1);
        let message_changed = *self.message.borrow() != message;
        if message_changed {
            *self.message.borrow_mut() = message.to_owned();
        }
        if was_idle || message_changed {
            self.notify();
        }
    }

    /// Settle one outstanding operation.
    pub fn end(&self) {
        let current = self.pending.get();
        if current == 0 {
            log::warn!("loading tracker ended with no pending operations");
            return;
        }
        self.pending.set(current - 1);
        if current == 1 {
            self.message.borrow_mut().clear();
            self.notify();
        }
    }

    /// Manual overlay for multi-step page flows ("Signing you in...").
    pub fn show(&self, message: &str) {
        self.begin_with(message);
    }

    pub fn hide(&self) {
        self.end();
    }

    /// Replace the visible message without touching the counter.
    pub fn set_message(&self, message: &str) {
        *self.message.borrow_mut() = message.to_owned();
        if self.is_busy() {
            self.notify();
        }
    }

    /// Reset to idle regardless of outstanding operations.
    pub fn force_hide(&self) {
        let was_busy = self.is_busy();
        self.pending.set(0);
        self.message.borrow_mut().clear();
        if was_busy {
            self.notify();
        }
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.get()
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.pending.get() > 0
    }

    #[must_use]
    pub fn snapshot(&self) -> LoadingSnapshot {
        LoadingSnapshot { busy: self.is_busy(), message: self.message.borrow().clone() }
    }

    pub fn subscribe(&self, callback: impl Fn(&LoadingSnapshot) + 'static) -> SubscriptionId {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
        self.observers.publish(&snapshot);
    }
}
