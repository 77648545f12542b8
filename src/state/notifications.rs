//! User-facing toast notifications.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages report request failures here with the normalized error message;
//! route guards report "Access Denied". The toast component renders the list
//! and removes each entry once its duration has elapsed.

#[cfg(test)]
#[path = "notifications_test.rs"]
mod notifications_test;

use std::cell::{Cell, RefCell};
use std::time::Duration;

use crate::util::observer::{Observers, SubscriptionId};

pub const DEFAULT_DURATION: Duration = Duration::from_millis(5000);
/// Errors stay on screen longer.
pub const ERROR_DURATION: Duration = Duration::from_millis(8000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
    Warning,
    Info,
}

impl NotificationLevel {
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Success => "toast--success",
            Self::Error => "toast--error",
            Self::Warning => "toast--warning",
            Self::Info => "toast--info",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
    /// `None` keeps the toast until dismissed.
    pub duration: Option<Duration>,
}

#[derive(Default)]
pub struct NotificationCenter {
    next_id: Cell<u64>,
    items: RefCell<Vec<Notification>>,
    observers: Observers<Vec<Notification>>,
}

impl NotificationCenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a notification and return its id.
    pub fn show(&self, level: NotificationLevel, title: &str, message: &str, duration: Option<Duration>) -> u64 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.items.borrow_mut().push(Notification {
            id,
            level,
            title: title.to_owned(),
            message: message.to_owned(),
            duration,
        });
        self.notify();
        id
    }

    pub fn success(&self, title: &str, message: &str) -> u64 {
        self.show(NotificationLevel::Success, title, message, Some(DEFAULT_DURATION))
    }

    pub fn error(&self, title: &str, message: &str) -> u64 {
        self.show(NotificationLevel::Error, title, message, Some(ERROR_DURATION))
    }

    pub fn warning(&self, title: &str, message: &str) -> u64 {
        self.show(NotificationLevel::Warning, title, message, Some(DEFAULT_DURATION))
    }

    pub fn info(&self, title: &str, message: &str) -> u64 {
        self.show(NotificationLevel::Info, title, message, Some(DEFAULT_DURATION))
    }

    /// Remove one notification. Returns `false` if it was already gone.
    pub fn remove(&self, id: u64) -> bool {
        let removed = {
            let mut items = self.items.borrow_mut();
            let before = items.len();
            items.retain(|n| n.id != id);
            items.len() != before
        };
        if removed {
            self.notify();
        }
        removed
    }

    pub fn clear(&self) {
        let had_items = !self.items.borrow().is_empty();
        self.items.borrow_mut().clear();
        if had_items {
            self.notify();
        }
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.items.borrow().len()
    }

    #[must_use]
    pub fn items(&self) -> Vec<Notification> {
        self.items.borrow().clone()
    }

    #[must_use]
    pub fn by_level(&self, level: NotificationLevel) -> Vec<Notification> {
        self.items.borrow().iter().filter(|n| n.level == level).cloned().collect()
    }

    pub fn subscribe(&self, callback: impl Fn(&Vec<Notification>) + 'static) -> SubscriptionId {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn notify(&self) {
        let items = self.items();
        self.observers.publish(&items);
    }
}
