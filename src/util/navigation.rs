//! Navigation requests raised outside the component tree.
//!
//! SYSTEM CONTEXT
//! ==============
//! The auth interceptor and logout flow need to send the user to `/login`, but
//! they run outside any Leptos component and cannot call `use_navigate`. They
//! publish the target path through [`NavigationRequests`]; the app root
//! subscribes and forwards each path to the router.

use super::observer::{Observers, SubscriptionId};

/// Anything able to move the user to another route.
pub trait Navigator {
    fn navigate(&self, path: &str);
}

/// Publish/subscribe channel of requested paths.
#[derive(Default)]
pub struct NavigationRequests {
    observers: Observers<String>,
}

impl NavigationRequests {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, callback: impl Fn(&String) + 'static) -> SubscriptionId {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }
}

impl Navigator for NavigationRequests {
    fn navigate(&self, path: &str) {
        log::debug!("navigation requested: {path}");
        self.observers.publish(&path.to_owned());
    }
}
