//! Session store: the single owner of the bearer token and current member.
//!
//! SYSTEM CONTEXT
//! ==============
//! Injected into the API client interceptors, route guards, and pages. Only
//! [`SessionStore::set_session`] and [`SessionStore::clear`] mutate; everyone
//! else reads through accessors or subscribes to change events. No other
//! component keeps its own copy of the token.
//!
//! ERROR HANDLING
//! ==============
//! Restoring from storage fails closed: a profile that does not deserialize,
//! or a token without a profile, wipes the persisted entries.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::RefCell;

use crate::net::types::UserProfile;
use crate::state::roles;
use crate::util::observer::{Observers, SubscriptionId};
use crate::util::storage::Storage;

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "access_token";
/// Storage key for the JSON-serialized [`UserProfile`].
pub const USER_KEY: &str = "user";

/// In-memory view of the current session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
}

impl Session {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    /// Canonical roles of the signed-in member; empty when signed out.
    #[must_use]
    pub fn roles(&self) -> &[String] {
        self.user.as_ref().map_or(&[], |u| u.roles.as_slice())
    }
}

pub struct SessionStore {
    storage: Box<dyn Storage>,
    current: RefCell<Session>,
    observers: Observers<Session>,
}

impl SessionStore {
    /// Create an empty store. Call [`SessionStore::restore`] to load a
    /// previously persisted session.
    #[must_use]
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Self { storage, current: RefCell::new(Session::default()), observers: Observers::new() }
    }

    /// Load the persisted session, if any. Returns whether a session was
    /// restored.
    pub fn restore(&self) -> bool {
        let token = self.storage.get(TOKEN_KEY);
        let raw_user = self.storage.get(USER_KEY);

        match (token, raw_user) {
            (Some(token), Some(raw_user)) => match serde_json::from_str::<UserProfile>(&raw_user) {
                Ok(user) => {
                    log::debug!("restored session for member {}", user.member_number);
                    self.publish(Session { token: Some(token), user: Some(user) });
                    true
                }
                Err(e) => {
                    log::error!("stored user profile is unreadable, clearing session: {e}");
                    self.clear();
                    false
                }
            },
            (None, None) => false,
            _ => {
                log::warn!("partial session found in storage, clearing");
                self.clear();
                false
            }
        }
    }

    /// Persist a fresh session and notify subscribers.
    pub fn set_session(&self, token: &str, user: UserProfile) {
        match serde_json::to_string(&user) {
            Ok(raw) => self.storage.set(USER_KEY, &raw),
            Err(e) => log::error!("could not serialize user profile: {e}"),
        }
        self.storage.set(TOKEN_KEY, token);
        self.publish(Session { token: Some(token.to_owned()), user: Some(user) });
    }

    /// Drop the session everywhere and notify subscribers.
    pub fn clear(&self) {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(USER_KEY);
        self.publish(Session::default());
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current.borrow().is_authenticated()
    }

    #[must_use]
    pub fn current_user(&self) -> Option<UserProfile> {
        self.current.borrow().user.clone()
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.current.borrow().token.clone()
    }

    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.current.borrow().clone()
    }

    #[must_use]
    pub fn roles(&self) -> Vec<String> {
        self.current.borrow().roles().to_vec()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        roles::is_admin(self.current.borrow().roles())
    }

    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        roles::has_role(self.current.borrow().roles(), role)
    }

    #[must_use]
    pub fn has_any_role(&self, wanted: &[&str]) -> bool {
        roles::has_any_role(self.current.borrow().roles(), wanted)
    }

    pub fn subscribe(&self, callback: impl Fn(&Session) + 'static) -> SubscriptionId {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn publish(&self, session: Session) {
        *self.current.borrow_mut() = session.clone();
        self.observers.publish(&session);
    }
}
