//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reactive projection of [`SessionStore`](super::session::SessionStore) held
//! in an `RwSignal` so components can render identity-dependent markup. The
//! store stays the source of truth; this is refreshed from its change events.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::UserProfile;
use crate::state::session::Session;

/// Signed-in member, if any. The persisted session is restored before the
/// first render, so there is no "still restoring" state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<UserProfile>,
}

impl AuthState {
    #[must_use]
    pub fn from_session(session: &Session) -> Self {
        let user = if session.is_authenticated() { session.user.clone() } else { None };
        Self { user }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(UserProfile::is_admin)
    }

    #[must_use]
    pub fn display_name(&self) -> Option<String> {
        self.user.as_ref().map(UserProfile::display_name)
    }
}
