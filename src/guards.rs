//! Route guards: decide whether a navigation may proceed.
//!
//! SYSTEM CONTEXT
//! ==============
//! The router runs a route's guards in order before rendering it. Guards read
//! the session, may issue one backend role check, may emit one notification,
//! and return a [`GuardDecision`]. They never mutate the session; a 401 during
//! the role check is handled by the auth interceptor like any other request.

#[cfg(test)]
#[path = "guards_test.rs"]
mod guards_test;

use std::rc::Rc;

use crate::net::api::BankApi;
use crate::net::interceptor::LOGIN_ROUTE;
use crate::state::notifications::NotificationCenter;
use crate::state::roles::ADMIN_ROLES;
use crate::state::session::SessionStore;

pub const DASHBOARD_ROUTE: &str = "/dashboard";
pub const RETURN_URL_PARAM: &str = "returnUrl";

pub const ACCESS_DENIED_TITLE: &str = "Access Denied";
pub const ADMIN_REQUIRED_MESSAGE: &str =
    "You do not have permission to access this section. Admin privileges required.";
pub const ROLE_CHECK_FAILED_MESSAGE: &str = "Could not verify your role. Admin privileges required.";

/// Role the backend must report for the admin fallback check.
const BACKEND_ADMIN_ROLE: &str = "ROLE_ADMIN";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Redirect {
    pub path: String,
    pub return_url: Option<String>,
}

impl Redirect {
    fn login(target: &str) -> Self {
        Self { path: LOGIN_ROUTE.to_owned(), return_url: Some(target.to_owned()) }
    }

    fn dashboard() -> Self {
        Self { path: DASHBOARD_ROUTE.to_owned(), return_url: None }
    }

    /// Router URL, with the return URL as an encoded query parameter.
    #[must_use]
    pub fn to_url(&self) -> String {
        match &self.return_url {
            Some(ret) => {
                let qs = url::form_urlencoded::Serializer::new(String::new())
                    .append_pair(RETURN_URL_PARAM, ret)
                    .finish();
                format!("{}?{qs}", self.path)
            }
            None => self.path.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(Redirect),
}

impl GuardDecision {
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Everything a guard may consult.
#[derive(Clone)]
pub struct GuardContext {
    pub session: Rc<SessionStore>,
    pub api: BankApi,
    pub notifications: Rc<NotificationCenter>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteGuard {
    Authenticated,
    Admin,
}

/// Allow iff signed in; otherwise send to login, remembering `target`.
#[must_use]
pub fn auth_guard(session: &SessionStore, target: &str) -> GuardDecision {
    if session.is_authenticated() {
        GuardDecision::Allow
    } else {
        log::debug!("auth guard: redirecting {target} to login");
        GuardDecision::Redirect(Redirect::login(target))
    }
}

/// The part of the admin guard answerable from local state. `None` means the
/// backend has to be asked.
#[must_use]
pub fn admin_guard_local(session: &SessionStore, target: &str) -> Option<GuardDecision> {
    if !session.is_authenticated() {
        return Some(GuardDecision::Redirect(Redirect::login(target)));
    }
    if session.has_any_role(&ADMIN_ROLES) {
        return Some(GuardDecision::Allow);
    }
    None
}

/// Allow admins. Non-admin sessions get one backend role check; denial shows
/// one "Access Denied" notification and redirects to the dashboard.
pub async fn admin_guard(
    session: &SessionStore,
    api: &BankApi,
    notifications: &NotificationCenter,
    target: &str,
) -> GuardDecision {
    if let Some(decision) = admin_guard_local(session, target) {
        return decision;
    }

    let message = match api.role_claims().await {
        Ok(claims) if claims.roles.iter().any(|r| r == BACKEND_ADMIN_ROLE) => {
            log::info!("admin guard: backend confirmed admin role");
            return GuardDecision::Allow;
        }
        Ok(_) => ADMIN_REQUIRED_MESSAGE,
        Err(err) => {
            log::error!("admin guard: role check failed: {err}");
            ROLE_CHECK_FAILED_MESSAGE
        }
    };
    notifications.error(ACCESS_DENIED_TITLE, message);
    GuardDecision::Redirect(Redirect::dashboard())
}

/// Run `guards` in order, stopping at the first redirect.
pub async fn run_guards(guards: &[RouteGuard], ctx: &GuardContext, target: &str) -> GuardDecision {
    for guard in guards {
        let decision = match guard {
            RouteGuard::Authenticated => auth_guard(&ctx.session, target),
            RouteGuard::Admin => admin_guard(&ctx.session, &ctx.api, &ctx.notifications, target).await,
        };
        if !decision.is_allowed() {
            return decision;
        }
    }
    GuardDecision::Allow
}

/// Return URL from a login query string, accepted only when it is an
/// in-app absolute path.
#[must_use]
pub fn return_url_from_query(query: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == RETURN_URL_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| is_internal_path(value))
}

fn is_internal_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.starts_with(LOGIN_ROUTE)
}
