//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components apply identical guard behavior: run the route's guards
//! once on mount, render nothing until they allow, and follow any redirect.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::guards::{GuardContext, GuardDecision, RouteGuard};

/// Path plus query string as the router reports them, suitable as a guard
/// target and login return URL.
#[must_use]
pub fn route_target(pathname: &str, search: &str) -> String {
    let path = if pathname.is_empty() { "/" } else { pathname };
    match search.trim_start_matches('?') {
        "" => path.to_owned(),
        query => format!("{path}?{query}"),
    }
}

/// Evaluate `guards` for `target`. The returned signal flips to `true` once
/// every guard allows; a redirect replaces the current history entry.
pub fn install_route_guard<F>(guards: &'static [RouteGuard], ctx: GuardContext, target: String, navigate: F) -> RwSignal<bool>
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let allowed = RwSignal::new(false);

    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        match crate::guards::run_guards(guards, &ctx, &target).await {
            GuardDecision::Allow => {
                let _ = allowed.try_set(true);
            }
            GuardDecision::Redirect(redirect) => {
                navigate(&redirect.to_url(), NavigateOptions { replace: true, ..NavigateOptions::default() });
            }
        }
    });

    #[cfg(not(feature = "csr"))]
    {
        // No event loop off the browser: authentication check only.
        match crate::guards::auth_guard(&ctx.session, &target) {
            GuardDecision::Allow if !guards.contains(&RouteGuard::Admin) => allowed.set(true),
            GuardDecision::Allow => {}
            GuardDecision::Redirect(redirect) => navigate(&redirect.to_url(), NavigateOptions::default()),
        }
    }

    allowed
}
