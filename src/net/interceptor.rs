//! Cross-cutting request/response filters.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`ApiClient`](super::client::ApiClient) runs every registered interceptor's
//! `on_request` in registration order before dispatch and every `on_response`
//! after the request settles (success, failure, timeout, or cancellation).
//! `on_response` runs exactly once per `on_request`.

#[cfg(test)]
#[path = "interceptor_test.rs"]
mod interceptor_test;

use std::rc::Rc;

use super::error::ApiError;
use super::http::{HEADER_AUTHORIZATION, HEADER_SKIP_LOADING, HttpRequest, HttpResponse};
use crate::state::loading::LoadingTracker;
use crate::state::session::SessionStore;
use crate::util::navigation::Navigator;

pub const LOGIN_ROUTE: &str = "/login";

pub trait Interceptor {
    fn on_request(&self, request: &mut HttpRequest) {
        let _ = request;
    }

    fn on_response(&self, request: &HttpRequest, outcome: &Result<HttpResponse, ApiError>) {
        let _ = (request, outcome);
    }
}

// =============================================================================
// AUTH
// =============================================================================

/// Attaches the bearer token and tears the session down on a 401.
///
/// This is the only component that reacts to `unauthorized` responses by
/// clearing the session; guards and pages must not repeat it.
pub struct AuthInterceptor {
    session: Rc<SessionStore>,
    navigator: Rc<dyn Navigator>,
}

impl AuthInterceptor {
    #[must_use]
    pub fn new(session: Rc<SessionStore>, navigator: Rc<dyn Navigator>) -> Self {
        Self { session, navigator }
    }
}

impl Interceptor for AuthInterceptor {
    fn on_request(&self, request: &mut HttpRequest) {
        if request.is_auth_endpoint {
            return;
        }
        if let Some(token) = self.session.token() {
            request.set_header(HEADER_AUTHORIZATION, format!("Bearer {token}"));
        }
    }

    fn on_response(&self, request: &HttpRequest, outcome: &Result<HttpResponse, ApiError>) {
        let Err(err) = outcome else {
            return;
        };
        if err.is_unauthorized() && !request.is_auth_endpoint {
            log::warn!("{} {} returned 401, ending session", request.method.as_str(), request.path);
            self.session.clear();
            self.navigator.navigate(LOGIN_ROUTE);
        } else if err.kind == super::error::ErrorKind::Network {
            log::error!("network error on {}: {}", request.path, err.raw);
        }
    }
}

// =============================================================================
// LOADING
// =============================================================================

/// Drives the global busy indicator from in-flight requests.
pub struct LoadingInterceptor {
    tracker: Rc<LoadingTracker>,
}

impl LoadingInterceptor {
    #[must_use]
    pub fn new(tracker: Rc<LoadingTracker>) -> Self {
        Self { tracker }
    }

    fn tracked(request: &HttpRequest) -> bool {
        !request.has_header(HEADER_SKIP_LOADING)
    }
}

impl Interceptor for LoadingInterceptor {
    fn on_request(&self, request: &mut HttpRequest) {
        if Self::tracked(request) {
            self.tracker.begin();
        }
    }

    fn on_response(&self, request: &HttpRequest, outcome: &Result<HttpResponse, ApiError>) {
        if let Err(err) = outcome {
            log::debug!("{} {} failed: {} ({})", request.method.as_str(), request.path, err.message, err.kind);
        }
        if Self::tracked(request) {
            self.tracker.end();
        }
    }
}
