use super::*;
use crate::net::error::{RequestFailure, normalize};
use crate::net::http::Method;
use crate::net::types::UserProfile;
use crate::testing::RecordingNavigator;
use crate::util::storage::MemoryStorage;

fn request(path: &str, is_auth_endpoint: bool) -> HttpRequest {
    HttpRequest {
        method: Method::Get,
        path: path.to_owned(),
        url: format!("http://api.test{path}"),
        headers: Vec::new(),
        body: None,
        is_auth_endpoint,
    }
}

fn signed_in_session() -> Rc<SessionStore> {
    let session = Rc::new(SessionStore::new(Box::new(MemoryStorage::new())));
    session.set_session("tok1", UserProfile { member_number: "MB1001".to_owned(), ..UserProfile::default() });
    session
}

fn failure(status: u16) -> Result<HttpResponse, ApiError> {
    Err(normalize(RequestFailure::Status { status, body: String::new() }))
}

// =============================================================
// AuthInterceptor
// =============================================================

#[test]
fn attaches_bearer_for_regular_endpoints() {
    let nav = RecordingNavigator::default();
    let auth = AuthInterceptor::new(signed_in_session(), Rc::new(nav));
    let mut req = request("/accounts", false);
    auth.on_request(&mut req);
    assert_eq!(req.header("authorization"), Some("Bearer tok1"));
}

#[test]
fn never_attaches_bearer_to_auth_endpoints() {
    let auth = AuthInterceptor::new(signed_in_session(), Rc::new(RecordingNavigator::default()));
    let mut req = request("/auth/login", true);
    auth.on_request(&mut req);
    assert!(!req.has_header(HEADER_AUTHORIZATION));
}

#[test]
fn no_header_without_token() {
    let session = Rc::new(SessionStore::new(Box::new(MemoryStorage::new())));
    let auth = AuthInterceptor::new(session, Rc::new(RecordingNavigator::default()));
    let mut req = request("/accounts", false);
    auth.on_request(&mut req);
    assert!(req.headers.is_empty());
}

#[test]
fn unauthorized_clears_session_and_redirects_once() {
    let session = signed_in_session();
    let nav = RecordingNavigator::default();
    let auth = AuthInterceptor::new(Rc::clone(&session), Rc::new(nav.clone()));

    auth.on_response(&request("/dashboard", false), &failure(401));

    assert!(!session.is_authenticated());
    assert_eq!(nav.paths(), vec![LOGIN_ROUTE.to_owned()]);
}

#[test]
fn unauthorized_on_login_keeps_state() {
    let session = signed_in_session();
    let nav = RecordingNavigator::default();
    let auth = AuthInterceptor::new(Rc::clone(&session), Rc::new(nav.clone()));

    auth.on_response(&request("/auth/login", true), &failure(401));

    assert!(session.is_authenticated());
    assert!(nav.paths().is_empty());
}

#[test]
fn other_errors_pass_through() {
    let session = signed_in_session();
    let nav = RecordingNavigator::default();
    let auth = AuthInterceptor::new(Rc::clone(&session), Rc::new(nav.clone()));

    for status in [403, 404, 500] {
        auth.on_response(&request("/members", false), &failure(status));
    }

    assert!(session.is_authenticated());
    assert!(nav.paths().is_empty());
}

// =============================================================
// LoadingInterceptor
// =============================================================

#[test]
fn loading_tracks_request_lifetime() {
    let tracker = Rc::new(LoadingTracker::new());
    let loading = LoadingInterceptor::new(Rc::clone(&tracker));
    let mut req = request("/accounts", false);

    loading.on_request(&mut req);
    assert!(tracker.is_busy());
    loading.on_response(&req, &failure(500));
    assert!(!tracker.is_busy());
}

#[test]
fn skip_loading_header_bypasses_counter() {
    let tracker = Rc::new(LoadingTracker::new());
    let loading = LoadingInterceptor::new(Rc::clone(&tracker));
    let mut req = request("/notifications/unread-count", false);
    req.set_header(HEADER_SKIP_LOADING, "true");

    loading.on_request(&mut req);
    assert_eq!(tracker.pending(), 0);
    loading.on_response(&req, &Ok(HttpResponse { status: 200, body: String::new() }));
    assert_eq!(tracker.pending(), 0);
}
