use super::*;
use crate::config::AppConfig;
use crate::net::error::ErrorKind;
use crate::net::http::{HEADER_AUTHORIZATION, HEADER_SKIP_LOADING, Method};
use crate::net::interceptor::AuthInterceptor;
use crate::testing::{RecordingNavigator, RecordingTimer, ScriptedTransport};
use crate::util::storage::MemoryStorage;
use futures::executor::block_on;
use serde_json::json;

struct Harness {
    api: BankApi,
    transport: ScriptedTransport,
    session: Rc<SessionStore>,
}

fn harness() -> Harness {
    let config = AppConfig { api_url: "http://api.test".to_owned(), max_retry_attempts: 2, ..AppConfig::default() };
    let transport = ScriptedTransport::new();
    let session = Rc::new(SessionStore::new(Box::new(MemoryStorage::new())));
    let client = ApiClient::new(&config, Rc::new(transport.clone()), Rc::new(RecordingTimer::default()))
        .with_interceptor(Rc::new(AuthInterceptor::new(Rc::clone(&session), Rc::new(RecordingNavigator::default()))));
    Harness { api: BankApi::new(client, Rc::clone(&session)), transport, session }
}

fn login_response() -> serde_json::Value {
    json!({
        "accessToken": "tok1",
        "tokenType": "bearer",
        "member": {
            "id": 7,
            "memberNumber": "MB1001",
            "firstName": "Jane",
            "lastName": "Wanjiru",
            "email": "jane@example.test",
            "role": "MEMBER"
        }
    })
}

// =============================================================
// Paths
// =============================================================

#[test]
fn members_path_encodes_search() {
    let query = MemberQuery { page: 2, size: 25, search: " jane doe&x ".to_owned() };
    assert_eq!(members_path("", &query), "/members?page=2&size=25&search=jane+doe%26x");
    assert_eq!(members_path("/admin", &MemberQuery::default()), "/admin/members?page=0&size=10&search=");
}

#[test]
fn transactions_path_adds_account_filter() {
    assert_eq!(transactions_path(1, 10, None), "/transactions?page=1&limit=10");
    assert_eq!(transactions_path(3, 5, Some(42)), "/transactions?page=3&limit=5&account_id=42");
}

#[test]
fn member_action_paths() {
    assert_eq!(member_action_path("MB1001", MemberAction::Suspend), "/members/MB1001/suspend");
    assert_eq!(member_action_path("MB1001", MemberAction::Activate), "/members/MB1001/activate");
    assert_eq!(member_path("MB 9/1"), "/members/MB+9%2F1");
}

// =============================================================
// Auth
// =============================================================

#[test]
fn login_stores_session() {
    let h = harness();
    h.transport.respond(200, login_response());

    let user = block_on(h.api.login(" MB1001 ", "secret")).unwrap();

    assert_eq!(user.member_number, "MB1001");
    assert_eq!(user.roles, vec!["MEMBER".to_owned()]);
    assert_eq!(h.session.token().as_deref(), Some("tok1"));
    let sent = &h.transport.requests()[0];
    assert!(!sent.has_header(HEADER_AUTHORIZATION));
    let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({"memberNumber": "MB1001", "password": "secret"}));
}

#[test]
fn failed_login_is_not_retried_and_keeps_session_empty() {
    let h = harness();
    h.transport.respond(500, json!({}));

    let err = block_on(h.api.login("MB1001", "secret")).unwrap_err();

    assert_eq!(err.kind, ErrorKind::Server);
    assert_eq!(h.transport.request_count(), 1);
    assert!(!h.session.is_authenticated());
}

#[test]
fn register_sends_backend_payload() {
    let h = harness();
    let form = RegisterRequest {
        national_id: Some("  ".to_owned()),
        first_name: "Jane".to_owned(),
        last_name: "Wanjiru".to_owned(),
        email: "jane@example.test".to_owned(),
        phone_number: "0712345678".to_owned(),
        password: "secret".to_owned(),
    };

    block_on(h.api.register(&form)).unwrap();

    let sent = &h.transport.requests()[0];
    assert!(sent.is_auth_endpoint);
    let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
    assert_eq!(body["full_name"], "Jane Wanjiru");
    assert_eq!(body["firstName"], "Jane");
    assert!(body.get("nationalId").is_none());
}

#[test]
fn logout_clears_even_when_backend_fails() {
    let h = harness();
    h.session.set_session("tok1", UserProfile::default());
    h.transport.respond(500, json!({}));

    block_on(h.api.logout());

    assert!(!h.session.is_authenticated());
    assert_eq!(h.transport.request_count(), 1);
    assert_eq!(h.transport.requests()[0].header(HEADER_AUTHORIZATION), Some("Bearer tok1"));
}

// =============================================================
// Notifications
// =============================================================

#[test]
fn unread_count_reads_backend_value() {
    let h = harness();
    h.transport.respond(200, json!({"count": 4}));

    assert_eq!(block_on(h.api.unread_notification_count()), 4);
    assert!(h.transport.requests()[0].has_header(HEADER_SKIP_LOADING));
}

#[test]
fn unread_count_defaults_to_zero() {
    let h = harness();
    h.transport.respond(404, json!({}));
    assert_eq!(block_on(h.api.unread_notification_count()), 0);

    h.transport.respond(500, json!({})).respond(500, json!({})).respond(500, json!({}));
    assert_eq!(block_on(h.api.unread_notification_count()), 0);
}

// =============================================================
// Members & dashboard
// =============================================================

#[test]
fn member_status_change_is_single_patch() {
    let h = harness();
    h.transport.respond(500, json!({}));

    let err = block_on(h.api.set_member_status("MB1002", MemberAction::Suspend)).unwrap_err();

    assert_eq!(err.kind, ErrorKind::Server);
    let sent = h.transport.requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, Method::Patch);
    assert_eq!(sent[0].url, "http://api.test/members/MB1002/suspend");
}

#[test]
fn members_page_decodes() {
    let h = harness();
    h.transport.respond(
        200,
        json!({
            "content": [{"id": 1, "memberNumber": "MB1002", "firstName": "Otieno", "lastName": "K", "status": "SUSPENDED"}],
            "totalElements": 1,
            "totalPages": 1,
            "number": 0
        }),
    );

    let page = block_on(h.api.members(&MemberQuery::default())).unwrap();

    assert_eq!(page.total_elements, 1);
    assert_eq!(page.content[0].full_name(), "Otieno K");
    assert_eq!(page.content[0].status, crate::net::types::MemberStatus::Suspended);
}

#[test]
fn role_claims_come_from_dashboard() {
    let h = harness();
    h.transport.respond(200, json!({"total_balance": 10.0, "roles": ["ROLE_ADMIN"]}));

    let claims = block_on(h.api.role_claims()).unwrap();

    assert_eq!(claims.roles, vec!["ROLE_ADMIN".to_owned()]);
    assert!(h.transport.requests()[0].url.ends_with("/dashboard"));
}
