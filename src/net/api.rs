//! Typed backend endpoints.
//!
//! Every call goes through [`ApiClient`], so bearer attachment, loading,
//! retry, and error normalization apply uniformly. Auth calls also update the
//! [`SessionStore`]: login stores the session, logout clears it whether or not
//! the backend answered.
//!
//! Login, register, and member mutations are sent once: a duplicate
//! registration or a double suspend is worse than a visible error.

#![allow(clippy::missing_errors_doc)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::rc::Rc;

use serde_json::{Value, json};

use super::client::{ApiClient, RequestOptions};
use super::error::ApiError;
use super::types::{
    Account, AdminPermissions, AuthResponse, DashboardData, LoginRequest, Member, MemberStats, MemberUpdate,
    NotificationCount, Page, RegisterPayload, RegisterRequest, RoleClaims, SavingsDepositRequest, SavingsGoal,
    SavingsGoalRequest, TransactionList, UserProfile,
};
use crate::state::session::SessionStore;

/// Kind of money movement under `/transactions/{kind}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
    Transfer,
}

impl TransactionKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdrawal => "withdrawal",
            Self::Transfer => "transfer",
        }
    }
}

/// Channel under `/transfers/{channel}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransferChannel {
    Internal,
    External,
    Mpesa,
}

impl TransferChannel {
    fn as_str(self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::External => "external",
            Self::Mpesa => "mpesa",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemberAction {
    Suspend,
    Activate,
}

/// Paging and search for member listings. Pages are zero-based.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberQuery {
    pub page: u32,
    pub size: u32,
    pub search: String,
}

impl Default for MemberQuery {
    fn default() -> Self {
        Self { page: 0, size: 10, search: String::new() }
    }
}

// =============================================================================
// PATHS
// =============================================================================

fn query_string(pairs: &[(&str, String)]) -> String {
    let mut ser = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        ser.append_pair(key, value);
    }
    ser.finish()
}

fn members_path(prefix: &str, query: &MemberQuery) -> String {
    let qs = query_string(&[
        ("page", query.page.to_string()),
        ("size", query.size.to_string()),
        ("search", query.search.trim().to_owned()),
    ]);
    format!("{prefix}/members?{qs}")
}

fn transactions_path(page: u32, limit: u32, account_id: Option<i64>) -> String {
    let mut pairs = vec![("page", page.to_string()), ("limit", limit.to_string())];
    if let Some(id) = account_id {
        pairs.push(("account_id", id.to_string()));
    }
    format!("/transactions?{}", query_string(&pairs))
}

fn path_segment(raw: &str) -> String {
    url::form_urlencoded::byte_serialize(raw.as_bytes()).collect()
}

fn member_path(member_number: &str) -> String {
    format!("/members/{}", path_segment(member_number))
}

fn member_action_path(member_number: &str, action: MemberAction) -> String {
    let verb = match action {
        MemberAction::Suspend => "suspend",
        MemberAction::Activate => "activate",
    };
    format!("{}/{verb}", member_path(member_number))
}

// =============================================================================
// API
// =============================================================================

#[derive(Clone)]
pub struct BankApi {
    client: ApiClient,
    session: Rc<SessionStore>,
}

impl BankApi {
    #[must_use]
    pub fn new(client: ApiClient, session: Rc<SessionStore>) -> Self {
        Self { client, session }
    }

    #[must_use]
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    // ---- auth ---------------------------------------------------------------

    /// Sign in and store the session.
    ///
    /// # Errors
    ///
    /// Returns the normalized failure; the session is left untouched.
    pub async fn login(&self, member_number: &str, password: &str) -> Result<UserProfile, ApiError> {
        let body = LoginRequest { member_number: member_number.trim().to_owned(), password: password.to_owned() };
        let resp: AuthResponse = self.client.post("/auth/login", &body, RequestOptions::once()).await?;
        log::info!("signed in as {}", resp.member.member_number);
        self.session.set_session(&resp.access_token, resp.member.clone());
        Ok(resp.member)
    }

    pub async fn register(&self, form: &RegisterRequest) -> Result<Value, ApiError> {
        let payload = RegisterPayload::from(form);
        self.client.post("/auth/register", &payload, RequestOptions::once()).await
    }

    /// Tell the backend, then clear local state regardless of the outcome.
    pub async fn logout(&self) {
        let result: Result<Value, ApiError> = self.client.post("/auth/logout", &json!({}), RequestOptions::once()).await;
        if let Err(err) = result {
            log::warn!("logout request failed, clearing locally: {err}");
        }
        self.session.clear();
    }

    pub async fn profile(&self) -> Result<UserProfile, ApiError> {
        self.client.get("/auth/profile", RequestOptions::default()).await
    }

    pub async fn update_profile(&self, update: &MemberUpdate) -> Result<UserProfile, ApiError> {
        self.client.put("/auth/profile", update, RequestOptions::default()).await
    }

    // ---- notifications ------------------------------------------------------

    /// Unread notification count for the header badge. Background request;
    /// any failure reads as zero.
    pub async fn unread_notification_count(&self) -> u64 {
        match self
            .client
            .get::<NotificationCount>("/notifications/unread-count", RequestOptions::background())
            .await
        {
            Ok(resp) => resp.count,
            Err(err) => {
                log::warn!("unread count unavailable: {err}");
                0
            }
        }
    }

    pub async fn notifications(&self) -> Result<Vec<Value>, ApiError> {
        self.client.get("/notifications", RequestOptions::default()).await
    }

    pub async fn mark_notification_read(&self, id: i64) -> Result<Value, ApiError> {
        self.client.put(&format!("/notifications/{id}/read"), &json!({}), RequestOptions::default()).await
    }

    pub async fn mark_all_notifications_read(&self) -> Result<Value, ApiError> {
        self.client.put("/notifications/mark-all-read", &json!({}), RequestOptions::default()).await
    }

    // ---- accounts & transactions --------------------------------------------

    pub async fn accounts(&self) -> Result<Vec<Account>, ApiError> {
        self.client.get("/accounts", RequestOptions::default()).await
    }

    pub async fn account(&self, id: i64) -> Result<Account, ApiError> {
        self.client.get(&format!("/accounts/{id}"), RequestOptions::default()).await
    }

    pub async fn create_account(&self, body: &Value) -> Result<Account, ApiError> {
        self.client.post("/accounts", body, RequestOptions::default()).await
    }

    pub async fn transactions(&self, page: u32, limit: u32, account_id: Option<i64>) -> Result<TransactionList, ApiError> {
        self.client.get(&transactions_path(page, limit, account_id), RequestOptions::default()).await
    }

    pub async fn create_transaction(&self, body: &Value) -> Result<Value, ApiError> {
        self.client.post("/transactions", body, RequestOptions::default()).await
    }

    pub async fn post_transaction(&self, kind: TransactionKind, body: &Value) -> Result<Value, ApiError> {
        self.client.post(&format!("/transactions/{}", kind.as_str()), body, RequestOptions::default()).await
    }

    pub async fn transfer(&self, channel: TransferChannel, body: &Value) -> Result<Value, ApiError> {
        self.client.post(&format!("/transfers/{}", channel.as_str()), body, RequestOptions::default()).await
    }

    // ---- loans --------------------------------------------------------------

    pub async fn loans(&self) -> Result<Vec<Value>, ApiError> {
        self.client.get("/loans", RequestOptions::default()).await
    }

    pub async fn loan_types(&self) -> Result<Vec<Value>, ApiError> {
        self.client.get("/loans/types", RequestOptions::default()).await
    }

    pub async fn apply_for_loan(&self, body: &Value) -> Result<Value, ApiError> {
        self.client.post("/loans/apply", body, RequestOptions::default()).await
    }

    // ---- dashboard ----------------------------------------------------------

    pub async fn dashboard(&self) -> Result<DashboardData, ApiError> {
        self.client.get("/dashboard", RequestOptions::default()).await
    }

    /// Backend view of the caller's roles, read from the dashboard payload.
    pub async fn role_claims(&self) -> Result<RoleClaims, ApiError> {
        self.client.get("/dashboard", RequestOptions::default()).await
    }

    pub async fn dashboard_stats(&self) -> Result<Value, ApiError> {
        self.client.get("/dashboard/stats", RequestOptions::default()).await
    }

    pub async fn health(&self) -> Result<Value, ApiError> {
        self.client.get("/health", RequestOptions::default()).await
    }

    // ---- savings ------------------------------------------------------------

    pub async fn savings_goals(&self) -> Result<Vec<SavingsGoal>, ApiError> {
        self.client.get("/savings/goals", RequestOptions::default()).await
    }

    pub async fn savings_goal(&self, id: i64) -> Result<SavingsGoal, ApiError> {
        self.client.get(&format!("/savings/goals/{id}"), RequestOptions::default()).await
    }

    pub async fn create_savings_goal(&self, goal: &SavingsGoalRequest) -> Result<SavingsGoal, ApiError> {
        self.client.post("/savings/goals", goal, RequestOptions::default()).await
    }

    pub async fn update_savings_goal(&self, id: i64, goal: &SavingsGoalRequest) -> Result<SavingsGoal, ApiError> {
        self.client.put(&format!("/savings/goals/{id}"), goal, RequestOptions::default()).await
    }

    pub async fn delete_savings_goal(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete::<Value>(&format!("/savings/goals/{id}"), RequestOptions::default()).await?;
        Ok(())
    }

    pub async fn savings_deposit(&self, deposit: &SavingsDepositRequest) -> Result<Value, ApiError> {
        self.client.post("/savings/deposit", deposit, RequestOptions::default()).await
    }

    pub async fn savings_summary(&self) -> Result<Value, ApiError> {
        self.client.get("/savings/summary", RequestOptions::default()).await
    }

    pub async fn savings_transactions(&self, page: u32, limit: u32) -> Result<Value, ApiError> {
        let path = format!(
            "/savings/transactions?{}",
            query_string(&[("page", page.to_string()), ("limit", limit.to_string())])
        );
        self.client.get(&path, RequestOptions::default()).await
    }

    // ---- members ------------------------------------------------------------

    pub async fn members(&self, query: &MemberQuery) -> Result<Page<Member>, ApiError> {
        self.client.get(&members_path("", query), RequestOptions::default()).await
    }

    pub async fn member_stats(&self) -> Result<MemberStats, ApiError> {
        self.client.get("/members/stats", RequestOptions::default()).await
    }

    pub async fn total_savings(&self) -> Result<f64, ApiError> {
        self.client.get("/members/total-savings", RequestOptions::default()).await
    }

    pub async fn member(&self, member_number: &str) -> Result<Member, ApiError> {
        self.client.get(&member_path(member_number), RequestOptions::default()).await
    }

    pub async fn update_member(&self, member_number: &str, update: &MemberUpdate) -> Result<Member, ApiError> {
        self.client.put(&member_path(member_number), update, RequestOptions::once()).await
    }

    pub async fn set_member_status(&self, member_number: &str, action: MemberAction) -> Result<Member, ApiError> {
        self.client
            .patch(&member_action_path(member_number, action), Some(&json!({})), RequestOptions::once())
            .await
    }

    pub async fn delete_member(&self, member_number: &str) -> Result<(), ApiError> {
        self.client.delete::<Value>(&member_path(member_number), RequestOptions::once()).await?;
        Ok(())
    }

    // ---- admin --------------------------------------------------------------

    pub async fn create_admin(&self, form: &RegisterRequest) -> Result<Member, ApiError> {
        self.client.post("/admin/create-admin", &RegisterPayload::from(form), RequestOptions::once()).await
    }

    pub async fn promote_to_admin(&self, member_number: &str) -> Result<Member, ApiError> {
        self.client
            .post(&format!("/admin/promote-to-admin/{}", path_segment(member_number)), &json!({}), RequestOptions::once())
            .await
    }

    pub async fn demote_to_member(&self, member_number: &str) -> Result<Member, ApiError> {
        self.client
            .post(&format!("/admin/demote-to-member/{}", path_segment(member_number)), &json!({}), RequestOptions::once())
            .await
    }

    pub async fn admin_members(&self, query: &MemberQuery) -> Result<Page<Member>, ApiError> {
        self.client.get(&members_path("/admin", query), RequestOptions::default()).await
    }

    pub async fn admin_permissions(&self) -> Result<AdminPermissions, ApiError> {
        self.client.get("/admin/permissions", RequestOptions::default()).await
    }
}
