//! REST DTOs for the banking backend.
//!
//! DESIGN
//! ======
//! The backend mixes `camelCase` (auth, members, savings) with `snake_case`
//! (accounts, transactions, dashboard). Each type follows what its endpoint
//! actually sends; aliases cover the places the backend changed spelling.
//! Role claims are normalized while a [`UserProfile`] is deserialized, never
//! later.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Deserializer, Serialize};

use crate::state::roles::{self, RawRoles};

// =============================================================================
// AUTH
// =============================================================================

/// Authenticated member as returned by login and stored in durable storage.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawUserProfile", rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub member_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Canonical role names, see [`roles::canonical_roles`].
    pub roles: Vec<String>,
}

impl UserProfile {
    /// Human-readable name, falling back to the member number.
    #[must_use]
    pub fn display_name(&self) -> String {
        let joined = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let joined = joined.trim();
        if !joined.is_empty() {
            return joined.to_owned();
        }
        match self.full_name.as_deref().map(str::trim) {
            Some(full) if !full.is_empty() => full.to_owned(),
            _ => self.member_number.clone(),
        }
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        roles::is_admin(&self.roles)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUserProfile {
    #[serde(default)]
    id: Option<i64>,
    #[serde(default, alias = "member_number")]
    member_number: String,
    #[serde(default, alias = "first_name")]
    first_name: String,
    #[serde(default, alias = "last_name")]
    last_name: String,
    #[serde(default)]
    email: String,
    #[serde(default, alias = "phone_number")]
    phone_number: Option<String>,
    #[serde(default, alias = "full_name")]
    full_name: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(flatten)]
    roles: RawRoles,
}

impl From<RawUserProfile> for UserProfile {
    fn from(raw: RawUserProfile) -> Self {
        let roles = roles::canonical_roles(&raw.roles);
        Self {
            id: raw.id,
            member_number: raw.member_number,
            first_name: raw.first_name,
            last_name: raw.last_name,
            email: raw.email,
            phone_number: raw.phone_number,
            full_name: raw.full_name,
            status: raw.status,
            roles,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub member_number: String,
    pub password: String,
}

/// Registration form input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterRequest {
    pub national_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
}

/// Body the backend expects on `POST /auth/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub national_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
    #[serde(rename = "full_name")]
    pub full_name: String,
}

impl From<&RegisterRequest> for RegisterPayload {
    fn from(req: &RegisterRequest) -> Self {
        Self {
            national_id: req.national_id.clone().filter(|id| !id.trim().is_empty()),
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            email: req.email.clone(),
            phone_number: req.phone_number.clone(),
            password: req.password.clone(),
            full_name: format!("{} {}", req.first_name, req.last_name),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(alias = "access_token")]
    pub access_token: String,
    #[serde(default, alias = "token_type")]
    pub token_type: Option<String>,
    #[serde(alias = "user")]
    pub member: UserProfile,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct NotificationCount {
    pub count: u64,
}

/// Backend role claims used by the admin guard.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct RoleClaims {
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminPermissions {
    #[serde(default)]
    pub can_manage_members: bool,
    #[serde(default)]
    pub can_create_admin: bool,
}

// =============================================================================
// ACCOUNTS & TRANSACTIONS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Account {
    #[serde(deserialize_with = "deserialize_id_string")]
    pub id: String,
    #[serde(default)]
    pub account_type: String,
    #[serde(default)]
    pub account_number: String,
    #[serde(default)]
    pub balance: f64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(deserialize_with = "deserialize_id_string")]
    pub id: String,
    pub transaction_type: String,
    #[serde(default)]
    pub description: String,
    pub amount: f64,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub account_id: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Transaction listing; the backend has used `items`, `data`, and
/// `transactions` for the array.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TransactionList {
    #[serde(default, alias = "data", alias = "transactions")]
    pub items: Vec<Transaction>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct DashboardData {
    #[serde(default)]
    pub total_balance: Option<f64>,
    #[serde(default)]
    pub account_count: Option<u32>,
    #[serde(default)]
    pub monthly_income: Option<f64>,
    #[serde(default)]
    pub monthly_expenses: Option<f64>,
    #[serde(default)]
    pub savings_growth: Option<f64>,
    #[serde(default)]
    pub recent_transactions: Vec<Transaction>,
    #[serde(default)]
    pub roles: Vec<String>,
}

// =============================================================================
// SAVINGS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoalRequest {
    pub goal_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub target_amount: f64,
    pub target_date: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub id: i64,
    pub goal_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub target_amount: f64,
    #[serde(default)]
    pub current_amount: f64,
    pub target_date: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub progress_percentage: f64,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsDepositRequest {
    pub from_account_number: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings_goal_id: Option<i64>,
}

// =============================================================================
// MEMBERS
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberStatus {
    Active,
    Inactive,
    Suspended,
    Pending,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: i64,
    pub member_number: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub status: MemberStatus,
    #[serde(default)]
    pub date_joined: Option<String>,
    #[serde(default)]
    pub total_savings: f64,
    #[serde(default)]
    pub loan_balance: f64,
    #[serde(default)]
    pub savings_balance: f64,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Member {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_owned()
    }
}

/// Partial member update for `PUT /members/{memberNumber}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physical_address: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberStats {
    pub total_members: u64,
    pub active_members: u64,
    #[serde(default)]
    pub new_members: Option<u64>,
}

/// Spring-style page wrapper.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
    pub number: u32,
}

fn deserialize_id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as _;

    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("expected string or number id, got {other}"))),
    }
}
