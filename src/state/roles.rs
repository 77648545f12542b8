//! Canonical role list derivation.
//!
//! DESIGN
//! ======
//! The backend has shipped role claims in three shapes: a `roles` array, a
//! single `role` string, or a Spring-style `authorities` list. Entries in the
//! arrays are sometimes bare strings and sometimes `{ id, name }` or
//! `{ authority }` objects. [`canonical_roles`] runs once when a profile is
//! deserialized and everything downstream reads the resulting `Vec<String>`.

#[cfg(test)]
#[path = "roles_test.rs"]
mod roles_test;

use serde::Deserialize;

/// Role assigned when the backend sends no claims at all.
pub const DEFAULT_ROLE: &str = "MEMBER";

/// Names that grant the administrative sections.
pub const ADMIN_ROLES: [&str; 2] = ["ADMIN", "ROLE_ADMIN"];

/// One entry of a `roles` or `authorities` array.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RoleEntry {
    Name(String),
    Named { name: String },
    Authority { authority: String },
}

impl RoleEntry {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Name(name) | Self::Named { name } => name,
            Self::Authority { authority } => authority,
        }
    }
}

/// The three legacy role shapes as they arrive on the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct RawRoles {
    #[serde(default)]
    pub roles: Option<Vec<RoleEntry>>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub authorities: Option<Vec<RoleEntry>>,
}

/// Collapse whichever shape is present into one ordered list of role names.
///
/// Precedence follows the order the shapes were introduced: a non-empty
/// `roles` array wins, then `role`, then `authorities`. Falls back to
/// `["MEMBER"]`.
#[must_use]
pub fn canonical_roles(raw: &RawRoles) -> Vec<String> {
    let from_entries = |entries: &Option<Vec<RoleEntry>>| -> Vec<String> {
        entries
            .iter()
            .flatten()
            .map(|e| e.as_str().trim())
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
            .collect()
    };

    let mut names = from_entries(&raw.roles);
    if names.is_empty() {
        if let Some(role) = raw.role.as_deref().map(str::trim).filter(|r| !r.is_empty()) {
            names.push(role.to_owned());
        }
    }
    if names.is_empty() {
        names = from_entries(&raw.authorities);
    }
    if names.is_empty() {
        names.push(DEFAULT_ROLE.to_owned());
    }
    names
}

#[must_use]
pub fn is_admin(roles: &[String]) -> bool {
    roles.iter().any(|r| ADMIN_ROLES.contains(&r.as_str()))
}

/// True if `roles` holds `role` either bare or with the `ROLE_` prefix.
#[must_use]
pub fn has_role(roles: &[String], role: &str) -> bool {
    let prefixed = format!("ROLE_{role}");
    roles.iter().any(|r| r == role || *r == prefixed)
}

#[must_use]
pub fn has_any_role(roles: &[String], wanted: &[&str]) -> bool {
    wanted.iter().any(|role| has_role(roles, role))
}
