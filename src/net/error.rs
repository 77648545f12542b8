//! Normalized request failures.
//!
//! ERROR HANDLING
//! ==============
//! Every failed request is turned into exactly one [`ApiError`] at the client
//! boundary. Callers match on [`ErrorKind`] and show `message` to the user;
//! the original cause stays available in `raw` for logging.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use std::time::Duration;

use serde_json::Value;

use super::http::TransportError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Network,
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    Validation,
    RateLimited,
    Server,
    Unknown,
}

impl ErrorKind {
    /// Map an HTTP status to its kind. Only 500 counts as `Server`; other 5xx
    /// fall into `Unknown`.
    #[must_use]
    pub fn from_status(status: u16) -> Self {
        match status {
            0 => Self::Network,
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            409 => Self::Conflict,
            422 => Self::Validation,
            429 => Self::RateLimited,
            500 => Self::Server,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::BadRequest => "bad-request",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not-found",
            Self::Conflict => "conflict",
            Self::Validation => "validation",
            Self::RateLimited => "rate-limited",
            Self::Server => "server",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whatever actually went wrong, before normalization.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RequestFailure {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("HTTP {status}")]
    Status { status: u16, body: String },
    #[error("timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
    #[error("could not encode request: {0}")]
    Encode(String),
    #[error("could not decode response: {0}")]
    Decode(String),
    #[error("request cancelled")]
    Cancelled,
}

impl RequestFailure {
    /// HTTP status if the server answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
    pub raw: RequestFailure,
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.raw.status()
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.kind == ErrorKind::Unauthorized
    }
}

impl From<RequestFailure> for ApiError {
    fn from(raw: RequestFailure) -> Self {
        normalize(raw)
    }
}

/// Translate a failure into its normalized form.
#[must_use]
pub fn normalize(raw: RequestFailure) -> ApiError {
    let (kind, message) = match &raw {
        RequestFailure::Status { status, body } => (ErrorKind::from_status(*status), status_message(*status, body)),
        RequestFailure::Transport(TransportError::Network(msg)) => {
            (ErrorKind::Network, format!("Unable to connect to server: {msg}"))
        }
        RequestFailure::Transport(TransportError::InvalidRequest(msg)) => {
            (ErrorKind::Unknown, format!("Client Error: {msg}"))
        }
        RequestFailure::Timeout(after) => (
            ErrorKind::Network,
            format!("Request timed out after {}ms. Please check your connection.", after.as_millis()),
        ),
        RequestFailure::Encode(msg) => (ErrorKind::Unknown, format!("Client Error: {msg}")),
        RequestFailure::Decode(msg) => (ErrorKind::Unknown, format!("Unexpected response from server: {msg}")),
        RequestFailure::Cancelled => (ErrorKind::Network, "Request cancelled.".to_owned()),
    };
    ApiError { kind, message, raw }
}

fn status_message(status: u16, body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let detail = parsed.as_ref().and_then(detail_or_message);

    match status {
        0 => "Unable to connect to server. Please check your internet connection.".to_owned(),
        400 => detail.unwrap_or_else(|| "Bad request. Please check your input.".to_owned()),
        401 => "Invalid credentials or session expired.".to_owned(),
        403 => "Access denied. You do not have permission to perform this action.".to_owned(),
        404 => "The requested resource was not found.".to_owned(),
        409 => detail.unwrap_or_else(|| "Member number or email already exists.".to_owned()),
        422 => parsed
            .as_ref()
            .and_then(validation_messages)
            .unwrap_or_else(|| "Validation failed. Please check your input.".to_owned()),
        429 => "Too many requests. Please try again later.".to_owned(),
        500 => "Server error. Please try again later.".to_owned(),
        _ => detail.unwrap_or_else(|| format!("Server Error: {status}")),
    }
}

/// `detail` (when it is a string) or `message` from an error body.
fn detail_or_message(body: &Value) -> Option<String> {
    ["detail", "message"]
        .iter()
        .filter_map(|key| body.get(key).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_owned)
}

/// Join per-field `detail[].msg` entries with `", "`; a string `detail` is
/// used as-is.
fn validation_messages(body: &Value) -> Option<String> {
    match body.get("detail")? {
        Value::Array(items) => {
            let joined = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join(", ");
            (!joined.is_empty()).then_some(joined)
        }
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}
