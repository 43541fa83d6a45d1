//! Error taxonomy for every backend-facing operation.
//!
//! ERROR HANDLING
//! ==============
//! Read paths absorb these into empty results (see `catalog`); write and auth
//! paths hand them to the caller, who shows [`ApiError::user_message`].

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde_json::Value;

/// Errors produced by client operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Local form check failed; no request was sent.
    #[error("{0}")]
    Validation(String),

    /// No session, expired session, or the token refresh failed.
    #[error("not authenticated")]
    Unauthenticated,

    /// The backend refused the action for this account.
    #[error("forbidden: {}", .message.as_deref().unwrap_or("permission denied"))]
    Forbidden { message: Option<String> },

    /// The addressed resource does not exist.
    #[error("not found: {}", .message.as_deref().unwrap_or("resource not found"))]
    NotFound { message: Option<String> },

    /// Any other non-success status, including 400 business-rule rejections.
    #[error("request failed with status {status}: {}", .message.as_deref().unwrap_or("no details"))]
    Rejected { status: u16, message: Option<String> },

    /// No response was received.
    #[error("network error: {0}")]
    Network(String),

    /// A response arrived but its body was not the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a non-success response.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = server_message(body);
        match status {
            401 => Self::Unauthenticated,
            403 => Self::Forbidden { message },
            404 => Self::NotFound { message },
            _ => Self::Rejected { status, message },
        }
    }

    /// Stable code for structured logs.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "E_VALIDATION",
            Self::Unauthenticated => "E_UNAUTHENTICATED",
            Self::Forbidden { .. } => "E_FORBIDDEN",
            Self::NotFound { .. } => "E_NOT_FOUND",
            Self::Rejected { .. } => "E_REJECTED",
            Self::Network(_) => "E_NETWORK",
            Self::Decode(_) => "E_DECODE",
        }
    }

    /// The most specific text to show a person, falling back to `fallback`.
    ///
    /// Validation messages are always shown verbatim; backend statuses show
    /// the backend's own message when it sent one.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Forbidden { message } | Self::NotFound { message } | Self::Rejected { message, .. } => {
                message.clone().unwrap_or_else(|| fallback.to_owned())
            }
            Self::Unauthenticated | Self::Network(_) | Self::Decode(_) => fallback.to_owned(),
        }
    }
}

/// Pull the human-readable message out of a backend error body.
///
/// Checked in order: `error` as a string, `error.non_field_errors[0]`, the
/// first message of the first field inside `error`, `detail`, `message`.
#[must_use]
pub fn server_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    let object = json.as_object()?;

    if let Some(error) = object.get("error") {
        if let Some(text) = error.as_str() {
            return Some(text.to_owned());
        }
        if let Some(fields) = error.as_object() {
            if let Some(first) = fields.get("non_field_errors").and_then(first_text) {
                return Some(first);
            }
            if let Some(first) = fields.values().find_map(first_text) {
                return Some(first);
            }
        }
    }

    ["detail", "message"]
        .iter()
        .find_map(|key| object.get(*key).and_then(Value::as_str).map(str::to_owned))
}

fn first_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Array(items) => items.first().and_then(Value::as_str).map(str::to_owned),
        _ => None,
    }
}
