//! Wire types shared with the lending REST backend.
//!
//! Field names follow the backend's JSON exactly; the backend owns every
//! record here and the client only ever holds read-through copies.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Account role. Closed set: every role check matches on this exhaustively.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Member,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }

    /// Human label used in navigation chrome.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Admin => "Administrator",
            Self::Member => "Member",
        }
    }

    /// Parse the lowercase wire form.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "admin" => Some(Self::Admin),
            "member" => Some(Self::Member),
            _ => None,
        }
    }
}

/// Authenticated account profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub role: Role,
}

/// Catalog entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub available: bool,
}

/// A single checkout. `returned_at` is `None` while the loan is active.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowRecord {
    pub id: i64,
    pub user: i64,
    pub book: i64,
    pub book_title: String,
    pub username: String,
    pub borrowed_at: String,
    pub returned_at: Option<String>,
}

impl BorrowRecord {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.returned_at.is_none()
    }
}

// =============================================================================
// AUTH PAYLOADS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegisterCredentials {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// `POST /auth/login/` success body: tokens plus the flattened profile.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub role: Role,
}

impl LoginResponse {
    #[must_use]
    pub fn user(&self) -> User {
        User {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// `POST /auth/token/refresh/` body. `refresh` is only present when the
/// backend rotates refresh tokens.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub(crate) struct RefreshResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

// =============================================================================
// CATALOG PAYLOADS
// =============================================================================

/// Title/author pair sent when creating or editing a book.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
}

impl BookDraft {
    #[must_use]
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self { title: title.into(), author: author.into() }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct AddBooksResponse {
    pub books: Vec<Book>,
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct UpdateBookResponse {
    pub book: Book,
}

/// Backend confirmation for a borrow.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct BorrowReceipt {
    pub message: String,
    pub borrow_details: BorrowRecord,
}

/// Backend confirmation for a return.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ReturnReceipt {
    pub message: String,
    pub return_details: BorrowRecord,
}

/// List endpoints answer `{"message": "..."}` instead of `[]` when empty.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListBody<T> {
    Items(Vec<T>),
    Message {
        #[allow(dead_code)]
        message: String,
    },
}

impl<T> ListBody<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Items(items) => items,
            Self::Message { .. } => Vec::new(),
        }
    }
}
