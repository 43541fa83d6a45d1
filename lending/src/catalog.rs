//! Typed catalog and loan operations.
//!
//! ERROR HANDLING
//! ==============
//! Reads degrade: `books`, `admin_books`, `borrowed_books` and `history`
//! log the failure and return an empty list so a listing page can always
//! render its "nothing here" state. The `fetch_*` variants keep the error for
//! callers that need to tell "empty" from "failed" (the CLI does).
//!
//! Writes surface: every mutation returns `Result` and drafts are validated
//! locally before anything is sent.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use crate::client::LibraryClient;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{
    AddBooksResponse, Book, BookDraft, BorrowReceipt, BorrowRecord, ListBody, ReturnReceipt, UpdateBookResponse,
};

pub const BOOKS_PATH: &str = "/api/books/";
pub const HISTORY_PATH: &str = "/api/books/history/";
pub const ADMIN_BOOKS_PATH: &str = "/api/admin/books/";
pub const BORROWED_BOOKS_PATH: &str = "/api/admin/borrowed-books/";

/// Separator between title and author in bulk-add input.
pub const BULK_SEPARATOR: char = '|';

fn admin_book_path(id: i64) -> String {
    format!("{ADMIN_BOOKS_PATH}{id}/")
}

fn borrow_path(id: i64) -> String {
    format!("{BOOKS_PATH}{id}/borrow/")
}

fn return_path(id: i64) -> String {
    format!("{BOOKS_PATH}{id}/return/")
}

// =============================================================================
// DRAFT VALIDATION
// =============================================================================

/// Trim and require both fields.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] naming the first missing field.
pub fn validate_draft(draft: &BookDraft) -> Result<BookDraft, ApiError> {
    let title = draft.title.trim();
    let author = draft.author.trim();
    if title.is_empty() {
        return Err(ApiError::Validation("Title is required".into()));
    }
    if author.is_empty() {
        return Err(ApiError::Validation("Author is required".into()));
    }
    Ok(BookDraft::new(title, author))
}

/// Parse bulk-add input: one `Title | Author` per line, blank lines skipped.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] naming the first bad line (1-based), or
/// when no line holds a book.
pub fn parse_bulk_drafts(input: &str) -> Result<Vec<BookDraft>, ApiError> {
    let mut drafts = Vec::new();
    for (index, line) in input.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = index + 1;
        let Some((title, author)) = line.split_once(BULK_SEPARATOR) else {
            return Err(ApiError::Validation(format!("Line {line_no}: expected \"Title | Author\"")));
        };
        let draft = validate_draft(&BookDraft::new(title, author))
            .map_err(|err| ApiError::Validation(format!("Line {line_no}: {}", err.user_message(""))))?;
        drafts.push(draft);
    }
    if drafts.is_empty() {
        return Err(ApiError::Validation("Enter at least one book".into()));
    }
    Ok(drafts)
}

fn degrade<T>(what: &str, result: Result<Vec<T>, ApiError>) -> Vec<T> {
    result.unwrap_or_else(|err| {
        tracing::warn!(list = what, code = err.code(), error = %err, "list request failed; showing empty list");
        Vec::new()
    })
}

impl<T: Transport> LibraryClient<T> {
    // =========================================================================
    // READS
    // =========================================================================

    /// # Errors
    ///
    /// Returns the transport, status or decode error.
    pub async fn fetch_books(&self) -> Result<Vec<Book>, ApiError> {
        self.fetch_list(BOOKS_PATH).await
    }

    /// # Errors
    ///
    /// See [`LibraryClient::fetch_books`].
    pub async fn fetch_admin_books(&self) -> Result<Vec<Book>, ApiError> {
        self.fetch_list(ADMIN_BOOKS_PATH).await
    }

    /// # Errors
    ///
    /// See [`LibraryClient::fetch_books`].
    pub async fn fetch_borrowed_books(&self) -> Result<Vec<BorrowRecord>, ApiError> {
        self.fetch_list(BORROWED_BOOKS_PATH).await
    }

    /// # Errors
    ///
    /// See [`LibraryClient::fetch_books`].
    pub async fn fetch_history(&self) -> Result<Vec<BorrowRecord>, ApiError> {
        self.fetch_list(HISTORY_PATH).await
    }

    /// Member catalog. Empty on any failure.
    pub async fn books(&self) -> Vec<Book> {
        degrade("books", self.fetch_books().await)
    }

    /// Full catalog including unavailable books. Empty on any failure.
    pub async fn admin_books(&self) -> Vec<Book> {
        degrade("admin_books", self.fetch_admin_books().await)
    }

    /// Active loans across all members. Empty on any failure.
    pub async fn borrowed_books(&self) -> Vec<BorrowRecord> {
        degrade("borrowed_books", self.fetch_borrowed_books().await)
    }

    /// The caller's own loans, active and returned. Empty on any failure.
    pub async fn history(&self) -> Vec<BorrowRecord> {
        degrade("history", self.fetch_history().await)
    }

    async fn fetch_list<R: serde::de::DeserializeOwned>(&self, path: &str) -> Result<Vec<R>, ApiError> {
        let body: ListBody<R> = self.http.get_json(path).await?;
        Ok(body.into_vec())
    }

    // =========================================================================
    // WRITES
    // =========================================================================

    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for a bad draft, else the backend error.
    pub async fn add_book(&self, draft: &BookDraft) -> Result<Vec<Book>, ApiError> {
        let draft = validate_draft(draft)?;
        let created: AddBooksResponse = self.http.post_json(ADMIN_BOOKS_PATH, &draft).await?;
        tracing::info!(count = created.books.len(), "book added");
        Ok(created.books)
    }

    /// Add several books in one request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if any draft is bad (nothing is sent),
    /// else the backend error.
    pub async fn add_books(&self, drafts: &[BookDraft]) -> Result<Vec<Book>, ApiError> {
        if drafts.is_empty() {
            return Err(ApiError::Validation("Enter at least one book".into()));
        }
        let drafts = drafts.iter().map(validate_draft).collect::<Result<Vec<_>, _>>()?;
        let created: AddBooksResponse = self.http.post_json(ADMIN_BOOKS_PATH, &drafts).await?;
        tracing::info!(count = created.books.len(), "books added");
        Ok(created.books)
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for a bad draft, else the backend error.
    pub async fn update_book(&self, id: i64, draft: &BookDraft) -> Result<Book, ApiError> {
        let draft = validate_draft(draft)?;
        let updated: UpdateBookResponse = self.http.put_json(&admin_book_path(id), &draft).await?;
        Ok(updated.book)
    }

    /// # Errors
    ///
    /// Returns the backend error, e.g. [`ApiError::NotFound`].
    pub async fn delete_book(&self, id: i64) -> Result<(), ApiError> {
        self.http.delete(&admin_book_path(id)).await?;
        tracing::info!(book_id = id, "book deleted");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns the backend's refusal (book unavailable, loan limit) or a
    /// transport error.
    pub async fn borrow_book(&self, id: i64) -> Result<BorrowReceipt, ApiError> {
        self.http.post_json(&borrow_path(id), &serde_json::json!({})).await
    }

    /// # Errors
    ///
    /// See [`LibraryClient::borrow_book`].
    pub async fn return_book(&self, id: i64) -> Result<ReturnReceipt, ApiError> {
        self.http.post_json(&return_path(id), &serde_json::json!({})).await
    }
}
