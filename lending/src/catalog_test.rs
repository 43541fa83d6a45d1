use super::*;
use crate::config::ClientConfig;
use crate::store::{MemoryStore, TokenStore};
use crate::test_support::{BASE, MockTransport, book, member, ok, path_of, status};
use crate::transport::Method;

fn signed_in(transport: MockTransport) -> LibraryClient<MockTransport> {
    let store = MemoryStore::new();
    TokenStore::new(store.clone()).save_login(&member(), "acc", "ref");
    LibraryClient::new(transport, ClientConfig::from_values(Some(BASE), None), store, None)
}

const TWO_BOOKS: &str = r#"[
    {"id":1,"title":"Dune","author":"Frank Herbert","available":true},
    {"id":2,"title":"Emma","author":"Jane Austen","available":false}
]"#;

const LOAN: &str = r#"{"id":7,"user":1,"book":1,"book_title":"Dune","username":"mia",
    "borrowed_at":"2025-03-01T10:00:00Z","returned_at":null}"#;

// =============================================================
// Reads
// =============================================================

#[tokio::test]
async fn books_decodes_list() {
    let c = signed_in(MockTransport::new(|_| ok(TWO_BOOKS)));
    let books = c.books().await;
    assert_eq!(books, vec![book(1, "Dune", "Frank Herbert", true), book(2, "Emma", "Jane Austen", false)]);
    assert_eq!(path_of(&c.transport().sent()[0]), BOOKS_PATH);
}

#[tokio::test]
async fn message_envelope_reads_as_empty() {
    let c = signed_in(MockTransport::new(|_| ok(r#"{"message":"No books available"}"#)));
    assert!(c.fetch_books().await.unwrap().is_empty());
}

#[tokio::test]
async fn network_failure_degrades_to_empty() {
    let c = signed_in(MockTransport::new(|_| Err(ApiError::Network("offline".into()))));
    assert!(c.books().await.is_empty());
    assert!(c.history().await.is_empty());
}

#[tokio::test]
async fn server_error_degrades_but_fetch_keeps_it() {
    let c = signed_in(MockTransport::new(|_| status(500, r#"{"error":"boom"}"#)));
    assert!(c.admin_books().await.is_empty());
    assert!(c.borrowed_books().await.is_empty());
    let err = c.fetch_admin_books().await.unwrap_err();
    assert_eq!(err, ApiError::Rejected { status: 500, message: Some("boom".into()) });
}

#[tokio::test]
async fn malformed_list_degrades() {
    let c = signed_in(MockTransport::new(|_| ok(r#"{"unexpected":true}"#)));
    assert!(c.books().await.is_empty());
    assert!(matches!(c.fetch_books().await, Err(ApiError::Decode(_))));
}

#[tokio::test]
async fn history_and_admin_loans_hit_their_endpoints() {
    let c = signed_in(MockTransport::new(|_| ok(&format!("[{LOAN}]"))));
    let history = c.history().await;
    let loans = c.borrowed_books().await;
    assert_eq!(history.len(), 1);
    assert!(history[0].is_active());
    assert_eq!(loans, history);

    let paths: Vec<String> = c.transport().sent().iter().map(|r| path_of(r).to_owned()).collect();
    assert_eq!(paths, vec![HISTORY_PATH, BORROWED_BOOKS_PATH]);
}

// =============================================================
// Writes
// =============================================================

#[tokio::test]
async fn add_book_posts_trimmed_draft() {
    let c = signed_in(MockTransport::new(|_| {
        ok(r#"{"books":[{"id":3,"title":"Dune","author":"Frank Herbert","available":true}]}"#)
    }));
    let created = c.add_book(&BookDraft::new(" Dune ", "Frank Herbert ")).await.unwrap();
    assert_eq!(created, vec![book(3, "Dune", "Frank Herbert", true)]);

    let sent = &c.transport().sent()[0];
    assert_eq!(sent.method, Method::Post);
    assert_eq!(path_of(sent), ADMIN_BOOKS_PATH);
    assert_eq!(sent.body, Some(serde_json::json!({"title":"Dune","author":"Frank Herbert"})));
}

#[tokio::test]
async fn add_books_sends_array() {
    let c = signed_in(MockTransport::new(|_| ok(&format!(r#"{{"books":{TWO_BOOKS}}}"#))));
    let drafts = [BookDraft::new("Dune", "Frank Herbert"), BookDraft::new("Emma", "Jane Austen")];
    assert_eq!(c.add_books(&drafts).await.unwrap().len(), 2);
    let body = c.transport().sent()[0].body.clone().unwrap();
    assert_eq!(body.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn invalid_draft_sends_nothing() {
    let c = signed_in(MockTransport::new(|_| ok("{}")));
    let err = c.add_book(&BookDraft::new("  ", "Someone")).await.unwrap_err();
    assert_eq!(err, ApiError::Validation("Title is required".into()));
    let err = c.update_book(1, &BookDraft::new("Dune", "")).await.unwrap_err();
    assert_eq!(err, ApiError::Validation("Author is required".into()));
    assert!(c.add_books(&[]).await.is_err());
    assert!(c.transport().sent().is_empty());
}

#[tokio::test]
async fn update_and_delete_address_the_book() {
    let c = signed_in(MockTransport::new(|req| match req.method {
        Method::Put => ok(r#"{"book":{"id":4,"title":"Emma","author":"Jane Austen","available":true}}"#),
        _ => status(204, ""),
    }));
    let updated = c.update_book(4, &BookDraft::new("Emma", "Jane Austen")).await.unwrap();
    assert_eq!(updated.id, 4);
    c.delete_book(4).await.unwrap();

    let sent = c.transport().sent();
    assert_eq!(path_of(&sent[0]), "/api/admin/books/4/");
    assert_eq!(sent[1].method, Method::Delete);
    assert_eq!(path_of(&sent[1]), "/api/admin/books/4/");
}

#[tokio::test]
async fn delete_surfaces_not_found() {
    let c = signed_in(MockTransport::new(|_| status(404, r#"{"error":"Book not found"}"#)));
    let err = c.delete_book(99).await.unwrap_err();
    assert_eq!(err.user_message("Failed to delete book"), "Book not found");
}

#[tokio::test]
async fn borrow_returns_receipt() {
    let c = signed_in(MockTransport::new(|_| {
        ok(&format!(r#"{{"message":"Book borrowed successfully","borrow_details":{LOAN}}}"#))
    }));
    let receipt = c.borrow_book(1).await.unwrap();
    assert_eq!(receipt.message, "Book borrowed successfully");
    assert_eq!(receipt.borrow_details.book, 1);
    assert_eq!(path_of(&c.transport().sent()[0]), "/api/books/1/borrow/");
}

#[tokio::test]
async fn borrow_refusal_surfaces_backend_message() {
    let c = signed_in(MockTransport::new(|_| status(400, r#"{"error":"You can only borrow up to 5 books"}"#)));
    let err = c.borrow_book(1).await.unwrap_err();
    assert_eq!(err.user_message("Failed to borrow book"), "You can only borrow up to 5 books");
}

#[tokio::test]
async fn return_posts_to_return_endpoint() {
    let c = signed_in(MockTransport::new(|_| {
        ok(&format!(r#"{{"message":"Book returned successfully","return_details":{LOAN}}}"#))
    }));
    c.return_book(1).await.unwrap();
    assert_eq!(path_of(&c.transport().sent()[0]), "/api/books/1/return/");
}

#[tokio::test]
async fn writes_carry_the_session_token() {
    let c = signed_in(MockTransport::new(|_| status(204, "")));
    c.delete_book(1).await.unwrap();
    assert_eq!(c.transport().sent()[0].bearer.as_deref(), Some("acc"));
}

// =============================================================
// Bulk input
// =============================================================

#[test]
fn bulk_parse_skips_blank_lines() {
    let drafts = parse_bulk_drafts("Dune | Frank Herbert\n\n  Emma|Jane Austen  \n").unwrap();
    assert_eq!(drafts, vec![BookDraft::new("Dune", "Frank Herbert"), BookDraft::new("Emma", "Jane Austen")]);
}

#[test]
fn bulk_parse_names_bad_line() {
    let err = parse_bulk_drafts("Dune | Frank Herbert\nno separator here").unwrap_err();
    assert_eq!(err, ApiError::Validation("Line 2: expected \"Title | Author\"".into()));

    let err = parse_bulk_drafts("\n | Jane Austen").unwrap_err();
    assert_eq!(err, ApiError::Validation("Line 2: Title is required".into()));
}

#[test]
fn bulk_parse_rejects_empty_input() {
    assert!(parse_bulk_drafts("  \n\n").is_err());
}
