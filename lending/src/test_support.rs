//! Scripted transport and fixtures shared by unit tests.

use std::cell::RefCell;

use crate::error::ApiError;
use crate::transport::{ApiRequest, ApiResponse, Transport};
use crate::types::{Book, BorrowRecord, Role, User};

pub const BASE: &str = "http://api.test";

type Handler = Box<dyn Fn(&ApiRequest) -> Result<ApiResponse, ApiError>>;

/// Answers each request through `handler` and records what was sent.
pub struct MockTransport {
    handler: Handler,
    sent: RefCell<Vec<ApiRequest>>,
    yield_before_reply: bool,
}

impl MockTransport {
    pub fn new(handler: impl Fn(&ApiRequest) -> Result<ApiResponse, ApiError> + 'static) -> Self {
        Self { handler: Box::new(handler), sent: RefCell::new(Vec::new()), yield_before_reply: false }
    }

    /// Suspend once per request so concurrent callers interleave.
    pub fn yielding(mut self) -> Self {
        self.yield_before_reply = true;
        self
    }

    pub fn sent(&self) -> Vec<ApiRequest> {
        self.sent.borrow().clone()
    }

    pub fn count_path(&self, path: &str) -> usize {
        self.sent.borrow().iter().filter(|req| req.url.ends_with(path)).count()
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        self.sent.borrow_mut().push(request.clone());
        if self.yield_before_reply {
            tokio::task::yield_now().await;
        }
        (self.handler)(request)
    }
}

pub fn ok(body: &str) -> Result<ApiResponse, ApiError> {
    Ok(ApiResponse::new(200, body))
}

pub fn status(code: u16, body: &str) -> Result<ApiResponse, ApiError> {
    Ok(ApiResponse::new(code, body))
}

pub fn path_of(request: &ApiRequest) -> &str {
    request.url.strip_prefix(BASE).unwrap_or(&request.url)
}

pub fn member() -> User {
    User { id: 1, username: "mia".into(), email: "mia@example.com".into(), role: Role::Member }
}

pub fn admin() -> User {
    User { id: 2, username: "ada".into(), email: "ada@example.com".into(), role: Role::Admin }
}

pub fn book(id: i64, title: &str, author: &str, available: bool) -> Book {
    Book { id, title: title.into(), author: author.into(), available }
}

pub fn loan(id: i64, book: i64, title: &str, borrowed_at: &str, returned_at: Option<&str>) -> BorrowRecord {
    BorrowRecord {
        id,
        user: 1,
        book,
        book_title: title.into(),
        username: "mia".into(),
        borrowed_at: borrowed_at.into(),
        returned_at: returned_at.map(str::to_owned),
    }
}
