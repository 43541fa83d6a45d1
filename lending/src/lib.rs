//! Client core for the library lending service.
//!
//! This crate owns everything both front ends (`client` in the browser and
//! `cli` in a terminal) share: the REST wire schema, the token store, the
//! authenticated HTTP client with its refresh-and-replay policy, the session
//! state machine, the route guard, and the typed catalog/loan facade.
//!
//! ARCHITECTURE
//! ============
//! Platform specifics enter through two seams only: [`transport::Transport`]
//! (how bytes reach the backend) and [`store::KeyValueStore`] (where tokens
//! persist). Everything else is plain Rust that runs natively under test.

pub mod auth;
pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod guard;
pub mod http;
pub mod loans;
pub mod session;
pub mod store;
pub mod transport;
pub mod types;

pub use client::LibraryClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use session::{SessionContext, SessionState};
pub use types::{Book, BorrowRecord, Role, User};

#[cfg(test)]
pub(crate) mod test_support;
