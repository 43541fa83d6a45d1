//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (fetching through the shared
//! `Library`, toasts for write outcomes) and delegates shared chrome to
//! `components`. Derived views come from `lending::loans` so the CLI renders
//! the same labels and orderings.

pub mod admin;
pub mod login;
pub mod member;
pub mod register;
