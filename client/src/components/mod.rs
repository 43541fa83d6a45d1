//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render navigation chrome, route guarding, and notifications
//! while reading shared state from Leptos context providers.

pub mod navbar;
pub mod role_route;
pub mod stat_card;
pub mod toaster;
