//! Pages rendered for the member role.

pub mod books;
pub mod dashboard;
pub mod history;
