//! Pages rendered for the admin role.

pub mod books;
pub mod borrowed;
pub mod dashboard;
