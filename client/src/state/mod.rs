//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`auth` for the session mirror, `toast` for
//! transient notifications) so components depend on small focused models.

pub mod auth;
pub mod toast;
