//! Route table and the render-or-redirect decision.
//!
//! DESIGN
//! ======
//! [`decide`] is a pure function of the session and a route's role set. The
//! browser re-runs it on every session change and navigates on `Redirect`;
//! the CLI runs it once per command and turns `Redirect` into an error.
//!
//! Rules, first match wins:
//!   1. loading              -> `Loading`
//!   2. not authenticated    -> `Redirect(Login)`
//!   3. role not in the set  -> `Redirect(role home)`
//!   4. otherwise            -> `Render`

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::session::SessionState;
use crate::types::Role;

pub const MEMBER_ONLY: &[Role] = &[Role::Member];
pub const ADMIN_ONLY: &[Role] = &[Role::Admin];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Root,
    Login,
    Register,
    Dashboard,
    Books,
    History,
    AdminDashboard,
    AdminBooks,
    AdminBorrowedBooks,
}

impl Route {
    pub const ALL: [Self; 9] = [
        Self::Root,
        Self::Login,
        Self::Register,
        Self::Dashboard,
        Self::Books,
        Self::History,
        Self::AdminDashboard,
        Self::AdminBooks,
        Self::AdminBorrowedBooks,
    ];

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Root => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Dashboard => "/dashboard",
            Self::Books => "/books",
            Self::History => "/history",
            Self::AdminDashboard => "/admin/dashboard",
            Self::AdminBooks => "/admin/books",
            Self::AdminBorrowedBooks => "/admin/borrowed-books",
        }
    }

    /// Exact match, tolerating one trailing slash.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = match path.strip_suffix('/') {
            Some("") | None => path,
            Some(rest) => rest,
        };
        Self::ALL.into_iter().find(|route| route.path() == trimmed)
    }

    /// Roles allowed to render this route; `None` for public routes.
    #[must_use]
    pub fn required_roles(self) -> Option<&'static [Role]> {
        match self {
            Self::Root | Self::Login | Self::Register => None,
            Self::Dashboard | Self::Books | Self::History => Some(MEMBER_ONLY),
            Self::AdminDashboard | Self::AdminBooks | Self::AdminBorrowedBooks => Some(ADMIN_ONLY),
        }
    }

    /// Landing page for a signed-in role.
    #[must_use]
    pub fn home(role: Role) -> Self {
        match role {
            Role::Admin => Self::AdminDashboard,
            Role::Member => Self::Dashboard,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Loading,
    Redirect(Route),
    Render,
}

/// Decide what a route guarded by `allowed` shows for `session`.
///
/// A session that is authenticated but has no cached profile cannot be
/// placed in a section, so it is sent to login like an anonymous one.
#[must_use]
pub fn decide(session: &SessionState, allowed: &[Role]) -> GuardDecision {
    if session.is_loading() {
        return GuardDecision::Loading;
    }
    if !session.is_authenticated() {
        return GuardDecision::Redirect(Route::Login);
    }
    match session.role() {
        None => GuardDecision::Redirect(Route::Login),
        Some(role) if allowed.contains(&role) => GuardDecision::Render,
        Some(role) => GuardDecision::Redirect(Route::home(role)),
    }
}

/// Where `/` and unknown paths lead: the role home when signed in, else login.
#[must_use]
pub fn landing(session: &SessionState) -> Route {
    match session.role() {
        Some(role) if session.is_authenticated() => Route::home(role),
        _ => Route::Login,
    }
}
