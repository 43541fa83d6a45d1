//! Role-aware navigation tables for the navbar.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use lending::Role;
use lending::guard::Route;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub route: Route,
    pub label: &'static str,
}

const ADMIN_LINKS: &[NavLink] = &[
    NavLink { route: Route::AdminDashboard, label: "Dashboard" },
    NavLink { route: Route::AdminBooks, label: "Manage Books" },
    NavLink { route: Route::AdminBorrowedBooks, label: "Borrowed Books" },
];

const MEMBER_LINKS: &[NavLink] = &[
    NavLink { route: Route::Dashboard, label: "Dashboard" },
    NavLink { route: Route::Books, label: "Browse Books" },
    NavLink { route: Route::History, label: "My History" },
];

pub fn nav_links(role: Role) -> &'static [NavLink] {
    match role {
        Role::Admin => ADMIN_LINKS,
        Role::Member => MEMBER_LINKS,
    }
}

/// Modifier class for the link matching the current location.
pub fn link_class(link: &NavLink, current_path: &str) -> &'static str {
    if Route::from_path(current_path) == Some(link.route) {
        "navbar__link navbar__link--active"
    } else {
        "navbar__link"
    }
}

pub fn display_email(email: &str) -> &str {
    if email.trim().is_empty() { "No email available" } else { email }
}
