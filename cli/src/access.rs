//! Route-guard check for member and admin commands.

#[cfg(test)]
#[path = "access_test.rs"]
mod access_test;

use lending::guard::{ADMIN_ONLY, GuardDecision, Route, decide};
use lending::{Role, SessionState};

use crate::error::CliError;

fn section(allowed: &[Role]) -> &'static str {
    if allowed == ADMIN_ONLY { "admin" } else { "member" }
}

/// Commands are one-shot, so a redirect becomes an error naming where to go.
pub fn require(state: &SessionState, allowed: &'static [Role]) -> Result<(), CliError> {
    match decide(state, allowed) {
        GuardDecision::Render => Ok(()),
        GuardDecision::Loading | GuardDecision::Redirect(Route::Login) => Err(CliError::NotLoggedIn),
        GuardDecision::Redirect(_) => Err(CliError::WrongSection {
            required: section(allowed),
            role: state.role().map_or("unknown", Role::as_str),
        }),
    }
}
