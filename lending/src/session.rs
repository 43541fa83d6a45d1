//! Session state and its transitions.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`SessionState`] is the in-memory picture of who is signed in. It is
//! rehydrated from the token store at startup and only changes through the
//! transition methods below. [`SessionContext`] shares one state between the
//! HTTP client's expiry hook and whatever renders it, notifying listeners
//! after every transition.
//!
//! `is_authenticated` is derived from the access token rather than stored,
//! so it cannot disagree with it.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, Mutex, PoisonError};

use crate::store::TokenStore;
use crate::types::{Role, User};

/// Coarse lifecycle position, derived from a [`SessionState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthPhase {
    Anonymous,
    Authenticating,
    Authenticated,
    Error,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    user: Option<User>,
    access_token: Option<String>,
    refresh_token: Option<String>,
    loading: bool,
    error: Option<String>,
}

impl SessionState {
    /// Rehydrate from persisted keys.
    ///
    /// A token without a readable profile is discarded, since the role is
    /// needed for every guarded route.
    #[must_use]
    pub fn restore(tokens: &TokenStore) -> Self {
        let user = tokens.user();
        let access_token = tokens.access_token();
        if access_token.is_some() && user.is_none() {
            tracing::warn!("stored session has no readable profile; discarding");
            tokens.clear();
            return Self::default();
        }
        Self { user, access_token, refresh_token: tokens.refresh_token(), loading: false, error: None }
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|user| user.role)
    }

    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn phase(&self) -> AuthPhase {
        if self.loading {
            AuthPhase::Authenticating
        } else if self.is_authenticated() {
            AuthPhase::Authenticated
        } else if self.error.is_some() {
            AuthPhase::Error
        } else {
            AuthPhase::Anonymous
        }
    }

    // =========================================================================
    // TRANSITIONS
    // =========================================================================

    /// A login or registration request is in flight.
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn login_succeeded(&mut self, user: User, access: String, refresh: String) {
        self.user = Some(user);
        self.access_token = Some(access);
        self.refresh_token = Some(refresh);
        self.loading = false;
        self.error = None;
    }

    /// Registration finished; the caller is still not signed in.
    pub fn register_succeeded(&mut self) {
        self.loading = false;
    }

    /// A login or registration failed. Authentication is left untouched.
    pub fn failed(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    pub fn logged_out(&mut self) {
        self.user = None;
        self.access_token = None;
        self.refresh_token = None;
        self.loading = false;
        self.error = None;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

/// Receives every state after a transition.
pub type SessionListener = Arc<dyn Fn(&SessionState) + Send + Sync>;

struct Inner {
    state: Mutex<SessionState>,
    listeners: Mutex<Vec<SessionListener>>,
}

/// Shared, observable handle to one session. Clones refer to the same state.
#[derive(Clone)]
pub struct SessionContext {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.snapshot();
        f.debug_struct("SessionContext")
            .field("phase", &state.phase())
            .field("user", &state.user().map(|user| user.username.as_str()))
            .finish()
    }
}

impl SessionContext {
    #[must_use]
    pub fn new(state: SessionState) -> Self {
        Self { inner: Arc::new(Inner { state: Mutex::new(state), listeners: Mutex::new(Vec::new()) }) }
    }

    #[must_use]
    pub fn restore(tokens: &TokenStore) -> Self {
        Self::new(SessionState::restore(tokens))
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn subscribe(&self, listener: SessionListener) {
        self.inner.listeners.lock().unwrap_or_else(PoisonError::into_inner).push(listener);
    }

    /// Apply one transition, then notify listeners outside the state lock.
    pub fn apply(&self, transition: impl FnOnce(&mut SessionState)) {
        let next = {
            let mut state = self.inner.state.lock().unwrap_or_else(PoisonError::into_inner);
            transition(&mut state);
            state.clone()
        };
        let listeners = self.inner.listeners.lock().unwrap_or_else(PoisonError::into_inner).clone();
        for listener in listeners {
            listener(&next);
        }
    }
}
