//! Persistent token store.
//!
//! SYSTEM CONTEXT
//! ==============
//! Three keys survive restarts: `token` (access), `refreshToken`, and `user`
//! (JSON profile). The browser backs them with `localStorage`, the CLI with a
//! JSON file, tests with [`MemoryStore`].

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::types::User;

pub const TOKEN_KEY: &str = "token";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const USER_KEY: &str = "user";

/// String key-value persistence. Writes are best-effort.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Process-local store; clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).remove(key);
    }
}

/// Typed view over the three session keys.
#[derive(Clone)]
pub struct TokenStore {
    backend: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("has_access_token", &self.access_token().is_some())
            .field("has_refresh_token", &self.refresh_token().is_some())
            .finish()
    }
}

impl TokenStore {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self { backend: Arc::new(backend) }
    }

    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.backend.get(TOKEN_KEY).filter(|token| !token.is_empty())
    }

    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        self.backend.get(REFRESH_TOKEN_KEY).filter(|token| !token.is_empty())
    }

    /// Cached profile; a corrupt entry reads as absent.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        let raw = self.backend.get(USER_KEY)?;
        serde_json::from_str(&raw).ok()
    }

    pub fn save_login(&self, user: &User, access: &str, refresh: &str) {
        self.backend.set(TOKEN_KEY, access);
        self.backend.set(REFRESH_TOKEN_KEY, refresh);
        if let Ok(raw) = serde_json::to_string(user) {
            self.backend.set(USER_KEY, &raw);
        }
    }

    pub fn set_access_token(&self, access: &str) {
        self.backend.set(TOKEN_KEY, access);
    }

    pub fn set_refresh_token(&self, refresh: &str) {
        self.backend.set(REFRESH_TOKEN_KEY, refresh);
    }

    /// Remove all three session keys.
    pub fn clear(&self) {
        self.backend.remove(TOKEN_KEY);
        self.backend.remove(REFRESH_TOKEN_KEY);
        self.backend.remove(USER_KEY);
    }
}
