//! `localStorage` backend for the token store.
//!
//! SYSTEM CONTEXT
//! ==============
//! The three session keys live in `localStorage` so a reload keeps the user
//! signed in. Each tab reads them once at startup; there is no cross-tab
//! sync.
//!
//! TRADE-OFFS
//! ==========
//! Storage access is best-effort: private browsing or a full quota turns
//! writes into no-ops rather than errors. Native builds have no storage at
//! all and behave like an always-empty store.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use lending::store::KeyValueStore;

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Key-value store over `window.localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStore;

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) {
        #[cfg(feature = "csr")]
        {
            let Some(storage) = local_storage() else {
                return;
            };
            if storage.set_item(key, value).is_err() {
                tracing::warn!(key, "localStorage write failed");
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
        }
    }
}
