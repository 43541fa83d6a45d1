//! Mounted-ness flag for async work started by a component.
//!
//! A fetch that resolves after its page has unmounted must not write into
//! that page's signals. Pages take a [`Liveness`] at mount, check it after
//! every `await`, and the reactive owner's cleanup flips it off.

#[cfg(test)]
#[path = "liveness_test.rs"]
mod liveness_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Clone, Debug)]
pub struct Liveness {
    alive: Arc<AtomicBool>,
}

impl Default for Liveness {
    fn default() -> Self {
        Self { alive: Arc::new(AtomicBool::new(true)) }
    }
}

impl Liveness {
    /// A flag that starts alive and is never cleared automatically.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A flag cleared when the current reactive owner is cleaned up.
    #[must_use]
    pub fn for_component() -> Self {
        let liveness = Self::new();
        let on_unmount = liveness.clone();
        leptos::prelude::on_cleanup(move || on_unmount.kill());
        liveness
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Relaxed)
    }

    pub fn kill(&self) {
        self.alive.store(false, Ordering::Relaxed);
    }

    /// Run `apply` only while still mounted.
    pub fn apply(&self, apply: impl FnOnce()) {
        if self.is_alive() {
            apply();
        }
    }
}
