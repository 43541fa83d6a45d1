//! Transient notification queue.
//!
//! DESIGN
//! ======
//! Pages push outcomes of write actions here; the `Toaster` component renders
//! the queue and dismisses each entry after a delay. Ids are monotonic so a
//! late dismissal never removes a newer toast.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

use leptos::prelude::*;

/// Maximum simultaneous toasts; older ones are dropped first.
pub const MAX_TOASTS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn class(self) -> &'static str {
        match self {
            Self::Success => "toast toast--success",
            Self::Error => "toast toast--error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Clone, Debug, Default)]
pub struct ToastState {
    pub items: Vec<Toast>,
    next_id: u64,
}

impl ToastState {
    /// Queue a toast and return its id.
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Toast { id, kind, message: message.into() });
        if self.items.len() > MAX_TOASTS {
            let overflow = self.items.len() - MAX_TOASTS;
            self.items.drain(..overflow);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|toast| toast.id != id);
    }
}

/// Queue a success toast on the context queue.
pub fn show_success(toasts: RwSignal<ToastState>, message: impl Into<String>) {
    let message = message.into();
    toasts.update(|state| {
        state.push(ToastKind::Success, message);
    });
}

/// Queue an error toast on the context queue.
pub fn show_error(toasts: RwSignal<ToastState>, message: impl Into<String>) {
    let message = message.into();
    toasts.update(|state| {
        state.push(ToastKind::Error, message);
    });
}

pub fn use_toasts() -> RwSignal<ToastState> {
    expect_context::<RwSignal<ToastState>>()
}
