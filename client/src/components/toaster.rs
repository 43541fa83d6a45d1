//! Renders the toast queue and expires entries.

use leptos::prelude::*;

use crate::state::toast::{Toast, use_toasts};

#[cfg(feature = "csr")]
const TOAST_TTL: std::time::Duration = std::time::Duration::from_secs(4);

#[component]
pub fn Toaster() -> impl IntoView {
    let toasts = use_toasts();

    // Schedule one dismissal per newly seen toast id.
    #[cfg(feature = "csr")]
    Effect::new(move |seen: Option<u64>| {
        let seen = seen.unwrap_or(0);
        let state = toasts.get();
        for toast in state.items.iter().filter(|toast| toast.id > seen) {
            let id = toast.id;
            leptos::task::spawn_local(async move {
                gloo_timers::future::sleep(TOAST_TTL).await;
                toasts.update(|s| s.dismiss(id));
            });
        }
        state.items.last().map_or(seen, |toast| toast.id.max(seen))
    });

    view! {
        <div class="toaster" aria-live="polite">
            {move || {
                toasts
                    .get()
                    .items
                    .into_iter()
                    .map(|toast: Toast| {
                        let id = toast.id;
                        view! {
                            <div class=toast.kind.class() on:click=move |_| toasts.update(|s| s.dismiss(id))>
                                {toast.message}
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
