//! Dashboard summary card.

use leptos::prelude::*;

/// One headline number with a caption. Shows `...` while `loading`.
#[component]
pub fn StatCard(
    title: &'static str,
    caption: &'static str,
    #[prop(into)] value: Signal<usize>,
    #[prop(into)] loading: Signal<bool>,
) -> impl IntoView {
    view! {
        <div class="stat-card">
            <h3 class="stat-card__title">{title}</h3>
            <div class="stat-card__value">
                {move || if loading.get() { "...".to_owned() } else { value.get().to_string() }}
            </div>
            <p class="stat-card__caption">{caption}</p>
        </div>
    }
}
