//! Member landing page: headline stats plus current and past loans.

use leptos::prelude::*;
use lending::guard::Route;
use lending::loans::{MemberStats, active_loans, format_date, returned_loans};
use lending::BorrowRecord;

use crate::components::stat_card::StatCard;
use crate::state::auth::{use_library, use_session};
use crate::util::liveness::Liveness;

/// Rows shown in the "recently returned" list.
const RECENT_RETURNS: usize = 5;

#[component]
pub fn MemberDashboardPage() -> impl IntoView {
    let library = use_library();
    let session = use_session();
    let liveness = Liveness::for_component();
    let stats = RwSignal::new(MemberStats::default());
    let history = RwSignal::new(Vec::<BorrowRecord>::new());
    let loading = RwSignal::new(true);

    leptos::task::spawn_local(async move {
        let books = library.books().await;
        let records = library.history().await;
        liveness.apply(|| {
            stats.set(MemberStats::compute(&books, &records));
            history.set(records);
            loading.set(false);
        });
    });

    let username = move || session.get().user().map(|user| user.username.clone()).unwrap_or_default();
    let current = move || active_loans(&history.get());
    let recent = move || returned_loans(&history.get()).into_iter().rev().take(RECENT_RETURNS).collect::<Vec<_>>();

    view! {
        <div class="page dashboard-page">
            <h1>{move || format!("Welcome, {}", username())}</h1>
            <div class="stat-grid">
                <StatCard
                    title="Available Books"
                    caption="Ready to borrow"
                    value=Signal::derive(move || stats.get().available_books)
                    loading=loading
                />
                <StatCard
                    title="Currently Borrowed"
                    caption="Books you hold"
                    value=Signal::derive(move || stats.get().currently_borrowed)
                    loading=loading
                />
                <StatCard
                    title="Total Borrowed"
                    caption="All time"
                    value=Signal::derive(move || stats.get().total_borrowed)
                    loading=loading
                />
            </div>

            <section class="panel">
                <h2>"Currently Borrowed"</h2>
                <Show
                    when=move || !current().is_empty()
                    fallback=move || {
                        view! {
                            <p class="empty-state">
                                "You have no books checked out. "
                                <a href=Route::Books.path()>"Browse the catalog"</a>
                            </p>
                        }
                    }
                >
                    <ul class="loan-list">
                        {move || {
                            current()
                                .into_iter()
                                .map(|record| {
                                    view! {
                                        <li class="loan-list__row">
                                            <span class="loan-list__title">{record.book_title}</span>
                                            <span class="loan-list__date">
                                                {format!("Borrowed {}", format_date(Some(&record.borrowed_at)))}
                                            </span>
                                        </li>
                                    }
                                })
                                .collect_view()
                        }}
                    </ul>
                </Show>
            </section>

            <section class="panel">
                <h2>"Recently Returned"</h2>
                <Show
                    when=move || !recent().is_empty()
                    fallback=|| view! { <p class="empty-state">"No returned books yet."</p> }
                >
                    <ul class="loan-list">
                        {move || {
                            recent()
                                .into_iter()
                                .map(|record| {
                                    view! {
                                        <li class="loan-list__row">
                                            <span class="loan-list__title">{record.book_title}</span>
                                            <span class="loan-list__date">
                                                {format!("Returned {}", format_date(record.returned_at.as_deref()))}
                                            </span>
                                        </li>
                                    }
                                })
                                .collect_view()
                        }}
                    </ul>
                </Show>
                <a class="panel__more" href=Route::History.path()>"View full history"</a>
            </section>
        </div>
    }
}
