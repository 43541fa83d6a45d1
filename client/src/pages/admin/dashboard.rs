//! Admin landing page: catalog and loan totals plus the newest loans.

use leptos::prelude::*;
use lending::BorrowRecord;
use lending::guard::Route;
use lending::loans::{AdminStats, LoanSort, format_date, sort_loans};

use crate::components::stat_card::StatCard;
use crate::state::auth::use_library;
use crate::util::liveness::Liveness;

const RECENT_LOANS: usize = 5;

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let library = use_library();
    let liveness = Liveness::for_component();
    let stats = RwSignal::new(AdminStats::default());
    let recent = RwSignal::new(Vec::<BorrowRecord>::new());
    let loading = RwSignal::new(true);

    leptos::task::spawn_local(async move {
        let books = library.admin_books().await;
        let loans = library.borrowed_books().await;
        liveness.apply(|| {
            stats.set(AdminStats::compute(&books, &loans));
            recent.set(sort_loans(&loans, "", LoanSort::BorrowedAtDesc).into_iter().take(RECENT_LOANS).collect());
            loading.set(false);
        });
    });

    view! {
        <div class="page dashboard-page">
            <h1>"Admin Dashboard"</h1>
            <div class="stat-grid">
                <StatCard
                    title="Total Books"
                    caption="In the catalog"
                    value=Signal::derive(move || stats.get().total_books)
                    loading=loading
                />
                <StatCard
                    title="Available Books"
                    caption="On the shelf"
                    value=Signal::derive(move || stats.get().available_books)
                    loading=loading
                />
                <StatCard
                    title="Active Loans"
                    caption="Currently borrowed"
                    value=Signal::derive(move || stats.get().active_loans)
                    loading=loading
                />
            </div>

            <section class="panel">
                <h2>"Recent Loans"</h2>
                <Show
                    when=move || !recent.get().is_empty()
                    fallback=|| view! { <p class="empty-state">"No books are currently borrowed."</p> }
                >
                    <ul class="loan-list">
                        {move || {
                            recent
                                .get()
                                .into_iter()
                                .map(|record| {
                                    view! {
                                        <li class="loan-list__row">
                                            <span class="loan-list__title">{record.book_title}</span>
                                            <span class="loan-list__user">{record.username}</span>
                                            <span class="loan-list__date">{format_date(Some(&record.borrowed_at))}</span>
                                        </li>
                                    }
                                })
                                .collect_view()
                        }}
                    </ul>
                </Show>
                <div class="panel__actions">
                    <a class="btn" href=Route::AdminBooks.path()>"Manage Books"</a>
                    <a class="btn" href=Route::AdminBorrowedBooks.path()>"View Borrowed Books"</a>
                </div>
            </section>
        </div>
    }
}
