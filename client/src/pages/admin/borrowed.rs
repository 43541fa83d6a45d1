//! Admin view of every active loan, searchable and sortable.

use leptos::prelude::*;
use lending::BorrowRecord;
use lending::loans::{LoanSort, days_borrowed, format_date_time, sort_loans};
use time::OffsetDateTime;

use crate::state::auth::use_library;
use crate::util::liveness::Liveness;

#[component]
pub fn BorrowedBooksPage() -> impl IntoView {
    let library = use_library();
    let liveness = Liveness::for_component();
    let loans = RwSignal::new(Vec::<BorrowRecord>::new());
    let loading = RwSignal::new(true);
    let search = RwSignal::new(String::new());
    let sort = RwSignal::new(LoanSort::default());

    leptos::task::spawn_local(async move {
        let records = library.borrowed_books().await;
        liveness.apply(|| {
            loans.set(records);
            loading.set(false);
        });
    });

    let rows = move || sort_loans(&loans.get(), &search.get(), sort.get());

    view! {
        <div class="page borrowed-page">
            <h1>"Borrowed Books"</h1>
            <div class="toolbar">
                <input
                    class="search-input"
                    type="search"
                    placeholder="Search by title or username..."
                    prop:value=move || search.get()
                    on:input=move |ev| search.set(event_target_value(&ev))
                />
                <select
                    class="select"
                    prop:value=move || sort.get().as_str()
                    on:change=move |ev| sort.set(LoanSort::parse(&event_target_value(&ev)).unwrap_or_default())
                >
                    {LoanSort::ALL
                        .into_iter()
                        .map(|option| view! { <option value=option.as_str()>{option.label()}</option> })
                        .collect_view()}
                </select>
            </div>
            <Show when=move || !loading.get() fallback=|| view! { <p class="loading">"Loading borrowed books..."</p> }>
                <Show
                    when=move || !rows().is_empty()
                    fallback=|| view! { <p class="empty-state">"No borrowed books found"</p> }
                >
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>"Title"</th>
                                <th>"Borrowed By"</th>
                                <th>"Borrowed At"</th>
                                <th>"Days"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                let now = OffsetDateTime::now_utc();
                                rows()
                                    .into_iter()
                                    .map(|record| {
                                        let days = days_borrowed(&record.borrowed_at, now)
                                            .map_or_else(|| "N/A".to_owned(), |days| format!("{days} days"));
                                        view! {
                                            <tr>
                                                <td>{record.book_title.clone()}</td>
                                                <td>{record.username.clone()}</td>
                                                <td>{format_date_time(&record.borrowed_at)}</td>
                                                <td>{days}</td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </tbody>
                    </table>
                    <p class="table-footer">{move || format!("{} active loans", rows().len())}</p>
                </Show>
            </Show>
        </div>
    }
}
