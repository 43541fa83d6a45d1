//! Borrowing history with status filter and title search.

use leptos::prelude::*;
use lending::BorrowRecord;
use lending::loans::{HistoryFilter, filter_history, format_date, loan_duration};
use time::OffsetDateTime;

use crate::state::auth::use_library;
use crate::util::liveness::Liveness;

#[component]
pub fn HistoryPage() -> impl IntoView {
    let library = use_library();
    let liveness = Liveness::for_component();
    let records = RwSignal::new(Vec::<BorrowRecord>::new());
    let loading = RwSignal::new(true);
    let filter = RwSignal::new(HistoryFilter::default());
    let search = RwSignal::new(String::new());

    leptos::task::spawn_local(async move {
        let history = library.history().await;
        liveness.apply(|| {
            records.set(history);
            loading.set(false);
        });
    });

    let rows = move || filter_history(&records.get(), filter.get(), &search.get());

    view! {
        <div class="page history-page">
            <h1>"Borrowing History"</h1>
            <div class="toolbar">
                <input
                    class="search-input"
                    type="search"
                    placeholder="Search by title..."
                    prop:value=move || search.get()
                    on:input=move |ev| search.set(event_target_value(&ev))
                />
                <select
                    class="select"
                    prop:value=move || filter.get().as_str()
                    on:change=move |ev| filter.set(HistoryFilter::parse(&event_target_value(&ev)).unwrap_or_default())
                >
                    {HistoryFilter::ALL
                        .into_iter()
                        .map(|option| view! { <option value=option.as_str()>{option.label()}</option> })
                        .collect_view()}
                </select>
            </div>
            <Show when=move || !loading.get() fallback=|| view! { <p class="loading">"Loading history..."</p> }>
                <Show
                    when=move || !rows().is_empty()
                    fallback=|| view! { <p class="empty-state">"No borrowing history found"</p> }
                >
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>"Title"</th>
                                <th>"Borrowed"</th>
                                <th>"Returned"</th>
                                <th>"Duration"</th>
                                <th>"Status"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                let now = OffsetDateTime::now_utc();
                                rows()
                                    .into_iter()
                                    .map(|record| {
                                        let duration = loan_duration(&record, now);
                                        let (class, label) = if record.is_active() {
                                            ("badge badge--mine", "Borrowed")
                                        } else {
                                            ("badge badge--available", "Returned")
                                        };
                                        view! {
                                            <tr>
                                                <td>{record.book_title.clone()}</td>
                                                <td>{format_date(Some(&record.borrowed_at))}</td>
                                                <td>{format_date(record.returned_at.as_deref())}</td>
                                                <td>{duration}</td>
                                                <td><span class=class>{label}</span></td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </tbody>
                    </table>
                </Show>
            </Show>
        </div>
    }
}
