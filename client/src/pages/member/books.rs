//! Member catalog: search, per-row status, borrow and return.

#[cfg(test)]
#[path = "books_test.rs"]
mod books_test;

use leptos::prelude::*;
use lending::loans::{BookStatus, LoanAction, search_books};
use lending::{Book, BorrowRecord};

use crate::state::auth::{Library, use_library};
use crate::state::toast::{show_error, show_success, use_toasts};
use crate::util::liveness::Liveness;

/// Footer under the table.
pub fn showing_summary(shown: usize, total: usize) -> String {
    format!("Showing {shown} of {total} books")
}

/// Second line of the empty state; only shown while a search is active.
pub fn empty_hint(term: &str) -> Option<&'static str> {
    (!term.trim().is_empty()).then_some("Try adjusting your search term")
}

pub fn action_failure(action: LoanAction) -> &'static str {
    match action {
        LoanAction::Borrow => "Failed to borrow book",
        LoanAction::Return => "Failed to return book",
    }
}

async fn run_action(library: &Library, action: LoanAction, book_id: i64) -> Result<String, lending::ApiError> {
    match action {
        LoanAction::Borrow => library.borrow_book(book_id).await.map(|receipt| receipt.message),
        LoanAction::Return => library.return_book(book_id).await.map(|receipt| receipt.message),
    }
}

#[component]
pub fn MemberBooksPage() -> impl IntoView {
    let library = use_library();
    let toasts = use_toasts();
    let liveness = Liveness::for_component();
    let books = RwSignal::new(Vec::<Book>::new());
    let loans = RwSignal::new(Vec::<BorrowRecord>::new());
    let loading = RwSignal::new(true);
    let search = RwSignal::new(String::new());
    let busy_id = RwSignal::new(None::<i64>);

    let reload = {
        let library = library.clone();
        let liveness = liveness.clone();
        Callback::new(move |()| {
            let library = library.clone();
            let liveness = liveness.clone();
            leptos::task::spawn_local(async move {
                let catalog = library.books().await;
                let history = library.history().await;
                liveness.apply(|| {
                    books.set(catalog);
                    loans.set(history);
                    loading.set(false);
                });
            });
        })
    };
    reload.run(());

    let on_action = Callback::new(move |(action, book_id): (LoanAction, i64)| {
        if busy_id.get_untracked().is_some() {
            return;
        }
        busy_id.set(Some(book_id));
        let library = library.clone();
        let liveness = liveness.clone();
        leptos::task::spawn_local(async move {
            match run_action(&library, action, book_id).await {
                Ok(message) => show_success(toasts, message),
                Err(err) => {
                    tracing::warn!(code = err.code(), book_id, "loan action failed");
                    show_error(toasts, err.user_message(action_failure(action)));
                }
            }
            liveness.apply(|| {
                busy_id.set(None);
                reload.run(());
            });
        });
    });

    let visible = move || search_books(&books.get(), &search.get());

    view! {
        <div class="page books-page">
            <h1>"Browse Books"</h1>
            <input
                class="search-input"
                type="search"
                placeholder="Search by title or author..."
                prop:value=move || search.get()
                on:input=move |ev| search.set(event_target_value(&ev))
            />
            <Show when=move || !loading.get() fallback=|| view! { <p class="loading">"Loading books..."</p> }>
                <Show
                    when=move || !visible().is_empty()
                    fallback=move || {
                        view! {
                            <div class="empty-state">
                                <p>"No books found"</p>
                                {move || empty_hint(&search.get()).map(|hint| view! { <p class="empty-state__hint">{hint}</p> })}
                            </div>
                        }
                    }
                >
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>"Title"</th>
                                <th>"Author"</th>
                                <th>"Status"</th>
                                <th>"Action"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                let my_loans = loans.get();
                                visible()
                                    .into_iter()
                                    .map(|book| {
                                        let id = book.id;
                                        let status = BookStatus::of(&book, &my_loans);
                                        view! {
                                            <tr>
                                                <td>{book.title}</td>
                                                <td>{book.author}</td>
                                                <td>
                                                    <span class=status_class(status)>{status.label()}</span>
                                                </td>
                                                <td>
                                                    {status.action().map(|action| {
                                                        view! {
                                                            <button
                                                                class="btn btn--small"
                                                                disabled=move || busy_id.get().is_some()
                                                                on:click=move |_| on_action.run((action, id))
                                                            >
                                                                {move || if busy_id.get() == Some(id) { "Processing..." } else { action.label() }}
                                                            </button>
                                                        }
                                                    })}
                                                </td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </tbody>
                    </table>
                    <p class="table-footer">{move || showing_summary(visible().len(), books.get().len())}</p>
                </Show>
            </Show>
        </div>
    }
}

pub fn status_class(status: BookStatus) -> &'static str {
    match status {
        BookStatus::Available => "badge badge--available",
        BookStatus::BorrowedByYou => "badge badge--mine",
        BookStatus::Unavailable => "badge badge--unavailable",
    }
}
