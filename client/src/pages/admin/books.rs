//! Admin catalog management: add (single or bulk), edit, delete.
//!
//! DESIGN
//! ======
//! Draft validation runs in `lending::catalog` before any request; its
//! messages render inline under the form. Backend outcomes go to toasts. The
//! list is re-fetched after every successful write rather than patched.

#[cfg(test)]
#[path = "books_test.rs"]
mod books_test;

use leptos::prelude::*;
use lending::catalog::parse_bulk_drafts;
use lending::loans::search_books;
use lending::types::BookDraft;
use lending::{ApiError, Book};

use crate::state::auth::use_library;
use crate::state::toast::{show_error, show_success, use_toasts};
use crate::util::liveness::Liveness;

/// Which add form is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AddMode {
    #[default]
    Single,
    Bulk,
}

/// Toast text after a successful add of `count` books.
pub fn added_message(count: usize) -> String {
    if count == 1 { "Book added successfully".to_owned() } else { format!("{count} books added successfully") }
}

pub fn add_failure(mode: AddMode) -> &'static str {
    match mode {
        AddMode::Single => "Failed to add book",
        AddMode::Bulk => "Failed to add books",
    }
}

/// Split a write error into an inline form message or a toast message.
pub fn route_error(err: &ApiError, fallback: &str) -> (Option<String>, Option<String>) {
    match err {
        ApiError::Validation(message) => (Some(message.clone()), None),
        other => (None, Some(other.user_message(fallback))),
    }
}

#[component]
pub fn AdminBooksPage() -> impl IntoView {
    let library = use_library();
    let toasts = use_toasts();
    let liveness = Liveness::for_component();

    let books = RwSignal::new(Vec::<Book>::new());
    let loading = RwSignal::new(true);
    let search = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let mode = RwSignal::new(AddMode::default());
    let draft = RwSignal::new(BookDraft::default());
    let bulk_text = RwSignal::new(String::new());
    let add_error = RwSignal::new(None::<String>);

    let editing = RwSignal::new(None::<i64>);
    let edit_draft = RwSignal::new(BookDraft::default());
    let edit_error = RwSignal::new(None::<String>);
    let pending_delete = RwSignal::new(None::<Book>);

    let reload = {
        let library = library.clone();
        let liveness = liveness.clone();
        Callback::new(move |()| {
            let library = library.clone();
            let liveness = liveness.clone();
            leptos::task::spawn_local(async move {
                let fetched = library.fetch_admin_books().await;
                liveness.apply(|| {
                    match fetched {
                        Ok(list) => books.set(list),
                        Err(err) => {
                            tracing::warn!(code = err.code(), "admin catalog fetch failed");
                            books.set(Vec::new());
                            show_error(toasts, "Failed to fetch books");
                        }
                    }
                    loading.set(false);
                });
            });
        })
    };
    reload.run(());

    let on_add = {
        let library = library.clone();
        let liveness = liveness.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            if busy.get_untracked() {
                return;
            }
            let current_mode = mode.get_untracked();
            let drafts = match current_mode {
                AddMode::Single => Ok(vec![draft.get_untracked()]),
                AddMode::Bulk => parse_bulk_drafts(&bulk_text.get_untracked()),
            };
            let drafts = match drafts {
                Ok(drafts) => drafts,
                Err(err) => {
                    add_error.set(Some(err.user_message(add_failure(current_mode))));
                    return;
                }
            };
            add_error.set(None);
            busy.set(true);
            let library = library.clone();
            let liveness = liveness.clone();
            leptos::task::spawn_local(async move {
                let outcome = match current_mode {
                    AddMode::Single => library.add_book(&drafts[0]).await,
                    AddMode::Bulk => library.add_books(&drafts).await,
                };
                match outcome {
                    Ok(_) => {
                        show_success(toasts, added_message(drafts.len()));
                        liveness.apply(|| {
                            draft.set(BookDraft::default());
                            bulk_text.set(String::new());
                        });
                        liveness.apply(|| reload.run(()));
                    }
                    Err(err) => {
                        let (inline, toast) = route_error(&err, add_failure(current_mode));
                        liveness.apply(|| add_error.set(inline));
                        if let Some(message) = toast {
                            show_error(toasts, message);
                        }
                    }
                }
                liveness.apply(|| busy.set(false));
            });
        }
    };

    let on_save = {
        let library = library.clone();
        let liveness = liveness.clone();
        Callback::new(move |()| {
            let Some(id) = editing.get_untracked() else {
                return;
            };
            let library = library.clone();
            let liveness = liveness.clone();
            let changes = edit_draft.get_untracked();
            busy.set(true);
            leptos::task::spawn_local(async move {
                match library.update_book(id, &changes).await {
                    Ok(_) => {
                        show_success(toasts, "Book updated successfully");
                        liveness.apply(|| {
                            editing.set(None);
                            edit_error.set(None);
                        });
                        liveness.apply(|| reload.run(()));
                    }
                    Err(err) => {
                        let (inline, toast) = route_error(&err, "Failed to update book");
                        liveness.apply(|| edit_error.set(inline));
                        if let Some(message) = toast {
                            show_error(toasts, message);
                        }
                    }
                }
                liveness.apply(|| busy.set(false));
            });
        })
    };

    let on_confirm_delete = Callback::new(move |()| {
        let Some(book) = pending_delete.get_untracked() else {
            return;
        };
        pending_delete.set(None);
        busy.set(true);
        let library = library.clone();
        let liveness = liveness.clone();
        leptos::task::spawn_local(async move {
            match library.delete_book(book.id).await {
                Ok(()) => {
                    show_success(toasts, "Book deleted successfully");
                    liveness.apply(|| reload.run(()));
                }
                Err(err) => show_error(toasts, err.user_message("Failed to delete book")),
            }
            liveness.apply(|| busy.set(false));
        });
    });

    let start_edit = move |book: &Book| {
        editing.set(Some(book.id));
        edit_draft.set(BookDraft::new(book.title.clone(), book.author.clone()));
        edit_error.set(None);
    };

    let visible = move || search_books(&books.get(), &search.get());

    view! {
        <div class="page admin-books-page">
            <h1>"Manage Books"</h1>

            <section class="panel">
                <div class="tabs">
                    <button
                        class="tabs__tab"
                        class:tabs__tab--active=move || mode.get() == AddMode::Single
                        on:click=move |_| {
                            mode.set(AddMode::Single);
                            add_error.set(None);
                        }
                    >
                        "Add Book"
                    </button>
                    <button
                        class="tabs__tab"
                        class:tabs__tab--active=move || mode.get() == AddMode::Bulk
                        on:click=move |_| {
                            mode.set(AddMode::Bulk);
                            add_error.set(None);
                        }
                    >
                        "Bulk Add"
                    </button>
                </div>
                <form class="book-form" on:submit=on_add>
                    <Show
                        when=move || mode.get() == AddMode::Single
                        fallback=move || {
                            view! {
                                <textarea
                                    class="book-form__bulk"
                                    rows="6"
                                    placeholder="One book per line: Title | Author"
                                    prop:value=move || bulk_text.get()
                                    on:input=move |ev| {
                                        bulk_text.set(event_target_value(&ev));
                                        add_error.set(None);
                                    }
                                ></textarea>
                            }
                        }
                    >
                        <input
                            class="book-form__input"
                            type="text"
                            placeholder="Title"
                            prop:value=move || draft.get().title
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                draft.update(|d| d.title = value);
                                add_error.set(None);
                            }
                        />
                        <input
                            class="book-form__input"
                            type="text"
                            placeholder="Author"
                            prop:value=move || draft.get().author
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                draft.update(|d| d.author = value);
                                add_error.set(None);
                            }
                        />
                    </Show>
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        {move || match mode.get() {
                            AddMode::Single => "Add Book",
                            AddMode::Bulk => "Add Books",
                        }}
                    </button>
                    <Show when=move || add_error.get().is_some()>
                        <p class="form-error">{move || add_error.get().unwrap_or_default()}</p>
                    </Show>
                </form>
            </section>

            <section class="panel">
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
                        fallback=|| view! { <p class="empty-state">"No books found"</p> }
                    >
                        <table class="data-table">
                            <thead>
                                <tr>
                                    <th>"Title"</th>
                                    <th>"Author"</th>
                                    <th>"Status"</th>
                                    <th>"Actions"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {move || {
                                    let editing_id = editing.get();
                                    visible()
                                        .into_iter()
                                        .map(|book| {
                                            if editing_id == Some(book.id) {
                                                edit_row(edit_draft, edit_error, editing, busy, on_save).into_any()
                                            } else {
                                                let status = if book.available { "Available" } else { "Borrowed" };
                                                let for_edit = book.clone();
                                                let for_delete = book.clone();
                                                view! {
                                                    <tr>
                                                        <td>{book.title}</td>
                                                        <td>{book.author}</td>
                                                        <td>{status}</td>
                                                        <td class="data-table__actions">
                                                            <button class="btn btn--small" on:click=move |_| start_edit(&for_edit)>
                                                                "Edit"
                                                            </button>
                                                            <button
                                                                class="btn btn--small btn--danger"
                                                                on:click=move |_| pending_delete.set(Some(for_delete.clone()))
                                                            >
                                                                "Delete"
                                                            </button>
                                                        </td>
                                                    </tr>
                                                }
                                                    .into_any()
                                            }
                                        })
                                        .collect_view()
                                }}
                            </tbody>
                        </table>
                    </Show>
                </Show>
            </section>

            <Show when=move || pending_delete.get().is_some()>
                <div class="dialog-backdrop">
                    <div class="dialog">
                        <p>
                            {move || {
                                pending_delete
                                    .get()
                                    .map(|book| format!("Delete \"{}\"? This cannot be undone.", book.title))
                                    .unwrap_or_default()
                            }}
                        </p>
                        <div class="dialog__actions">
                            <button class="btn" on:click=move |_| pending_delete.set(None)>"Cancel"</button>
                            <button class="btn btn--danger" on:click=move |_| on_confirm_delete.run(())>"Delete"</button>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}

fn edit_row(
    draft: RwSignal<BookDraft>,
    error: RwSignal<Option<String>>,
    editing: RwSignal<Option<i64>>,
    busy: RwSignal<bool>,
    on_save: Callback<()>,
) -> impl IntoView {
    view! {
        <tr class="data-table__row--editing">
            <td>
                <input
                    class="book-form__input"
                    type="text"
                    prop:value=move || draft.get().title
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        draft.update(|d| d.title = value);
                        error.set(None);
                    }
                />
            </td>
            <td>
                <input
                    class="book-form__input"
                    type="text"
                    prop:value=move || draft.get().author
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        draft.update(|d| d.author = value);
                        error.set(None);
                    }
                />
                <Show when=move || error.get().is_some()>
                    <p class="form-error">{move || error.get().unwrap_or_default()}</p>
                </Show>
            </td>
            <td></td>
            <td class="data-table__actions">
                <button class="btn btn--small btn--primary" disabled=move || busy.get() on:click=move |_| on_save.run(())>
                    "Save"
                </button>
                <button
                    class="btn btn--small"
                    on:click=move |_| {
                        editing.set(None);
                        error.set(None);
                    }
                >
                    "Cancel"
                </button>
            </td>
        </tr>
    }
}
