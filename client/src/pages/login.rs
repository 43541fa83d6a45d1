//! Login page: username + password sign-in.

use leptos::prelude::*;
use lending::auth::validate_login;
use lending::guard::Route;

use crate::components::role_route::install_signed_in_redirect;
use crate::state::auth::{use_library, use_session};

#[component]
pub fn LoginPage() -> impl IntoView {
    let library = use_library();
    let session = use_session();
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let form_error = RwSignal::new(None::<String>);

    library.clear_error();
    install_signed_in_redirect();

    let busy = move || session.get().is_loading();
    let message = move || form_error.get().or_else(|| session.get().error().map(str::to_owned));

    let clearing = library.clone();
    let on_edit = move || {
        form_error.set(None);
        if session.get_untracked().error().is_some() {
            clearing.clear_error();
        }
    };
    let on_edit_password = on_edit.clone();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy() {
            return;
        }
        let credentials = match validate_login(&username.get(), &password.get()) {
            Ok(credentials) => credentials,
            Err(err) => {
                form_error.set(Some(err.user_message("")));
                return;
            }
        };
        form_error.set(None);
        let library = library.clone();
        // The session signal carries the outcome; the redirect effect does the rest.
        leptos::task::spawn_local(async move {
            let _ = library.login(credentials).await;
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Sign In"</h1>
                <p class="login-card__subtitle">"Library App"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Username"
                        autocomplete="username"
                        prop:value=move || username.get()
                        on:input=move |ev| {
                            username.set(event_target_value(&ev));
                            on_edit();
                        }
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| {
                            password.set(event_target_value(&ev));
                            on_edit_password();
                        }
                    />
                    <button class="login-button" type="submit" disabled=busy>
                        {move || if busy() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
                <Show when=move || message().is_some()>
                    <p class="login-message login-message--error">{move || message().unwrap_or_default()}</p>
                </Show>
                <p class="login-card__footer">
                    "Don't have an account? "
                    <a href=Route::Register.path()>"Register"</a>
                </p>
            </div>
        </div>
    }
}
