//! Account creation page. Success leads back to the login form.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use lending::Role;
use lending::auth::RegistrationForm;
use lending::guard::Route;

use crate::components::role_route::install_signed_in_redirect;
use crate::state::auth::{use_library, use_session};
use crate::state::toast::{show_success, use_toasts};

pub const REGISTERED_MESSAGE: &str = "Registration successful! Please sign in.";

#[component]
pub fn RegisterPage() -> impl IntoView {
    let library = use_library();
    let session = use_session();
    let toasts = use_toasts();
    let navigate = use_navigate();
    let form = RwSignal::new(RegistrationForm::default());
    let form_error = RwSignal::new(None::<String>);

    library.clear_error();
    install_signed_in_redirect();

    let busy = move || session.get().is_loading();
    let message = move || form_error.get().or_else(|| session.get().error().map(str::to_owned));

    // Typing clears whatever error is showing.
    let edit = {
        let library = library.clone();
        move |apply: &dyn Fn(&mut RegistrationForm)| {
            form.update(|f| apply(f));
            form_error.set(None);
            if session.get_untracked().error().is_some() {
                library.clear_error();
            }
        }
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy() {
            return;
        }
        let library = library.clone();
        let navigate = navigate.clone();
        let submitted = form.get();
        leptos::task::spawn_local(async move {
            match library.register(&submitted).await {
                Ok(_) => {
                    show_success(toasts, REGISTERED_MESSAGE);
                    navigate(Route::Login.path(), NavigateOptions::default());
                }
                Err(err @ lending::ApiError::Validation(_)) => form_error.set(Some(err.to_string())),
                // Backend failures are already on the session error.
                Err(_) => {}
            }
        });
    };

    let edit_username = edit.clone();
    let edit_email = edit.clone();
    let edit_password = edit.clone();
    let edit_confirm = edit.clone();
    let edit_role = edit;

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Create Account"</h1>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Username"
                        prop:value=move || form.get().username
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            edit_username(&move |f| f.username.clone_from(&value));
                        }
                    />
                    <input
                        class="login-input"
                        type="email"
                        placeholder="Email"
                        prop:value=move || form.get().email
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            edit_email(&move |f| f.email.clone_from(&value));
                        }
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || form.get().password
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            edit_password(&move |f| f.password.clone_from(&value));
                        }
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Confirm Password"
                        prop:value=move || form.get().confirm_password
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            edit_confirm(&move |f| f.confirm_password.clone_from(&value));
                        }
                    />
                    <select
                        class="login-input"
                        prop:value=move || form.get().role.as_str()
                        on:change=move |ev| {
                            let role = Role::parse(&event_target_value(&ev)).unwrap_or_default();
                            edit_role(&move |f| f.role = role);
                        }
                    >
                        <option value="member">"Member"</option>
                        <option value="admin">"Admin"</option>
                    </select>
                    <button class="login-button" type="submit" disabled=busy>
                        {move || if busy() { "Creating account..." } else { "Register" }}
                    </button>
                </form>
                <Show when=move || message().is_some()>
                    <p class="login-message login-message--error">{move || message().unwrap_or_default()}</p>
                </Show>
                <p class="login-card__footer">
                    "Already have an account? "
                    <a href=Route::Login.path()>"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
