//! Top navigation bar with role-aware links and the account menu.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};
use lending::guard::Route;

use crate::state::auth::{use_library, use_session};
use crate::util::nav::{display_email, link_class, nav_links};

#[component]
pub fn Navbar() -> impl IntoView {
    let library = use_library();
    let session = use_session();
    let navigate = use_navigate();
    let pathname = use_location().pathname;
    let menu_open = RwSignal::new(false);

    let home = move || session.get().role().map_or(Route::Login, Route::home).path();
    let links = move || session.get().role().map(nav_links).unwrap_or_default();
    let username = move || session.get().user().map(|user| user.username.clone()).unwrap_or_default();
    let email = move || {
        session.get().user().map(|user| display_email(&user.email).to_owned()).unwrap_or_default()
    };
    let role_label = move || session.get().role().map(|role| role.label()).unwrap_or_default();

    let on_logout = move |_| {
        menu_open.set(false);
        library.logout();
        navigate(Route::Login.path(), NavigateOptions::default());
    };

    view! {
        <nav class="navbar">
            <a class="navbar__brand" href=home>"Library App"</a>
            <div class="navbar__links">
                {move || {
                    links()
                        .iter()
                        .copied()
                        .map(|link| {
                            view! {
                                <a
                                    href=link.route.path()
                                    class=move || link_class(&link, &pathname.get())
                                >
                                    {link.label}
                                </a>
                            }
                        })
                        .collect_view()
                }}
            </div>
            <div class="navbar__account">
                <button class="btn navbar__menu-toggle" on:click=move |_| menu_open.update(|open| *open = !*open)>
                    {username}
                </button>
                <Show when=move || menu_open.get()>
                    <div class="navbar__menu">
                        <span class="navbar__username">{username}</span>
                        <span class="navbar__email">{email}</span>
                        <span class="navbar__role">{role_label}</span>
                    </div>
                </Show>
                <button class="btn navbar__logout" on:click=on_logout>
                    "Logout"
                </button>
            </div>
        </nav>
    }
}
