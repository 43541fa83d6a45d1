//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};
use lending::ClientConfig;
use lending::guard::{ADMIN_ONLY, MEMBER_ONLY};

use crate::components::navbar::Navbar;
use crate::components::role_route::{LandingRedirect, RoleRoute};
use crate::components::toaster::Toaster;
use crate::pages::admin::{books::AdminBooksPage, borrowed::BorrowedBooksPage, dashboard::AdminDashboardPage};
use crate::pages::member::{books::MemberBooksPage, dashboard::MemberDashboardPage, history::HistoryPage};
use crate::pages::{login::LoginPage, register::RegisterPage};
use crate::state::auth::{build_library, session_signal};
use crate::state::toast::ToastState;
use crate::util::storage::BrowserStore;

/// Full-page load of the login route after the session expired mid-request.
fn on_session_expired() {
    tracing::info!("session expired; returning to login");
    #[cfg(feature = "csr")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(lending::guard::Route::Login.path());
        }
    }
}

/// Root application component.
///
/// Builds the shared client, provides it and the session and toast signals,
/// and sets up client-side routing with role guards.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let library = build_library(ClientConfig::from_build_env(), BrowserStore, Some(Arc::new(on_session_expired)));
    let session = session_signal(&library);
    let toasts = RwSignal::new(ToastState::default());

    provide_context(library);
    provide_context(session);
    provide_context(toasts);

    view! {
        <Title text="Library App"/>

        <Router>
            <Show when=move || session.get().is_authenticated()>
                <Navbar/>
            </Show>
            <main class="app-main">
                <Routes fallback=|| view! { <LandingRedirect/> }>
                    <Route path=StaticSegment("") view=LandingRedirect/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("register") view=RegisterPage/>
                    <Route
                        path=StaticSegment("dashboard")
                        view=|| view! { <RoleRoute allowed=MEMBER_ONLY><MemberDashboardPage/></RoleRoute> }
                    />
                    <Route
                        path=StaticSegment("books")
                        view=|| view! { <RoleRoute allowed=MEMBER_ONLY><MemberBooksPage/></RoleRoute> }
                    />
                    <Route
                        path=StaticSegment("history")
                        view=|| view! { <RoleRoute allowed=MEMBER_ONLY><HistoryPage/></RoleRoute> }
                    />
                    <Route
                        path=(StaticSegment("admin"), StaticSegment("dashboard"))
                        view=|| view! { <RoleRoute allowed=ADMIN_ONLY><AdminDashboardPage/></RoleRoute> }
                    />
                    <Route
                        path=(StaticSegment("admin"), StaticSegment("books"))
                        view=|| view! { <RoleRoute allowed=ADMIN_ONLY><AdminBooksPage/></RoleRoute> }
                    />
                    <Route
                        path=(StaticSegment("admin"), StaticSegment("borrowed-books"))
                        view=|| view! { <RoleRoute allowed=ADMIN_ONLY><BorrowedBooksPage/></RoleRoute> }
                    />
                </Routes>
            </main>
            <Toaster/>
        </Router>
    }
}
