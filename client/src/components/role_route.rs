//! Route guard component and the landing redirect.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps every member and admin page. The decision itself is
//! `lending::guard::decide`; this component only re-runs it whenever the
//! session signal changes and performs the navigation it asks for.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use lending::Role;
use lending::guard::{GuardDecision, decide, landing};

use crate::state::auth::use_session;

fn replace() -> NavigateOptions {
    NavigateOptions { replace: true, ..NavigateOptions::default() }
}

/// Render `children` only for a signed-in user whose role is in `allowed`.
#[component]
pub fn RoleRoute(allowed: &'static [Role], children: ChildrenFn) -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();
    let decision = Memo::new(move |_| decide(&session.get(), allowed));

    Effect::new(move || {
        if let GuardDecision::Redirect(route) = decision.get() {
            navigate(route.path(), replace());
        }
    });

    move || match decision.get() {
        GuardDecision::Render => children().into_any(),
        GuardDecision::Loading => view! { <div class="route-guard">"Loading..."</div> }.into_any(),
        GuardDecision::Redirect(_) => view! { <div class="route-guard">"Redirecting..."</div> }.into_any(),
    }
}

/// `/` and unknown paths: forward to the role home, or to login.
#[component]
pub fn LandingRedirect() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    Effect::new(move || {
        let state = session.get();
        if !state.is_loading() {
            navigate(landing(&state).path(), replace());
        }
    });

    view! { <div class="route-guard">"Redirecting..."</div> }
}

/// Send an already signed-in user away from the login/register forms.
pub fn install_signed_in_redirect() {
    let session = use_session();
    let navigate = use_navigate();
    Effect::new(move || {
        let state = session.get();
        if state.is_authenticated() && !state.is_loading() {
            navigate(landing(&state).path(), replace());
        }
    });
}
