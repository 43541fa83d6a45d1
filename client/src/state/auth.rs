//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session itself lives in `lending::SessionContext`, owned by the
//! [`Library`] client. This module mirrors it into an `RwSignal` so route
//! guards and user-aware components re-render on every transition, including
//! the sign-out forced by a failed token refresh.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use leptos::prelude::*;
use lending::session::SessionState;
use lending::store::KeyValueStore;
use lending::{ClientConfig, LibraryClient};

use crate::net::transport::BrowserTransport;

/// The client every page talks to, shared through context.
pub type Library = Arc<LibraryClient<BrowserTransport>>;

/// Build the client from build-time configuration over `store`.
///
/// `on_expired` runs after a failed refresh has already cleared the session.
pub fn build_library(
    config: ClientConfig,
    store: impl KeyValueStore + 'static,
    on_expired: Option<Arc<dyn Fn() + Send + Sync>>,
) -> Library {
    let transport = BrowserTransport::new(config.with_credentials);
    Arc::new(LibraryClient::new(transport, config, store, on_expired))
}

/// Signal mirroring `library`'s session, updated after every transition.
pub fn session_signal(library: &Library) -> RwSignal<SessionState> {
    let signal = RwSignal::new(library.session().snapshot());
    library.session().subscribe(Arc::new(move |state: &SessionState| {
        signal.set(state.clone());
    }));
    signal
}

/// Read the shared client from context.
pub fn use_library() -> Library {
    expect_context::<Library>()
}

/// Read the session mirror from context.
pub fn use_session() -> RwSignal<SessionState> {
    expect_context::<RwSignal<SessionState>>()
}
