//! The injectable client context: one session, one token store, one HTTP
//! client, wired together.
//!
//! Auth operations live in `auth`, catalog and loan operations in `catalog`;
//! both are `impl` blocks on [`LibraryClient`].

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::http::HttpClient;
use crate::session::{SessionContext, SessionState};
use crate::store::{KeyValueStore, TokenStore};

pub struct LibraryClient<T> {
    pub(crate) http: HttpClient<T>,
    session: SessionContext,
}

impl<T> LibraryClient<T> {
    /// Build a client over `transport`, rehydrating the session from `store`.
    ///
    /// `on_expired` runs after a failed token refresh has cleared the store
    /// and the session; browsers use it to navigate to the login page.
    pub fn new(
        transport: T,
        config: ClientConfig,
        store: impl KeyValueStore + 'static,
        on_expired: Option<Arc<dyn Fn() + Send + Sync>>,
    ) -> Self {
        let tokens = TokenStore::new(store);
        let session = SessionContext::restore(&tokens);
        let expiring = session.clone();
        let http = HttpClient::new(transport, config, tokens).with_expiry_hook(Arc::new(move || {
            expiring.apply(SessionState::logged_out);
            if let Some(hook) = &on_expired {
                hook();
            }
        }));
        Self { http, session }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn tokens(&self) -> &TokenStore {
        self.http.tokens()
    }

    pub fn config(&self) -> &ClientConfig {
        self.http.config()
    }

    pub fn transport(&self) -> &T {
        self.http.transport()
    }
}
