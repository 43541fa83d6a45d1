//! Authenticated HTTP client: the single choke point for backend calls.
//!
//! DESIGN
//! ======
//! Every session request carries `Authorization: Bearer <access>` when a
//! token is stored. A 401 on a first attempt refreshes the access token once
//! and replays that same request once. A 401 on the replay is final.
//!
//! Refreshes are serialized behind one async gate. A request that waited on
//! the gate and finds the stored token already changed replays with the new
//! token instead of refreshing again, so a burst of N concurrent 401s costs
//! one refresh call. When a refresh fails the store is cleared and the expiry
//! hook fires exactly once.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::sync::Arc;

use futures::lock::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::store::TokenStore;
use crate::transport::{ApiRequest, ApiResponse, Method, Transport};
use crate::types::RefreshResponse;

pub const REFRESH_PATH: &str = "/auth/token/refresh/";
const UNAUTHORIZED: u16 = 401;
const MAX_ATTEMPTS: u8 = 2;

/// Called after a failed refresh has cleared the token store.
pub type ExpiryHook = Arc<dyn Fn() + Send + Sync>;

/// One logical call: the original request without credentials plus how many
/// times it has been sent. Replays clone the original, never mutate it.
#[derive(Clone, Debug)]
struct Attempt {
    original: ApiRequest,
    count: u8,
}

impl Attempt {
    fn first(original: ApiRequest) -> Self {
        Self { original, count: 1 }
    }

    fn replay(&self) -> Option<Self> {
        (self.count < MAX_ATTEMPTS).then(|| Self { original: self.original.clone(), count: self.count + 1 })
    }

    fn authorized(&self, token: Option<String>) -> ApiRequest {
        self.original.clone().with_bearer(token)
    }
}

pub struct HttpClient<T> {
    transport: T,
    config: ClientConfig,
    tokens: TokenStore,
    refresh_gate: Mutex<()>,
    on_expired: Option<ExpiryHook>,
}

impl<T> HttpClient<T> {
    pub fn new(transport: T, config: ClientConfig, tokens: TokenStore) -> Self {
        Self { transport, config, tokens, refresh_gate: Mutex::new(()), on_expired: None }
    }

    #[must_use]
    pub fn with_expiry_hook(mut self, hook: ExpiryHook) -> Self {
        self.on_expired = Some(hook);
        self
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn expire(&self) {
        self.tokens.clear();
        if let Some(hook) = &self.on_expired {
            hook();
        }
    }
}

impl<T: Transport> HttpClient<T> {
    /// Send a session request, refreshing and replaying once on 401.
    ///
    /// # Errors
    ///
    /// Returns the classified status error for non-2xx responses, the
    /// refresh error when the refresh fails, or [`ApiError::Network`].
    pub async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<ApiResponse, ApiError> {
        let mut original = ApiRequest::new(method, self.config.endpoint(path));
        original.body = body;
        let mut attempt = Attempt::first(original);

        loop {
            let sent_with = self.tokens.access_token();
            let response = self.transport.send(&attempt.authorized(sent_with.clone())).await?;
            if response.status != UNAUTHORIZED {
                return into_result(response);
            }
            let Some(next) = attempt.replay() else {
                tracing::debug!(url = %attempt.original.url, "replayed request still unauthorized");
                return into_result(response);
            };
            self.refresh(sent_with.as_deref()).await?;
            attempt = next;
        }
    }

    /// Send without credentials and without refresh handling. Used for the
    /// auth endpoints themselves.
    ///
    /// # Errors
    ///
    /// Same classification as [`HttpClient::send`].
    pub async fn send_anonymous(&self, method: Method, path: &str, body: Option<Value>) -> Result<ApiResponse, ApiError> {
        let mut request = ApiRequest::new(method, self.config.endpoint(path));
        request.body = body;
        into_result(self.transport.send(&request).await?)
    }

    /// # Errors
    ///
    /// See [`HttpClient::send`]; also [`ApiError::Decode`] on a malformed body.
    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        decode(&self.send(Method::Get, path, None).await?)
    }

    /// # Errors
    ///
    /// See [`HttpClient::get_json`].
    pub async fn post_json<B: Serialize + ?Sized, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, ApiError> {
        decode(&self.send(Method::Post, path, Some(encode(body)?)).await?)
    }

    /// # Errors
    ///
    /// See [`HttpClient::get_json`].
    pub async fn put_json<B: Serialize + ?Sized, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, ApiError> {
        decode(&self.send(Method::Put, path, Some(encode(body)?)).await?)
    }

    /// # Errors
    ///
    /// See [`HttpClient::send`].
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(Method::Delete, path, None).await.map(|_| ())
    }

    async fn refresh(&self, stale: Option<&str>) -> Result<(), ApiError> {
        let _gate = self.refresh_gate.lock().await;

        match self.tokens.access_token() {
            Some(current) if Some(current.as_str()) != stale => {
                tracing::debug!("access token already refreshed by a concurrent request");
                return Ok(());
            }
            None if stale.is_some() => {
                tracing::debug!("session already ended by a concurrent refresh failure");
                return Err(ApiError::Unauthenticated);
            }
            None if self.tokens.refresh_token().is_none() => {
                tracing::debug!("no stored credentials; session already ended");
                return Err(ApiError::Unauthenticated);
            }
            _ => {}
        }

        match self.exchange_refresh_token().await {
            Ok(()) => Ok(()),
            Err(err) => {
                tracing::warn!(code = err.code(), "token refresh failed; ending session");
                self.expire();
                Err(err)
            }
        }
    }

    async fn exchange_refresh_token(&self) -> Result<(), ApiError> {
        let Some(refresh) = self.tokens.refresh_token() else {
            return Err(ApiError::Unauthenticated);
        };
        tracing::debug!("refreshing access token");
        let body = serde_json::json!({ "refresh": refresh });
        let response = self.send_anonymous(Method::Post, REFRESH_PATH, Some(body)).await?;
        let tokens: RefreshResponse = decode(&response)?;
        self.tokens.set_access_token(&tokens.access);
        if let Some(rotated) = tokens.refresh {
            self.tokens.set_refresh_token(&rotated);
        }
        Ok(())
    }
}

fn into_result(response: ApiResponse) -> Result<ApiResponse, ApiError> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(ApiError::from_response(response.status, &response.body))
    }
}

/// Empty bodies (204, bare 200) decode as JSON `null`.
pub(crate) fn decode<R: DeserializeOwned>(response: &ApiResponse) -> Result<R, ApiError> {
    let body = if response.body.trim().is_empty() { "null" } else { response.body.as_str() };
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

pub(crate) fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}
