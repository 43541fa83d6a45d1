//! `fetch`-backed transport for the lending HTTP client.
//!
//! Client-side (csr): real requests via `gloo-net`.
//! Native builds and tests: every request fails with a network error, since
//! there is no browser to send it from.
//!
//! ERROR HANDLING
//! ==============
//! Only "no response" is an `Err`; error statuses come back as ordinary
//! responses so the core can classify them and drive token refresh.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use lending::ApiError;
use lending::transport::{ApiRequest, ApiResponse, Transport};

#[cfg(feature = "csr")]
const JSON_CONTENT_TYPE: &str = "application/json";

/// Sends requests with the browser's `fetch`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport {
    /// Include cookies on cross-origin requests.
    pub with_credentials: bool,
}

impl BrowserTransport {
    #[must_use]
    pub fn new(with_credentials: bool) -> Self {
        Self { with_credentials }
    }
}

fn network_error(error: impl std::fmt::Display) -> ApiError {
    ApiError::Network(error.to_string())
}

#[async_trait::async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        #[cfg(feature = "csr")]
        {
            use gloo_net::http::{Method, RequestBuilder};
            use lending::transport::Method as ApiMethod;

            let method = match request.method {
                ApiMethod::Get => Method::GET,
                ApiMethod::Post => Method::POST,
                ApiMethod::Put => Method::PUT,
                ApiMethod::Delete => Method::DELETE,
            };
            let mut builder = RequestBuilder::new(&request.url)
                .method(method)
                .header("Accept", JSON_CONTENT_TYPE);
            if self.with_credentials {
                builder = builder.credentials(web_sys::RequestCredentials::Include);
            }
            if let Some(authorization) = request.authorization() {
                builder = builder.header("Authorization", &authorization);
            }
            let outgoing = match &request.body {
                Some(body) => builder.json(body).map_err(network_error)?,
                None => builder.build().map_err(network_error)?,
            };

            let response = outgoing.send().await.map_err(network_error)?;
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Ok(ApiResponse::new(status, body))
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(network_error(format!(
                "{} {} unavailable outside the browser",
                request.method.as_str(),
                request.url
            )))
        }
    }
}
