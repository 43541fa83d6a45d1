//! `reqwest` implementation of the lending transport seam.

use async_trait::async_trait;
use lending::ApiError;
use lending::transport::{ApiRequest, ApiResponse, Method, Transport};
use reqwest::header::{ACCEPT, AUTHORIZATION};

#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

fn method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn network(request: &ApiRequest, err: &reqwest::Error) -> ApiError {
    ApiError::Network(format!("{} {}: {err}", request.method.as_str(), request.url))
}

#[async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let mut builder = self.client.request(method(request.method), &request.url).header(ACCEPT, "application/json");
        if let Some(authorization) = request.authorization() {
            builder = builder.header(AUTHORIZATION, authorization);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        let response = builder.send().await.map_err(|e| network(request, &e))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| network(request, &e))?;
        tracing::debug!(method = request.method.as_str(), url = %request.url, status, "response");
        Ok(ApiResponse::new(status, body))
    }
}
