#![cfg(not(feature = "csr"))]

use lending::transport::Method;

use super::*;

#[tokio::test]
async fn native_build_reports_network_error() {
    let transport = BrowserTransport::new(false);
    let request = ApiRequest::new(Method::Get, "http://localhost:8000/api/books/");
    let err = transport.send(&request).await.unwrap_err();
    assert_eq!(err.code(), "E_NETWORK");
    assert!(err.to_string().contains("GET http://localhost:8000/api/books/"));
}

#[test]
fn credentials_flag_is_carried() {
    assert!(BrowserTransport::new(true).with_credentials);
    assert!(!BrowserTransport::default().with_credentials);
}

#[test]
fn network_error_wraps_message() {
    assert_eq!(network_error("refused"), ApiError::Network("refused".into()));
}
