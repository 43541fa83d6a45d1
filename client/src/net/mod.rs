//! Networking for the browser build.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` adapts `gloo-net` to the core's `Transport` seam; every REST
//! call goes through `lending::http::HttpClient` on top of it.

pub mod transport;
