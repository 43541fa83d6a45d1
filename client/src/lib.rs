//! # client
//!
//! Leptos + WASM front end for the library lending service.
//!
//! Pages and components render from a shared [`lending::LibraryClient`]
//! provided through context; session changes reach the view through an
//! `RwSignal<SessionState>` kept in sync by a session listener. Browser
//! glue (`localStorage`, `fetch`, timers) is compiled only with the `csr`
//! feature and degrades to no-op stubs otherwise so the pure UI logic can be
//! unit tested natively.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and mount the app on `<body>`.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
