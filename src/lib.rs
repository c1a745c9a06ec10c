//! # venturedesk
//!
//! Leptos + WASM client for the entrepreneurs directory API.
//!
//! This crate contains the session layer (token slot + claims inspection),
//! the REST resource clients, the route table with its navigation guard, and
//! the root `App` component that wires them together for the browser.

pub mod app;
pub mod net;
pub mod routing;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

/// Browser entry point: installs console logging and mounts the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
