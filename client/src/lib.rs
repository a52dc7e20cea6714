//! # client
//!
//! Leptos + WASM frontend for the measurement map.
//!
//! This crate contains the application shell, the map page, the
//! `InteractiveMeasurementMap` component and its read-out state. It
//! integrates with the `mapcanvas` crate for imperative canvas rendering:
//! the component owns one `mapcanvas::engine::Engine` per mount and feeds it
//! DOM events.

pub mod app;
pub mod components;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        log::warn!("console logger not installed: {err}");
    }
    leptos::mount::hydrate_body(app::App);
}
