//! Canvas viewport synchronization shared by the map host.
//!
//! Bridges the element's CSS size and the device pixel ratio into the engine.
//! `hydrate`-only because it reads from `web_sys`.

#[cfg(feature = "hydrate")]
use leptos::prelude::*;

#[cfg(feature = "hydrate")]
use mapcanvas::engine::{Action, Engine};

/// Read the canvas element's CSS dimensions and device pixel ratio, then push them to the engine.
///
/// Called on mount and on every window resize. The engine multiplies by DPR
/// when sizing the backing store.
#[cfg(feature = "hydrate")]
pub fn sync_viewport(engine: &mut Engine, canvas_ref: &NodeRef<leptos::html::Canvas>) -> Vec<Action> {
    let Some(window) = web_sys::window() else {
        return Vec::new();
    };
    let Some(canvas) = canvas_ref.get_untracked() else {
        return Vec::new();
    };
    let width = f64::from(canvas.client_width()).max(1.0);
    let height = f64::from(canvas.client_height()).max(1.0);
    let dpr = window.device_pixel_ratio().max(1.0);
    engine.set_viewport(width, height, dpr)
}
