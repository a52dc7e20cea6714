//! Utility helpers shared across client UI modules.
//!
//! Browser-only helpers are gated on `hydrate`; the map lifecycle slot is
//! plain Rust so it can be tested natively.

pub mod canvas_input;
pub mod map_lifecycle;
pub mod map_viewport;
