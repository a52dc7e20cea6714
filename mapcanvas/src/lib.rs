//! Map rendering and input engine for the measurement map.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! full lifecycle of the map canvas: raster tiles, the editable vector layer,
//! the draw/modify/snap interactions, and pan/zoom of the view. The host UI is
//! responsible only for wiring DOM events to the engine and reacting to the
//! resulting [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`source`] | Vector source: features and vertex edits |
//! | [`interaction`] | Draw, modify and snap interactions |
//! | [`view`] | Map view: center, zoom and pixel/coordinate conversions |
//! | [`tile`] | XYZ tile grid and tile source |
//! | [`tile_cache`] | Browser tile image cache |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Nearest vertex / edge queries against the source |
//! | [`geom`] | Points, extents and geometries |
//! | [`proj`] | EPSG:3857 / EPSG:4326 transforms |
//! | [`sphere`] | Spherical length and area |
//! | [`style`] | Vector styles |
//! | [`render`] | Scene rendering |
//! | [`consts`] | Shared numeric constants (zoom limits, tolerances, etc.) |

pub mod consts;
pub mod engine;
pub mod geom;
pub mod hit;
pub mod input;
pub mod interaction;
pub mod proj;
pub mod render;
pub mod source;
pub mod sphere;
pub mod style;
pub mod tile;
pub mod tile_cache;
pub mod view;
