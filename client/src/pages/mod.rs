//! Routed pages.

pub mod map;
