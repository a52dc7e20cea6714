//! Reactive UI state.

pub mod measurement;
