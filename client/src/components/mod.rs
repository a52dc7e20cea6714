//! UI components.

pub mod measurement_map;
pub mod measurement_readout;
