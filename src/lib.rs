//! OrbitWatch core
//!
//! Simulated orbital positions for a catalog of tracked objects, per-object
//! risk classification, aggregate statistics, and a client for an external
//! conjunction-analysis service.

pub mod analysis;
pub mod config;
pub mod data;
pub mod propagation;
pub mod risk;
pub mod stats;
