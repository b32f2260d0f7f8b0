//! Data layer for the textile inventory dashboard.
//!
//! Loads the inventory CSV, filters it by the current selection and builds
//! the aggregate tables behind each dashboard panel.

pub mod aggregator;
pub mod analysis;
pub mod reader;

pub use inventory_core as core;
