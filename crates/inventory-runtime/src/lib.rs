//! Runtime layer for the textile inventory dashboard.
//!
//! Holds the load-once dataset cache and the interactive filter session that
//! rebuilds the dashboard view on every selection change.

pub mod dataset_cache;
pub mod session;

pub use inventory_core as core;
pub use inventory_data as data;
