//! Core types for the textile inventory dashboard.
//!
//! Holds the inventory record model and filter selection, the error type,
//! CLI settings, the static store coordinate table, month naming and
//! number formatting shared by the data, runtime and UI crates.

pub mod calendar;
pub mod dates;
pub mod error;
pub mod formatting;
pub mod geo;
pub mod models;
pub mod settings;

pub use error::{DashboardError, Result};
