//! Terminal UI layer for the textile inventory dashboard.
//!
//! Provides themes, the header, KPI cards and filter sidebar components, one
//! view per dashboard panel (heatmap, store map, monthly trend, category
//! ranking, summary table) and the event loop, built on [`ratatui`].

pub mod app;
pub mod components;
pub mod geo_view;
pub mod heatmap_view;
pub mod ranking_view;
pub mod table_view;
pub mod text;
pub mod themes;
pub mod trend_view;

pub use inventory_core as core;
