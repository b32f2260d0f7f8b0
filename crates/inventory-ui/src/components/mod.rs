//! Reusable dashboard widgets: header, KPI cards, filter sidebar and the
//! shared "no data" placeholder.

pub mod filter_panel;
pub mod header;
pub mod kpi_cards;
pub mod no_data;
