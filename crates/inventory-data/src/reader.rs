//! CSV loading for the inventory dataset.
//!
//! Reads one row per stock entry and converts it into [`InventoryRecord`]s.
//! Expected columns (Spanish aliases from the legacy export in brackets):
//!   category [categoria], store [tienda], stock, stock_minimum [stock_minimo],
//!   unit_cost [costo_unitario], intake_date [fecha_ingreso]
//! Extra columns are ignored.

use std::io::Read;
use std::path::Path;

use inventory_core::dates::DateParser;
use inventory_core::models::InventoryRecord;
use inventory_core::{DashboardError, Result};
use serde::Deserialize;
use tracing::debug;

/// Canonical column name followed by its accepted aliases.
const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    ("category", &["categoria"]),
    ("store", &["tienda"]),
    ("stock", &[]),
    ("stock_minimum", &["stock_minimo"]),
    ("unit_cost", &["costo_unitario"]),
    ("intake_date", &["fecha_ingreso"]),
];

/// Raw CSV row before date parsing.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(alias = "categoria")]
    category: String,
    #[serde(alias = "tienda")]
    store: String,
    stock: i64,
    #[serde(alias = "stock_minimo")]
    stock_minimum: i64,
    #[serde(alias = "costo_unitario")]
    unit_cost: f64,
    #[serde(alias = "fecha_ingreso")]
    intake_date: String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load inventory records from any CSV reader.
///
/// Fails on the first missing column or malformed row; there is no partial
/// result. Row order is preserved.
pub fn load_inventory<R: Read>(reader: R) -> Result<Vec<InventoryRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers().map_err(|e| data_format_error(&e, 1))?;
    check_required_columns(headers)?;

    let mut records = Vec::new();
    for (row_idx, result) in csv_reader.deserialize::<RawRow>().enumerate() {
        // Header is line 1; this only matters when the csv error has no position.
        let fallback_line = row_idx as u64 + 2;
        let raw = result.map_err(|e| data_format_error(&e, fallback_line))?;
        records.push(into_record(raw, fallback_line)?);
    }

    debug!("Loaded {} inventory records", records.len());
    Ok(records)
}

/// Load inventory records from a CSV file on disk.
pub fn load_inventory_file(path: &Path) -> Result<Vec<InventoryRecord>> {
    if !path.exists() {
        return Err(DashboardError::DataPathNotFound(path.to_path_buf()));
    }
    let file = std::fs::File::open(path).map_err(|source| DashboardError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    load_inventory(file)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Every required column must appear under its canonical name or an alias.
fn check_required_columns(headers: &csv::StringRecord) -> Result<()> {
    for (canonical, aliases) in REQUIRED_COLUMNS {
        let present = headers
            .iter()
            .any(|h| h == *canonical || aliases.contains(&h));
        if !present {
            return Err(DashboardError::MissingColumn((*canonical).to_string()));
        }
    }
    Ok(())
}

fn into_record(raw: RawRow, line: u64) -> Result<InventoryRecord> {
    let intake_date =
        DateParser::parse(&raw.intake_date).ok_or_else(|| DashboardError::DataFormat {
            line,
            message: format!("unparsable intake_date \"{}\"", raw.intake_date),
        })?;

    Ok(InventoryRecord {
        category: raw.category,
        store: raw.store,
        stock: raw.stock,
        stock_minimum: raw.stock_minimum,
        unit_cost: raw.unit_cost,
        intake_date,
    })
}

fn data_format_error(err: &csv::Error, fallback_line: u64) -> DashboardError {
    let line = err
        .position()
        .map(|p| p.line())
        .unwrap_or(fallback_line);
    DashboardError::DataFormat {
        line,
        message: err.to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
