//! Dashboard pipeline: filter → KPIs → aggregate.
//!
//! [`build_dashboard`] turns the loaded records and a [`FilterSelection`] into
//! a [`DashboardView`], the only structure the presentation layer consumes.

use chrono::Utc;
use inventory_core::models::{FilterSelection, InventoryRecord, KpiScope, Kpis};
use serde::Serialize;
use tracing::debug;

use crate::aggregator::{
    CategoryStock, GeoView, HeatmapMatrix, InventoryAggregator, MonthlyStock, SummaryRow,
};

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the view.
#[derive(Debug, Clone, Serialize)]
pub struct ViewMetadata {
    /// ISO-8601 timestamp when this view was generated.
    pub generated_at: String,
    /// Records in the base dataset.
    pub records_total: usize,
    /// Records that passed the filter.
    pub records_filtered: usize,
    /// Wall-clock seconds spent filtering and aggregating.
    pub compute_time_seconds: f64,
}

/// Everything the dashboard renders for one selection.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub selection: FilterSelection,
    /// Record set the KPIs were computed over.
    pub kpi_scope: KpiScope,
    pub kpis: Kpis,
    pub heatmap: HeatmapMatrix,
    pub geo: GeoView,
    pub monthly_trend: Vec<MonthlyStock>,
    pub category_ranking: Vec<CategoryStock>,
    pub summary: Vec<SummaryRow>,
    pub metadata: ViewMetadata,
}

impl DashboardView {
    /// `true` when no record matched the selection; every panel then shows
    /// its "no data" message.
    pub fn is_empty(&self) -> bool {
        self.summary.is_empty()
    }
}

/// Values offered by the filter controls.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterOptions {
    /// Distinct years, ascending.
    pub years: Vec<i32>,
    /// Distinct stores in first-appearance order.
    pub stores: Vec<String>,
    /// Distinct categories in first-appearance order.
    pub categories: Vec<String>,
}

impl FilterOptions {
    pub fn from_records(records: &[InventoryRecord]) -> Self {
        let mut options = FilterOptions::default();
        for r in records {
            let year = r.year();
            if !options.years.contains(&year) {
                options.years.push(year);
            }
            if !options.stores.contains(&r.store) {
                options.stores.push(r.store.clone());
            }
            if !options.categories.contains(&r.category) {
                options.categories.push(r.category.clone());
            }
        }
        options.years.sort_unstable();
        options
    }

    /// Earliest year, used as the initial selection.
    pub fn default_year(&self) -> Option<i32> {
        self.years.first().copied()
    }

    /// `(first, last)` year of the dataset.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        Some((*self.years.first()?, *self.years.last()?))
    }
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full pipeline for one selection.
///
/// 1. Filter by year, then store and category.
/// 2. KPIs over the full dataset, or over the filtered set for
///    [`KpiScope::Filtered`].
/// 3. Build the five aggregate tables from the filtered records.
///
/// Never fails. An empty filter result produces empty tables.
pub fn build_dashboard(
    records: &[InventoryRecord],
    selection: &FilterSelection,
    kpi_scope: KpiScope,
) -> DashboardView {
    let start = std::time::Instant::now();

    // ── Step 1: Filter ────────────────────────────────────────────────────────
    let filtered = InventoryAggregator::filter(records, selection);

    // ── Step 2: KPIs ──────────────────────────────────────────────────────────
    let kpis = match kpi_scope {
        KpiScope::Full => InventoryAggregator::compute_kpis(records),
        KpiScope::Filtered => InventoryAggregator::compute_kpis(&filtered),
    };

    // ── Step 3: Aggregates ────────────────────────────────────────────────────
    let heatmap = InventoryAggregator::aggregate_heatmap(&filtered);
    let geo = InventoryAggregator::aggregate_geo(&filtered);
    let monthly_trend = InventoryAggregator::aggregate_monthly_trend(&filtered);
    let category_ranking = InventoryAggregator::aggregate_category_ranking(&filtered);
    let summary = InventoryAggregator::build_summary_table(&filtered);

    let compute_time = start.elapsed().as_secs_f64();
    debug!(
        year = selection.year,
        store = selection.store.label(),
        category = selection.category.label(),
        filtered = filtered.len(),
        total = records.len(),
        "dashboard view rebuilt in {:.4}s",
        compute_time
    );

    DashboardView {
        selection: selection.clone(),
        kpi_scope,
        kpis,
        heatmap,
        geo,
        monthly_trend,
        category_ranking,
        summary,
        metadata: ViewMetadata {
            generated_at: Utc::now().to_rfc3339(),
            records_total: records.len(),
            records_filtered: filtered.len(),
            compute_time_seconds: compute_time,
        },
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use inventory_core::models::Choice;

    fn make_record(category: &str, store: &str, stock: i64, minimum: i64, date: &str) -> InventoryRecord {
        InventoryRecord {
            category: category.to_string(),
            store: store.to_string(),
            stock,
            stock_minimum: minimum,
            unit_cost: 1_000.0,
            intake_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        }
    }

    fn sample() -> Vec<InventoryRecord> {
        vec![
            make_record("Blusas", "Cali", 4, 10, "2024-05-01"),
            make_record("Pantalones", "Bogotá", 20, 5, "2023-02-11"),
            make_record("Blusas", "Medellín", 8, 2, "2023-07-19"),
            make_record("Faldas", "Cali", 1, 3, "2022-12-30"),
        ]
    }

    #[test]
    fn test_filter_options() {
        let options = FilterOptions::from_records(&sample());
        assert_eq!(options.years, vec![2022, 2023, 2024]);
        assert_eq!(options.stores, vec!["Cali", "Bogotá", "Medellín"]);
        assert_eq!(options.categories, vec!["Blusas", "Pantalones", "Faldas"]);
        assert_eq!(options.default_year(), Some(2022));
        assert_eq!(options.year_span(), Some((2022, 2024)));
    }

    #[test]
    fn test_filter_options_empty() {
        let options = FilterOptions::from_records(&[]);
        assert_eq!(options.default_year(), None);
        assert_eq!(options.year_span(), None);
    }

    #[test]
    fn test_kpis_full_scope_ignore_selection() {
        let records = sample();
        let sel = FilterSelection::new(2023).with_store(Choice::Only("Bogotá".into()));
        let view = build_dashboard(&records, &sel, KpiScope::Full);
        assert_eq!(view.kpis.total_stock, 33);
        assert_eq!(view.kpis.low_stock_count, 2);
        assert_eq!(view.metadata.records_filtered, 1);
        assert_eq!(view.metadata.records_total, 4);
    }

    #[test]
    fn test_kpis_filtered_scope_follow_selection() {
        let records = sample();
        let sel = FilterSelection::new(2023);
        let view = build_dashboard(&records, &sel, KpiScope::Filtered);
        assert_eq!(view.kpis.total_stock, 28);
        assert_eq!(view.kpis.low_stock_count, 0);
        assert!((view.kpis.total_value - 28_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_selection_is_not_an_error() {
        let records = sample();
        let sel = FilterSelection::new(1999);
        let view = build_dashboard(&records, &sel, KpiScope::Full);
        assert!(view.is_empty());
        assert!(view.heatmap.is_empty());
        assert!(view.geo.is_empty());
        assert!(view.monthly_trend.is_empty());
        assert!(view.category_ranking.is_empty());
        assert_eq!(view.kpis.total_stock, 33);
    }

    #[test]
    fn test_view_serializes() {
        let view = build_dashboard(&sample(), &FilterSelection::new(2023), KpiScope::Full);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["kpi_scope"], "full");
        assert_eq!(json["selection"]["year"], 2023);
        assert_eq!(json["selection"]["store"], "all");
        assert_eq!(json["summary"][0]["status"], "ok");
    }
}
