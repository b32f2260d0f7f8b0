//! Inventory aggregation: KPIs, filtering and the per-panel view tables.
//!
//! Every function here is pure and total. An empty input yields an empty (but
//! well-typed) output, never an error.

use std::collections::{BTreeMap, BTreeSet};

use inventory_core::calendar;
use inventory_core::geo;
use inventory_core::models::{FilterSelection, InventoryRecord, Kpis, StockStatus};
use serde::Serialize;
use tracing::warn;

// ── View tables ───────────────────────────────────────────────────────────────

/// Dense category × period matrix of row counts.
///
/// `counts[i][j]` is the number of records with `categories[i]` in
/// `periods[j]`; combinations with no records hold `0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeatmapMatrix {
    /// Row labels, sorted.
    pub categories: Vec<String>,
    /// Column labels (`"YYYY-MM"`), sorted.
    pub periods: Vec<String>,
    pub counts: Vec<Vec<u64>>,
}

impl HeatmapMatrix {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Cell lookup by labels.
    pub fn get(&self, category: &str, period: &str) -> Option<u64> {
        let row = self.categories.iter().position(|c| c == category)?;
        let col = self.periods.iter().position(|p| p == period)?;
        Some(self.counts[row][col])
    }

    /// Largest cell value, `0` for an empty matrix.
    pub fn max_count(&self) -> u64 {
        self.counts
            .iter()
            .flat_map(|row| row.iter().copied())
            .max()
            .unwrap_or(0)
    }
}

/// Stock held at one placed store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoPoint {
    pub store: String,
    pub stock: i64,
    pub latitude: f64,
    pub longitude: f64,
}

/// Store stock totals with coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeoView {
    /// One point per known store, ordered by store name.
    pub points: Vec<GeoPoint>,
    /// Stores with stock but no coordinates; left out of `points`.
    pub unlocated_stores: Vec<String>,
}

impl GeoView {
    /// `true` when no store contributed stock, located or not.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.unlocated_stores.is_empty()
    }
}

/// Total stock for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyStock {
    /// `1..=12`.
    pub month: u32,
    pub month_name: &'static str,
    pub stock: i64,
}

/// Total stock for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStock {
    pub category: String,
    pub stock: i64,
}

/// One row of the summary table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub category: String,
    pub store: String,
    pub stock: i64,
    pub stock_minimum: i64,
    pub unit_cost: f64,
    pub status: StockStatus,
}

// ── InventoryAggregator ───────────────────────────────────────────────────────

/// Stateless helper that filters records and builds the view tables.
pub struct InventoryAggregator;

impl InventoryAggregator {
    /// Total stock, total value and low-stock count over `records`.
    pub fn compute_kpis(records: &[InventoryRecord]) -> Kpis {
        records.iter().fold(Kpis::default(), |mut kpis, r| {
            kpis.total_stock += r.stock;
            kpis.total_value += r.total_value();
            if r.is_low_stock() {
                kpis.low_stock_count += 1;
            }
            kpis
        })
    }

    /// Records matching `selection`, in their original relative order.
    ///
    /// Year is always applied; store and category are skipped when set to
    /// "all". `records` is left untouched.
    pub fn filter(records: &[InventoryRecord], selection: &FilterSelection) -> Vec<InventoryRecord> {
        records
            .iter()
            .filter(|r| selection.matches(r))
            .cloned()
            .collect()
    }

    /// Count rows per (category, period) into a dense matrix.
    pub fn aggregate_heatmap(filtered: &[InventoryRecord]) -> HeatmapMatrix {
        let keyed: Vec<(&str, String)> = filtered
            .iter()
            .map(|r| (r.category.as_str(), r.period_key()))
            .collect();

        let mut cells: BTreeMap<(&str, &str), u64> = BTreeMap::new();
        let mut categories: BTreeSet<&str> = BTreeSet::new();
        let mut periods: BTreeSet<&str> = BTreeSet::new();
        for (category, period) in &keyed {
            let key = (*category, period.as_str());
            categories.insert(key.0);
            periods.insert(key.1);
            *cells.entry(key).or_insert(0) += 1;
        }

        let counts = categories
            .iter()
            .map(|&category| {
                periods
                    .iter()
                    .map(|&period| cells.get(&(category, period)).copied().unwrap_or(0))
                    .collect()
            })
            .collect();

        HeatmapMatrix {
            categories: categories.into_iter().map(str::to_string).collect(),
            periods: periods.into_iter().map(str::to_string).collect(),
            counts,
        }
    }

    /// Sum stock per store and attach coordinates from the static lookup.
    ///
    /// Stores missing from the lookup are logged and excluded from `points`.
    pub fn aggregate_geo(filtered: &[InventoryRecord]) -> GeoView {
        let mut totals: BTreeMap<&str, i64> = BTreeMap::new();
        for r in filtered {
            *totals.entry(r.store.as_str()).or_insert(0) += r.stock;
        }

        let mut view = GeoView::default();
        for (store, stock) in totals {
            match geo::lookup(store) {
                Some(loc) => view.points.push(GeoPoint {
                    store: store.to_string(),
                    stock,
                    latitude: loc.latitude,
                    longitude: loc.longitude,
                }),
                None => {
                    warn!(store, stock, "store has no known coordinates; omitted from geo view");
                    view.unlocated_stores.push(store.to_string());
                }
            }
        }
        view
    }

    /// Sum stock per calendar month, ascending by month number.
    pub fn aggregate_monthly_trend(filtered: &[InventoryRecord]) -> Vec<MonthlyStock> {
        let mut totals: BTreeMap<u32, i64> = BTreeMap::new();
        for r in filtered {
            *totals.entry(r.month()).or_insert(0) += r.stock;
        }

        totals
            .into_iter()
            .map(|(month, stock)| MonthlyStock {
                month,
                month_name: calendar::month_abbreviation(month).unwrap_or_default(),
                stock,
            })
            .collect()
    }

    /// Sum stock per category, ascending by total so the largest is last.
    ///
    /// Ties keep alphabetical category order.
    pub fn aggregate_category_ranking(filtered: &[InventoryRecord]) -> Vec<CategoryStock> {
        let mut totals: BTreeMap<&str, i64> = BTreeMap::new();
        for r in filtered {
            *totals.entry(r.category.as_str()).or_insert(0) += r.stock;
        }

        let mut ranking: Vec<CategoryStock> = totals
            .into_iter()
            .map(|(category, stock)| CategoryStock {
                category: category.to_string(),
                stock,
            })
            .collect();
        ranking.sort_by_key(|c| c.stock);
        ranking
    }

    /// Project the summary columns and label each row's stock status.
    pub fn build_summary_table(filtered: &[InventoryRecord]) -> Vec<SummaryRow> {
        filtered
            .iter()
            .map(|r| SummaryRow {
                category: r.category.clone(),
                store: r.store.clone(),
                stock: r.stock,
                stock_minimum: r.stock_minimum,
                unit_cost: r.unit_cost,
                status: r.status(),
            })
            .collect()
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
            unit_cost: 20_000.0,
            intake_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        }
    }

    fn sample() -> Vec<InventoryRecord> {
        vec![
            make_record("Pantalones", "Bogotá", 10, 15, "2023-01-15"),
            make_record("Pantalones", "Bogotá", 30, 15, "2023-02-10"),
            make_record("Blusas", "Medellín", 25, 10, "2023-02-20"),
            make_record("Vestidos", "Cali", 5, 8, "2023-03-03"),
            make_record("Blusas", "Bogotá", 12, 10, "2024-01-08"),
            make_record("Faldas", "Pereira", 7, 2, "2023-03-30"),
        ]
    }

    // ── compute_kpis ──────────────────────────────────────────────────────────

    #[test]
    fn test_compute_kpis() {
        let kpis = InventoryAggregator::compute_kpis(&sample());
        assert_eq!(kpis.total_stock, 89);
        assert!((kpis.total_value - 89.0 * 20_000.0).abs() < 1e-6);
        assert_eq!(kpis.low_stock_count, 2);
    }

    #[test]
    fn test_compute_kpis_empty() {
        assert_eq!(InventoryAggregator::compute_kpis(&[]), Kpis::default());
    }

    // ── filter ────────────────────────────────────────────────────────────────

    #[test]
    fn test_filter_year_only() {
        let filtered = InventoryAggregator::filter(&sample(), &FilterSelection::new(2024));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].category, "Blusas");
    }

    #[test]
    fn test_filter_store_and_category() {
        let sel = FilterSelection::new(2023)
            .with_store(Choice::Only("Bogotá".into()))
            .with_category(Choice::Only("Pantalones".into()));
        let filtered = InventoryAggregator::filter(&sample(), &sel);
        let stocks: Vec<i64> = filtered.iter().map(|r| r.stock).collect();
        assert_eq!(stocks, vec![10, 30]);
    }

    #[test]
    fn test_filter_preserves_order_and_source() {
        let records = sample();
        let before = records.clone();
        let filtered = InventoryAggregator::filter(&records, &FilterSelection::new(2023));
        assert_eq!(records, before);
        let stores: Vec<&str> = filtered.iter().map(|r| r.store.as_str()).collect();
        assert_eq!(stores, vec!["Bogotá", "Bogotá", "Medellín", "Cali", "Pereira"]);
    }

    #[test]
    fn test_filter_no_match_is_empty() {
        let sel = FilterSelection::new(2023).with_store(Choice::Only("Tunja".into()));
        assert!(InventoryAggregator::filter(&sample(), &sel).is_empty());
    }

    // ── aggregate_heatmap ─────────────────────────────────────────────────────

    #[test]
    fn test_heatmap_is_dense_and_sorted() {
        let filtered = InventoryAggregator::filter(&sample(), &FilterSelection::new(2023));
        let heatmap = InventoryAggregator::aggregate_heatmap(&filtered);

        assert_eq!(heatmap.categories, vec!["Blusas", "Faldas", "Pantalones", "Vestidos"]);
        assert_eq!(heatmap.periods, vec!["2023-01", "2023-02", "2023-03"]);
        assert_eq!(heatmap.counts.len(), 4);
        assert!(heatmap.counts.iter().all(|row| row.len() == 3));

        assert_eq!(heatmap.get("Pantalones", "2023-01"), Some(1));
        assert_eq!(heatmap.get("Pantalones", "2023-02"), Some(1));
        assert_eq!(heatmap.get("Pantalones", "2023-03"), Some(0));
        assert_eq!(heatmap.get("Blusas", "2023-01"), Some(0));
        assert_eq!(heatmap.get("Nope", "2023-01"), None);
        assert_eq!(heatmap.max_count(), 1);
    }

    #[test]
    fn test_heatmap_counts_rows_not_stock() {
        let records = vec![
            make_record("Blusas", "Cali", 100, 1, "2023-05-01"),
            make_record("Blusas", "Bogotá", 3, 1, "2023-05-20"),
        ];
        let heatmap = InventoryAggregator::aggregate_heatmap(&records);
        assert_eq!(heatmap.counts, vec![vec![2]]);
    }

    #[test]
    fn test_heatmap_unsorted_input_across_years() {
        let records = vec![
            make_record("Vestidos", "Cali", 1, 0, "2024-01-05"),
            make_record("Blusas", "Cali", 1, 0, "2023-12-01"),
            make_record("Vestidos", "Bogotá", 1, 0, "2023-12-20"),
            make_record("Vestidos", "Cali", 1, 0, "2024-01-30"),
        ];
        let heatmap = InventoryAggregator::aggregate_heatmap(&records);
        assert_eq!(heatmap.categories, vec!["Blusas", "Vestidos"]);
        assert_eq!(heatmap.periods, vec!["2023-12", "2024-01"]);
        assert_eq!(heatmap.counts, vec![vec![1, 0], vec![1, 2]]);
    }

    #[test]
    fn test_heatmap_empty() {
        let heatmap = InventoryAggregator::aggregate_heatmap(&[]);
        assert!(heatmap.is_empty());
        assert!(heatmap.periods.is_empty());
        assert_eq!(heatmap.max_count(), 0);
    }

    // ── aggregate_geo ─────────────────────────────────────────────────────────

    #[test]
    fn test_geo_sums_and_joins_coordinates() {
        let filtered = InventoryAggregator::filter(&sample(), &FilterSelection::new(2023));
        let geo = InventoryAggregator::aggregate_geo(&filtered);

        let bogota = geo.points.iter().find(|p| p.store == "Bogotá").unwrap();
        assert_eq!(bogota.stock, 40);
        assert!((bogota.latitude - 4.7110).abs() < 1e-9);
        assert!((bogota.longitude - -74.0721).abs() < 1e-9);
        assert_eq!(geo.points.len(), 3);
    }

    #[test]
    fn test_geo_omits_unknown_store() {
        let filtered = InventoryAggregator::filter(&sample(), &FilterSelection::new(2023));
        let geo = InventoryAggregator::aggregate_geo(&filtered);
        assert!(geo.points.iter().all(|p| p.store != "Pereira"));
        assert_eq!(geo.unlocated_stores, vec!["Pereira"]);
    }

    #[test]
    fn test_geo_only_unlocated_stores_is_not_empty() {
        let records = vec![make_record("Faldas", "Pereira", 7, 2, "2023-03-30")];
        let geo = InventoryAggregator::aggregate_geo(&records);
        assert!(geo.points.is_empty());
        assert!(!geo.is_empty());
    }

    #[test]
    fn test_geo_empty() {
        let geo = InventoryAggregator::aggregate_geo(&[]);
        assert!(geo.is_empty());
        assert!(geo.unlocated_stores.is_empty());
    }

    // ── aggregate_monthly_trend ───────────────────────────────────────────────

    #[test]
    fn test_monthly_trend_orders_by_month_number() {
        let records = vec![
            make_record("A", "Cali", 4, 0, "2023-11-01"),
            make_record("A", "Cali", 1, 0, "2023-02-01"),
            make_record("B", "Cali", 2, 0, "2023-11-15"),
        ];
        let trend = InventoryAggregator::aggregate_monthly_trend(&records);
        assert_eq!(
            trend,
            vec![
                MonthlyStock { month: 2, month_name: "Feb", stock: 1 },
                MonthlyStock { month: 11, month_name: "Nov", stock: 6 },
            ]
        );
    }

    #[test]
    fn test_monthly_trend_empty() {
        assert!(InventoryAggregator::aggregate_monthly_trend(&[]).is_empty());
    }

    // ── aggregate_category_ranking ────────────────────────────────────────────

    #[test]
    fn test_category_ranking_ascending() {
        let filtered = InventoryAggregator::filter(&sample(), &FilterSelection::new(2023));
        let ranking = InventoryAggregator::aggregate_category_ranking(&filtered);
        let pairs: Vec<(&str, i64)> = ranking
            .iter()
            .map(|c| (c.category.as_str(), c.stock))
            .collect();
        assert_eq!(
            pairs,
            vec![("Vestidos", 5), ("Faldas", 7), ("Blusas", 25), ("Pantalones", 40)]
        );
    }

    #[test]
    fn test_category_ranking_ties_stay_alphabetical() {
        let records = vec![
            make_record("Zapatos", "Cali", 5, 0, "2023-01-01"),
            make_record("Abrigos", "Cali", 5, 0, "2023-01-01"),
        ];
        let ranking = InventoryAggregator::aggregate_category_ranking(&records);
        assert_eq!(ranking[0].category, "Abrigos");
        assert_eq!(ranking[1].category, "Zapatos");
    }

    // ── build_summary_table ───────────────────────────────────────────────────

    #[test]
    fn test_summary_table_projects_and_labels() {
        let filtered = InventoryAggregator::filter(&sample(), &FilterSelection::new(2023));
        let table = InventoryAggregator::build_summary_table(&filtered);
        assert_eq!(table.len(), filtered.len());
        assert_eq!(table[0].status, StockStatus::Low);
        assert_eq!(table[1].status, StockStatus::Ok);
        assert_eq!(table[3].store, "Cali");
        assert_eq!(table[3].status, StockStatus::Low);
        assert!((table[0].unit_cost - 20_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_table_empty() {
        assert!(InventoryAggregator::build_summary_table(&[]).is_empty());
    }
}
