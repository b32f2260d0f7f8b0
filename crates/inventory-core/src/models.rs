use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar;

/// One row of the inventory dataset.
///
/// Records are never mutated after load. The derived values (`total_value`,
/// `year`, `month`, `period_key`) are methods so they always agree with the
/// stored inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    /// Product category (fabric type / line).
    pub category: String,
    /// Store / location name.
    pub store: String,
    /// Current unit count.
    pub stock: i64,
    /// Reorder threshold.
    pub stock_minimum: i64,
    /// Cost per unit.
    pub unit_cost: f64,
    /// Date the stock entry was recorded.
    pub intake_date: NaiveDate,
}

impl InventoryRecord {
    /// `stock * unit_cost`.
    pub fn total_value(&self) -> f64 {
        self.stock as f64 * self.unit_cost
    }

    /// Calendar year of the intake date.
    pub fn year(&self) -> i32 {
        self.intake_date.year()
    }

    /// Calendar month of the intake date, `1..=12`.
    pub fn month(&self) -> u32 {
        self.intake_date.month()
    }

    /// Sortable `"YYYY-MM"` label.
    pub fn period_key(&self) -> String {
        calendar::period_key(self.year(), self.month())
    }

    /// `true` when stock is below the reorder threshold.
    pub fn is_low_stock(&self) -> bool {
        self.stock < self.stock_minimum
    }

    pub fn status(&self) -> StockStatus {
        if self.is_low_stock() {
            StockStatus::Low
        } else {
            StockStatus::Ok
        }
    }
}

/// Per-row stock health shown in the summary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    Low,
    Ok,
}

impl StockStatus {
    /// Machine label: `"low"` / `"ok"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::Low => "low",
            StockStatus::Ok => "ok",
        }
    }

    /// Label shown to the user in the summary table.
    pub fn display_label(&self) -> &'static str {
        match self {
            StockStatus::Low => "Bajo Stock",
            StockStatus::Ok => "OK",
        }
    }
}

// ── FilterSelection ───────────────────────────────────────────────────────────

/// A single filter control: either the "all" sentinel or one exact value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    #[default]
    All,
    Only(String),
}

impl Choice {
    /// Parse a user-supplied value. Empty, `"all"` and `"todas"` (any case)
    /// mean [`Choice::All`].
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("all")
            || trimmed.eq_ignore_ascii_case("todas")
        {
            Choice::All
        } else {
            Choice::Only(trimmed.to_string())
        }
    }

    /// `true` when `value` passes this filter.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(expected) => expected == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Choice::All)
    }

    /// Label for the filter panel.
    pub fn label(&self) -> &str {
        match self {
            Choice::All => "Todas",
            Choice::Only(v) => v.as_str(),
        }
    }
}

/// The user's current filter selection. Transient; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    /// Always applied.
    pub year: i32,
    pub store: Choice,
    pub category: Choice,
}

impl FilterSelection {
    /// Selection for `year` with store and category set to "all".
    pub fn new(year: i32) -> Self {
        Self {
            year,
            store: Choice::All,
            category: Choice::All,
        }
    }

    pub fn with_store(mut self, store: Choice) -> Self {
        self.store = store;
        self
    }

    pub fn with_category(mut self, category: Choice) -> Self {
        self.category = category;
        self
    }

    /// Conjunction of the three predicates.
    pub fn matches(&self, record: &InventoryRecord) -> bool {
        record.year() == self.year
            && self.store.matches(&record.store)
            && self.category.matches(&record.category)
    }
}

// ── KPIs ──────────────────────────────────────────────────────────────────────

/// The three top-level scalar summaries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    pub total_stock: i64,
    pub total_value: f64,
    pub low_stock_count: usize,
}

/// Which record set the KPI cards summarise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KpiScope {
    /// The whole dataset, ignoring every filter.
    #[default]
    Full,
    /// Only the records matching the current selection.
    Filtered,
}

impl KpiScope {
    /// Resolve a settings string. Unknown names fall back to [`KpiScope::Full`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "filtered" => KpiScope::Filtered,
            _ => KpiScope::Full,
        }
    }
}
