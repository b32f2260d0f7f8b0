//! Interactive filter session.
//!
//! [`DashboardSession`] owns the dataset handle and the current
//! [`FilterSelection`]. Every selection change rebuilds the whole
//! [`DashboardView`] synchronously; nothing is patched incrementally.

use std::sync::Arc;

use inventory_core::models::{Choice, FilterSelection, KpiScope};
use inventory_data::analysis::{build_dashboard, DashboardView};

use crate::dataset_cache::Dataset;

// ── DashboardSession ──────────────────────────────────────────────────────────

pub struct DashboardSession {
    dataset: Arc<Dataset>,
    kpi_scope: KpiScope,
    selection: FilterSelection,
    view: DashboardView,
}

impl DashboardSession {
    /// Start a session at the earliest year with every store and category.
    pub fn new(dataset: Arc<Dataset>, kpi_scope: KpiScope) -> Self {
        let selection = Self::default_selection(&dataset);
        Self::with_selection(dataset, kpi_scope, selection)
    }

    /// Start a session at an explicit selection.
    pub fn with_selection(
        dataset: Arc<Dataset>,
        kpi_scope: KpiScope,
        selection: FilterSelection,
    ) -> Self {
        let view = build_dashboard(dataset.records(), &selection, kpi_scope);
        Self {
            dataset,
            kpi_scope,
            selection,
            view,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    pub fn kpi_scope(&self) -> KpiScope {
        self.kpi_scope
    }

    // ── Selection changes ─────────────────────────────────────────────────

    /// Replace the selection and rebuild the view.
    pub fn set_selection(&mut self, selection: FilterSelection) {
        tracing::debug!(
            year = selection.year,
            store = selection.store.label(),
            category = selection.category.label(),
            "selection changed"
        );
        self.selection = selection;
        self.refresh();
    }

    /// Move to the next (`forward`) or previous available year, wrapping.
    pub fn cycle_year(&mut self, forward: bool) {
        let years = &self.dataset.options().years;
        if years.is_empty() {
            return;
        }
        let next = match years.iter().position(|y| *y == self.selection.year) {
            Some(idx) => years[step(idx, years.len(), forward)],
            None => years[0],
        };
        let selection = FilterSelection {
            year: next,
            ..self.selection.clone()
        };
        self.set_selection(selection);
    }

    /// Step through "all" followed by each store in first-appearance order.
    pub fn cycle_store(&mut self, forward: bool) {
        let store = cycle_choice(&self.selection.store, &self.dataset.options().stores, forward);
        let selection = self.selection.clone().with_store(store);
        self.set_selection(selection);
    }

    /// Step through "all" followed by each category in first-appearance order.
    pub fn cycle_category(&mut self, forward: bool) {
        let category = cycle_choice(
            &self.selection.category,
            &self.dataset.options().categories,
            forward,
        );
        let selection = self.selection.clone().with_category(category);
        self.set_selection(selection);
    }

    /// Back to the earliest year with store and category cleared.
    pub fn reset(&mut self) {
        let selection = Self::default_selection(&self.dataset);
        self.set_selection(selection);
    }

    /// Switch the KPI record set and rebuild the view.
    pub fn set_kpi_scope(&mut self, kpi_scope: KpiScope) {
        self.kpi_scope = kpi_scope;
        self.refresh();
    }

    // ── Private helpers ───────────────────────────────────────────────────

    fn refresh(&mut self) {
        self.view = build_dashboard(self.dataset.records(), &self.selection, self.kpi_scope);
    }

    fn default_selection(dataset: &Dataset) -> FilterSelection {
        // An empty dataset has no years; any year yields the empty view.
        let year = dataset
            .options()
            .default_year()
            .unwrap_or_else(|| chrono::Datelike::year(&chrono::Utc::now()));
        FilterSelection::new(year)
    }
}

/// Index one step away from `idx` in a ring of `len` items.
fn step(idx: usize, len: usize, forward: bool) -> usize {
    if forward {
        (idx + 1) % len
    } else {
        (idx + len - 1) % len
    }
}

/// Next value in the ring `[All, values[0], values[1], ...]`.
fn cycle_choice(current: &Choice, values: &[String], forward: bool) -> Choice {
    let ring_len = values.len() + 1;
    let idx = match current {
        Choice::All => 0,
        Choice::Only(v) => values.iter().position(|x| x == v).map_or(0, |i| i + 1),
    };
    match step(idx, ring_len, forward) {
        0 => Choice::All,
        i => Choice::Only(values[i - 1].clone()),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
