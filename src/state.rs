use std::sync::Arc;

use eframe::egui::Color32;

use crate::data::aggregate::{apply, DashboardView};
use crate::data::filter::FilterSelection;
use crate::data::model::{Dimension, SalesDataset};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Shared, read-only dataset from the cache.
    pub dataset: Arc<SalesDataset>,

    /// Per-dimension filter selections.
    pub selection: FilterSelection,

    /// Engine output for the current selection.
    pub view: DashboardView,

    /// Fill colour of both bar charts.
    pub bar_color: Color32,
}

impl AppState {
    /// Start with every value selected, the way the sidebar defaults.
    pub fn new(dataset: Arc<SalesDataset>, bar_color: Color32) -> Self {
        let selection = FilterSelection::all(&dataset);
        let view = apply(&dataset, &selection);
        Self {
            dataset,
            selection,
            view,
            bar_color,
        }
    }

    /// Recompute the view after a filter change.
    pub fn refilter(&mut self) {
        self.view = apply(&self.dataset, &self.selection);
        log::debug!(
            "Selection matches {} of {} rows",
            self.view.rows.len(),
            self.dataset.len()
        );
    }

    /// Toggle a single value in a dimension's filter.
    pub fn toggle_value(&mut self, dim: Dimension, value: &str) {
        self.selection.toggle(dim, value);
        self.refilter();
    }

    /// Select all observed values of a dimension.
    pub fn select_all(&mut self, dim: Dimension) {
        let values = self.dataset.distinct_values(dim).to_vec();
        self.selection = std::mem::take(&mut self.selection).with(dim, values);
        self.refilter();
    }

    /// Deselect all values of a dimension.
    pub fn select_none(&mut self, dim: Dimension) {
        self.selection.clear(dim);
        self.refilter();
    }
}
