use std::path::Path;

use crate::data::filter::{filtered_indices, FilterSelection};
use crate::data::loader;
use crate::data::model::{Dimension, SalesDataset};
use crate::data::present::ChartConfig;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<SalesDataset>,

    /// Per-dimension filter selections. Empty set = no restriction.
    pub filters: FilterSelection,

    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// What the dashboard displays (top-k, month range).
    pub chart_config: ChartConfig,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            filters: FilterSelection::default(),
            visible_indices: Vec::new(),
            chart_config: ChartConfig::default(),
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset: all filters cleared, all records visible.
    pub fn set_dataset(&mut self, dataset: SalesDataset) {
        self.filters = FilterSelection::default();
        self.visible_indices = (0..dataset.len()).collect();
        self.dataset = Some(dataset);
        self.status_message = None;
        self.loading = false;
    }

    /// Load a sales file, replacing the current dataset on success.
    pub fn load_file(&mut self, path: &Path) {
        self.loading = true;
        match loader::load_file(path) {
            Ok(dataset) => {
                log::info!("Loaded {} sales records from {}", dataset.len(), path.display());
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
                self.loading = false;
            }
        }
    }

    /// Recompute `visible_indices` after a filter change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filtered_indices(ds, &self.filters);
        }
    }

    /// Toggle a single value in a dimension's selection.
    pub fn toggle_filter_value(&mut self, dim: Dimension, value: &str) {
        let selected = self.filters.entry(dim).or_default();
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
        self.refilter();
    }

    /// Drop every selected value for a dimension, lifting its restriction.
    pub fn clear_dimension(&mut self, dim: Dimension) {
        if let Some(selected) = self.filters.get_mut(&dim) {
            selected.clear();
        }
        self.refilter();
    }
}
