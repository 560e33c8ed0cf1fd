use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::color::ColorMap;
use crate::data::filter::{refresh, FilterField, FilterOptions, FilterSelection, FilteredView};
use crate::data::loader::{load_all, LoadConfig};
use crate::data::model::EnhancerDataset;
use crate::data::summary::DatasetSummary;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Where the current dataset is (re)loaded from.
    pub load_config: LoadConfig,

    /// Loaded dataset (None until a load succeeds).
    pub dataset: Option<EnhancerDataset>,

    /// Statistics of the loaded peak table.
    pub summary: Option<DatasetSummary>,

    /// Sidebar selection.
    pub selection: FilterSelection,

    /// Values offered by each sidebar filter (cached).
    pub options: FilterOptions,

    /// Enhancers and metadata passing the current filters (cached).
    pub view: FilteredView,

    /// Colour per cell type.
    pub cell_colors: Option<ColorMap>,

    /// Load error shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(load_config: LoadConfig) -> Self {
        Self {
            load_config,
            dataset: None,
            summary: None,
            selection: FilterSelection::default(),
            options: FilterOptions::default(),
            view: FilteredView::default(),
            cell_colors: None,
            status_message: None,
        }
    }

    /// (Re)load the dataset from `load_config`.  Failures are logged and
    /// kept in `status_message`; the previous dataset is kept.
    pub fn reload(&mut self) {
        match self.try_load() {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} peak rows, {} Hall of Fame enhancers",
                    dataset.peaks.len(),
                    dataset.hof_enhancers.len()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load data: {e:#}");
                self.status_message = Some(format!("Error loading data: {e:#}"));
            }
        }
    }

    fn try_load(&self) -> Result<EnhancerDataset> {
        load_all(&self.load_config)
            .with_context(|| format!("loading data from {}", self.load_config.data_dir.display()))
    }

    /// Point the loader at another directory and reload.
    pub fn load_from_dir(&mut self, dir: PathBuf) {
        self.load_config.data_dir = dir;
        self.reload();
    }

    /// Ingest a newly loaded dataset and reset the filters.
    pub fn set_dataset(&mut self, dataset: EnhancerDataset) {
        self.summary = Some(DatasetSummary::from_peaks(&dataset.peaks));
        self.cell_colors = Some(ColorMap::new(&dataset.cell_types));
        self.selection = FilterSelection::default();
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute options, drop stale selections and rebuild the view.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.options = refresh(ds, &mut self.selection);
            self.view = FilteredView::apply(ds, &self.selection);
        }
    }

    /// Change one filter; `None` selects "All".
    pub fn set_filter(&mut self, field: FilterField, value: Option<String>) {
        let slot = self.selection.slot_mut(field);
        if *slot == value {
            return;
        }
        *slot = value;
        self.refilter();
    }

    pub fn reset_filters(&mut self) {
        self.selection = FilterSelection::default();
        self.refilter();
    }
}
