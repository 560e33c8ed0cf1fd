use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use super::model::{EnhancerDataset, HofEnhancer, MetadataRecord};

// ---------------------------------------------------------------------------
// Filter fields and selection
// ---------------------------------------------------------------------------

/// The six sidebar filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Enhancer,
    Cargo,
    Experiment,
    Gene,
    GcDelivered,
    CellType,
}

impl FilterField {
    pub const ALL: [FilterField; 6] = [
        FilterField::Enhancer,
        FilterField::Cargo,
        FilterField::Experiment,
        FilterField::Gene,
        FilterField::GcDelivered,
        FilterField::CellType,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FilterField::Enhancer => "Select Enhancer",
            FilterField::Cargo => "Filter by Cargo",
            FilterField::Experiment => "Filter by Experiment",
            FilterField::Gene => "Filter by Proximal Gene",
            FilterField::GcDelivered => "Filter by GC Delivered",
            FilterField::CellType => "Filter by Cell Type",
        }
    }

    pub fn help(self) -> &'static str {
        match self {
            FilterField::Enhancer => "Choose a specific enhancer to analyze",
            FilterField::Cargo => "Filter by experimental cargo type",
            FilterField::Experiment => "Filter by experiment identifier",
            FilterField::Gene => "Filter by nearest gene",
            FilterField::GcDelivered => "Filter by genome copies delivered",
            FilterField::CellType => "Filter by cell type for accessibility tracks",
        }
    }

    /// The metadata value this filter compares against.  Cell type lives in
    /// the peak table, not the metadata.
    fn metadata_value(self, record: &MetadataRecord) -> Option<&str> {
        match self {
            FilterField::Enhancer => Some(record.enhancer_id.as_str()),
            FilterField::Cargo => record.cargo.as_deref(),
            FilterField::Experiment => record.experiment.as_deref(),
            FilterField::Gene => record.proximal_gene.as_deref(),
            FilterField::GcDelivered => record.gc_delivered.as_deref(),
            FilterField::CellType => None,
        }
    }
}

/// Current sidebar selection.  `None` means "All".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub enhancer: Option<String>,
    pub cargo: Option<String>,
    pub experiment: Option<String>,
    pub gene: Option<String>,
    pub gc_delivered: Option<String>,
    pub cell_type: Option<String>,
}

impl FilterSelection {
    pub fn get(&self, field: FilterField) -> Option<&str> {
        match field {
            FilterField::Enhancer => self.enhancer.as_deref(),
            FilterField::Cargo => self.cargo.as_deref(),
            FilterField::Experiment => self.experiment.as_deref(),
            FilterField::Gene => self.gene.as_deref(),
            FilterField::GcDelivered => self.gc_delivered.as_deref(),
            FilterField::CellType => self.cell_type.as_deref(),
        }
    }

    pub fn slot_mut(&mut self, field: FilterField) -> &mut Option<String> {
        match field {
            FilterField::Enhancer => &mut self.enhancer,
            FilterField::Cargo => &mut self.cargo,
            FilterField::Experiment => &mut self.experiment,
            FilterField::Gene => &mut self.gene,
            FilterField::GcDelivered => &mut self.gc_delivered,
            FilterField::CellType => &mut self.cell_type,
        }
    }

    /// Whether any of cargo / experiment / gene / GC delivered is active.
    pub fn has_metadata_constraints(&self) -> bool {
        [
            FilterField::Cargo,
            FilterField::Experiment,
            FilterField::Gene,
            FilterField::GcDelivered,
        ]
        .into_iter()
        .any(|f| self.get(f).is_some())
    }

    /// Does `record` pass every active metadata filter in `fields`?
    fn matches(&self, record: &MetadataRecord, fields: &[FilterField]) -> bool {
        fields.iter().all(|&field| match self.get(field) {
            None => true,
            Some(wanted) => field.metadata_value(record) == Some(wanted),
        })
    }

    /// Reset every selection that is no longer offered back to "All".
    /// Returns whether anything changed.
    pub fn reconcile(&mut self, options: &FilterOptions) -> bool {
        let mut changed = false;
        for field in FilterField::ALL {
            let offered = options.for_field(field);
            let slot = self.slot_mut(field);
            if slot.as_ref().is_some_and(|v| !offered.contains(v)) {
                *slot = None;
                changed = true;
            }
        }
        changed
    }
}

// ---------------------------------------------------------------------------
// Cascading options
// ---------------------------------------------------------------------------

/// Values offered by each filter, given the current selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptions {
    pub enhancers: Vec<String>,
    pub cargos: Vec<String>,
    pub experiments: Vec<String>,
    pub genes: Vec<String>,
    pub gc_delivered: Vec<String>,
    pub cell_types: Vec<String>,
}

impl FilterOptions {
    /// Options of each metadata filter come from the Hall of Fame metadata
    /// narrowed by every *other* active metadata filter.  Cell types are
    /// independent of the selection.
    pub fn compute(dataset: &EnhancerDataset, selection: &FilterSelection) -> Self {
        let hof_ids = dataset.hof_ids();
        let base: Vec<&MetadataRecord> = dataset
            .metadata
            .iter()
            .filter(|m| hof_ids.contains(m.enhancer_id.as_str()))
            .collect();

        let options_for = |target: FilterField| -> Vec<String> {
            let others: Vec<FilterField> = FilterField::ALL
                .into_iter()
                .filter(|&f| f != target && f != FilterField::CellType)
                .collect();
            let values: BTreeSet<&str> = base
                .iter()
                .filter(|m| selection.matches(m, &others))
                .filter_map(|m| target.metadata_value(m))
                .filter(|v| !v.is_empty())
                .collect();
            let mut values: Vec<String> = values.into_iter().map(str::to_string).collect();
            values.sort_by(|a, b| compare_labels(a, b));
            values
        };

        FilterOptions {
            enhancers: options_for(FilterField::Enhancer),
            cargos: options_for(FilterField::Cargo),
            experiments: options_for(FilterField::Experiment),
            genes: options_for(FilterField::Gene),
            gc_delivered: options_for(FilterField::GcDelivered),
            cell_types: dataset.cell_types.clone(),
        }
    }

    pub fn for_field(&self, field: FilterField) -> &[String] {
        match field {
            FilterField::Enhancer => &self.enhancers,
            FilterField::Cargo => &self.cargos,
            FilterField::Experiment => &self.experiments,
            FilterField::Gene => &self.genes,
            FilterField::GcDelivered => &self.gc_delivered,
            FilterField::CellType => &self.cell_types,
        }
    }
}

/// Numeric labels (GC delivered) compare by value, everything else as text.
pub fn compare_labels(a: &str, b: &str) -> Ordering {
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) => x.total_cmp(&y).then_with(|| a.cmp(b)),
        _ => a.cmp(b),
    }
}

/// Compute options and reconcile the selection against them until stable.
pub fn refresh(dataset: &EnhancerDataset, selection: &mut FilterSelection) -> FilterOptions {
    loop {
        let options = FilterOptions::compute(dataset, selection);
        // Each pass clears at least one slot, so this ends within six passes.
        if !selection.reconcile(&options) {
            return options;
        }
    }
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// Indices of the Hall of Fame enhancers and metadata records that pass the
/// metadata filters.  The enhancer selection does not narrow the view; it
/// picks which enhancer the detail panel shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredView {
    /// Indices into `dataset.hof_enhancers`, one per enhancer id.
    pub enhancers: Vec<usize>,
    /// Indices into `dataset.metadata` for those enhancers.
    pub metadata: Vec<usize>,
}

impl FilteredView {
    pub fn apply(dataset: &EnhancerDataset, selection: &FilterSelection) -> Self {
        let mut included: HashSet<&str> = dataset.hof_ids().into_iter().collect();

        if selection.has_metadata_constraints() {
            let metadata_fields = [
                FilterField::Cargo,
                FilterField::Experiment,
                FilterField::Gene,
                FilterField::GcDelivered,
            ];
            let matching: HashSet<&str> = dataset
                .metadata
                .iter()
                .filter(|m| selection.matches(m, &metadata_fields))
                .map(|m| m.enhancer_id.as_str())
                .collect();
            included.retain(|id| matching.contains(id));
        }

        let mut seen = HashSet::new();
        let enhancers = dataset
            .hof_enhancers
            .iter()
            .enumerate()
            .filter(|(_, e)| included.contains(e.enhancer_id.as_str()))
            .filter(|(_, e)| seen.insert(e.enhancer_id.as_str()))
            .map(|(i, _)| i)
            .collect();
        let metadata = dataset
            .metadata
            .iter()
            .enumerate()
            .filter(|(_, m)| included.contains(m.enhancer_id.as_str()))
            .map(|(i, _)| i)
            .collect();

        FilteredView {
            enhancers,
            metadata,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.enhancers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.enhancers.len()
    }

    pub fn enhancers<'a>(&'a self, dataset: &'a EnhancerDataset) -> impl Iterator<Item = &'a HofEnhancer> + 'a {
        self.enhancers.iter().map(|&i| &dataset.hof_enhancers[i])
    }

    /// The visible enhancer with this id, if any.
    pub fn enhancer<'a>(&self, dataset: &'a EnhancerDataset, enhancer_id: &str) -> Option<&'a HofEnhancer> {
        self.enhancers
            .iter()
            .map(|&i| &dataset.hof_enhancers[i])
            .find(|e| e.enhancer_id == enhancer_id)
    }

    /// Visible metadata records of one enhancer, in file order.
    pub fn metadata_for<'a>(
        &'a self,
        dataset: &'a EnhancerDataset,
        enhancer_id: &'a str,
    ) -> impl Iterator<Item = &'a MetadataRecord> + 'a {
        self.metadata
            .iter()
            .map(|&i| &dataset.metadata[i])
            .filter(move |m| m.enhancer_id == enhancer_id)
    }
}

/// Indices of an enhancer's peak rows, optionally restricted to a cell type.
pub fn peak_indices(dataset: &EnhancerDataset, enhancer_id: &str, cell_type: Option<&str>) -> Vec<usize> {
    dataset
        .peak_indices(enhancer_id)
        .iter()
        .copied()
        .filter(|&i| cell_type.map_or(true, |ct| dataset.peaks[i].cell_type == ct))
        .collect()
}
