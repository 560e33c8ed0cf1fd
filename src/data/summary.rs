use std::collections::HashSet;

use super::filter::FilteredView;
use super::model::{EnhancerDataset, MetadataRecord, PeakRecord};

/// Shown when an enhancer has no visible metadata.
pub const NOT_AVAILABLE: &str = "N/A";

// ---------------------------------------------------------------------------
// Dataset statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetSummary {
    pub total_enhancers: usize,
    pub total_measurements: usize,
    pub cell_types: usize,
    pub chromosomes: usize,
    pub max_accessibility: f64,
    pub mean_accessibility: f64,
}

impl DatasetSummary {
    pub fn from_peaks(peaks: &[PeakRecord]) -> Self {
        if peaks.is_empty() {
            return Self::default();
        }
        let distinct = |f: fn(&PeakRecord) -> &str| peaks.iter().map(f).collect::<HashSet<_>>().len();
        let stats = AccessibilityStats::from_peaks(peaks.iter());

        DatasetSummary {
            total_enhancers: distinct(|p| p.enhancer_id.as_str()),
            total_measurements: peaks.len(),
            cell_types: distinct(|p| p.cell_type.as_str()),
            chromosomes: distinct(|p| p.chr.as_str()),
            max_accessibility: stats.max,
            mean_accessibility: stats.mean,
        }
    }
}

/// Count / mean / max of a set of accessibility measurements.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AccessibilityStats {
    pub count: usize,
    pub mean: f64,
    pub max: f64,
}

impl AccessibilityStats {
    pub fn from_peaks<'a>(peaks: impl Iterator<Item = &'a PeakRecord>) -> Self {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut max = f64::NEG_INFINITY;
        for peak in peaks {
            count += 1;
            sum += peak.accessibility;
            max = max.max(peak.accessibility);
        }
        if count == 0 {
            return Self::default();
        }
        AccessibilityStats {
            count,
            mean: sum / count as f64,
            max,
        }
    }
}

// ---------------------------------------------------------------------------
// Integrity report (logged at load)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntegrityReport {
    pub peak_rows: usize,
    pub peak_enhancers: usize,
    pub cell_types: usize,
    pub metadata_rows: usize,
    pub metadata_enhancers: usize,
    pub common_enhancers: usize,
}

impl IntegrityReport {
    pub fn validate(peaks: &[PeakRecord], metadata: &[MetadataRecord]) -> Self {
        let peak_ids: HashSet<&str> = peaks.iter().map(|p| p.enhancer_id.as_str()).collect();
        let meta_ids: HashSet<&str> = metadata.iter().map(|m| m.enhancer_id.as_str()).collect();
        let cell_types: HashSet<&str> = peaks.iter().map(|p| p.cell_type.as_str()).collect();

        IntegrityReport {
            peak_rows: peaks.len(),
            peak_enhancers: peak_ids.len(),
            cell_types: cell_types.len(),
            metadata_rows: metadata.len(),
            metadata_enhancers: meta_ids.len(),
            common_enhancers: peak_ids.intersection(&meta_ids).count(),
        }
    }

    pub fn log(&self) {
        if self.peak_rows == 0 {
            log::warn!("Peak data missing or empty");
        } else {
            log::info!(
                "Peak data: {} rows, {} unique enhancers, {} cell types",
                self.peak_rows,
                self.peak_enhancers,
                self.cell_types
            );
        }
        if self.metadata_rows == 0 {
            log::warn!("Metadata missing or empty");
        } else {
            log::info!(
                "Metadata: {} records, {} unique enhancers",
                self.metadata_rows,
                self.metadata_enhancers
            );
        }
        log::info!("Common enhancers between datasets: {}", self.common_enhancers);
    }
}

// ---------------------------------------------------------------------------
// "Available Enhancers" table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub enhancer: String,
    pub location: String,
    pub length: i64,
    pub cargo: String,
    pub experiment: String,
    pub gene: String,
    pub gc_delivered: String,
    /// Distinct experiments among the enhancer's visible records.
    pub experiments: usize,
}

/// One row per visible enhancer.  Metadata columns come from the enhancer's
/// first visible record.
pub fn summary_rows(dataset: &EnhancerDataset, view: &FilteredView) -> Vec<SummaryRow> {
    view.enhancers(dataset)
        .map(|enhancer| {
            let records: Vec<&MetadataRecord> =
                view.metadata_for(dataset, &enhancer.enhancer_id).collect();
            let first = records.first();
            let field = |get: fn(&MetadataRecord) -> &Option<String>| {
                first
                    .and_then(|m| get(m).clone())
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string())
            };
            let experiments = records
                .iter()
                .filter_map(|m| m.experiment.as_deref())
                .collect::<HashSet<_>>()
                .len();

            SummaryRow {
                enhancer: enhancer.enhancer_id.clone(),
                location: enhancer.location(),
                length: enhancer.length(),
                cargo: field(|m| &m.cargo),
                experiment: field(|m| &m.experiment),
                gene: field(|m| &m.proximal_gene),
                gc_delivered: field(|m| &m.gc_delivered),
                experiments,
            }
        })
        .collect()
}

/// `12345678` → `12,345,678`
pub fn format_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
