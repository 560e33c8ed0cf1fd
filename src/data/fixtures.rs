//! Small in-memory datasets shared by the data-layer tests.

use std::path::PathBuf;

use super::hall_of_fame::extract_hof_enhancers;
use super::model::{EnhancerDataset, MetadataRecord, PeakRecord};

pub fn peak(enhancer_id: &str, cell_type: &str, accessibility: f64) -> PeakRecord {
    PeakRecord {
        enhancer_id: enhancer_id.to_string(),
        chr: "chr1".to_string(),
        start: 1_000,
        end: 1_500,
        cell_type: cell_type.to_string(),
        accessibility,
        position: None,
    }
}

pub fn meta(
    enhancer_id: &str,
    hall_of_fame: bool,
    cargo: Option<&str>,
    experiment: Option<&str>,
    proximal_gene: Option<&str>,
    gc_delivered: Option<&str>,
) -> MetadataRecord {
    MetadataRecord {
        enhancer_id: enhancer_id.to_string(),
        hall_of_fame,
        cargo: cargo.map(str::to_string),
        experiment: experiment.map(str::to_string),
        proximal_gene: proximal_gene.map(str::to_string),
        gc_delivered: gc_delivered.map(str::to_string),
        imaging: Default::default(),
    }
}

/// Three Hall of Fame enhancers (eA, eB, eC) and one regular enhancer (eN).
pub fn sample_dataset() -> EnhancerDataset {
    let metadata = vec![
        meta("eA", true, Some("SYFP2"), Some("EPI"), Some("Gad2"), Some("500000000000")),
        meta("eA", true, Some("SYFP2"), Some("LIGHTSHEET"), Some("Gad2"), Some("1000000000000")),
        meta("eB", true, Some("iCre"), Some("EPI"), Some("Sst"), Some("500000000000")),
        meta("eC", true, Some("SYFP2"), Some("LIGHTSHEET"), Some("Pvalb"), Some("1000000000000")),
        meta("eN", false, Some("Flp"), Some("EPI"), Some("Vip"), Some("200000000000")),
    ];
    let peaks = vec![
        peak("eA", "1 L2/3 IT", 0.5),
        peak("eA", "2 L4 IT", 0.9),
        peak("eA", "10 L5 ET", 0.2),
        peak("eB", "1 L2/3 IT", 0.1),
        peak("eC", "2 L4 IT", 0.7),
        peak("eN", "1 L2/3 IT", 0.3),
    ];
    let hof = extract_hof_enhancers(&metadata, &peaks);
    EnhancerDataset::new(peaks, metadata, hof, PathBuf::from("."))
}
