use std::collections::{BTreeMap, BTreeSet};

use super::model::{HofEnhancer, MetadataRecord, PeakRecord};

/// Metadata fields merged onto an enhancer: the first non-empty value of
/// each field across the enhancer's records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedMetadata {
    pub cargo: Option<String>,
    pub experiment: Option<String>,
    pub proximal_gene: Option<String>,
    pub gc_delivered: Option<String>,
}

impl MergedMetadata {
    fn absorb(&mut self, record: &MetadataRecord) {
        fill(&mut self.cargo, &record.cargo);
        fill(&mut self.experiment, &record.experiment);
        fill(&mut self.proximal_gene, &record.proximal_gene);
        fill(&mut self.gc_delivered, &record.gc_delivered);
    }
}

fn fill(slot: &mut Option<String>, value: &Option<String>) {
    if slot.is_none() {
        slot.clone_from(value);
    }
}

/// Per-enhancer merge of the metadata records.
pub fn merged_metadata_by_enhancer(metadata: &[MetadataRecord]) -> BTreeMap<&str, MergedMetadata> {
    let mut merged: BTreeMap<&str, MergedMetadata> = BTreeMap::new();
    for record in metadata {
        merged
            .entry(record.enhancer_id.as_str())
            .or_default()
            .absorb(record);
    }
    merged
}

/// Build the Hall of Fame enhancer list.
///
/// Hall of Fame ids come from the metadata.  Each id that has peak rows gets
/// its coordinates from its first peak row and is left-joined with its
/// merged metadata.  Ids without peak rows are dropped.  Sorted by id.
pub fn extract_hof_enhancers(metadata: &[MetadataRecord], peaks: &[PeakRecord]) -> Vec<HofEnhancer> {
    if peaks.is_empty() {
        return Vec::new();
    }
    if metadata.is_empty() {
        log::warn!("No metadata available - cannot identify Hall of Fame enhancers");
        return Vec::new();
    }

    let hof_ids: BTreeSet<&str> = metadata
        .iter()
        .filter(|m| m.hall_of_fame)
        .map(|m| m.enhancer_id.as_str())
        .collect();
    log::info!("Found {} unique Hall of Fame enhancers in metadata", hof_ids.len());
    if hof_ids.is_empty() {
        log::warn!("No Hall of Fame enhancers found in metadata");
        return Vec::new();
    }

    let mut first_peak: BTreeMap<&str, &PeakRecord> = BTreeMap::new();
    for peak in peaks {
        if hof_ids.contains(peak.enhancer_id.as_str()) {
            first_peak.entry(peak.enhancer_id.as_str()).or_insert(peak);
        }
    }

    let merged = merged_metadata_by_enhancer(metadata);
    let enhancers: Vec<HofEnhancer> = first_peak
        .into_values()
        .map(|peak| {
            let meta = merged
                .get(peak.enhancer_id.as_str())
                .cloned()
                .unwrap_or_default();
            HofEnhancer {
                enhancer_id: peak.enhancer_id.clone(),
                chr: peak.chr.clone(),
                start: peak.start,
                end: peak.end,
                cargo: meta.cargo,
                experiment: meta.experiment,
                proximal_gene: meta.proximal_gene,
                gc_delivered: meta.gc_delivered,
            }
        })
        .collect();

    let missing_peaks = hof_ids.len() - enhancers.len();
    if missing_peaks > 0 {
        log::warn!("{missing_peaks} Hall of Fame enhancers have no peak data");
    }
    let with_cargo = enhancers.iter().filter(|e| e.cargo.is_some()).count();
    log::info!("Cargo merge success: {with_cargo}/{} enhancers", enhancers.len());

    enhancers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{meta, peak};

    #[test]
    fn extracts_hof_enhancers_with_peaks_only() {
        let metadata = vec![
            meta("eB", true, Some("SYFP2"), Some("EPI"), Some("Sst"), Some("1e11")),
            meta("eA", true, None, Some("EPI"), Some("Gad2"), None),
            meta("eA", false, Some("iCre"), Some("LIGHTSHEET"), None, Some("5e11")),
            meta("eX", true, Some("SYFP2"), None, None, None),
            meta("eN", false, Some("SYFP2"), None, None, None),
        ];
        let peaks = vec![
            peak("eN", "1 L2/3 IT", 0.1),
            peak("eB", "1 L2/3 IT", 0.2),
            peak("eA", "2 L4 IT", 0.3),
            peak("eA", "1 L2/3 IT", 0.4),
        ];

        let hof = extract_hof_enhancers(&metadata, &peaks);
        let ids: Vec<_> = hof.iter().map(|e| e.enhancer_id.as_str()).collect();
        assert_eq!(ids, vec!["eA", "eB"]);

        // First non-empty value per field across eA's records.
        assert_eq!(hof[0].cargo.as_deref(), Some("iCre"));
        assert_eq!(hof[0].experiment.as_deref(), Some("EPI"));
        assert_eq!(hof[0].proximal_gene.as_deref(), Some("Gad2"));
        assert_eq!(hof[0].gc_delivered.as_deref(), Some("5e11"));
    }

    #[test]
    fn empty_inputs_yield_no_enhancers() {
        let metadata = vec![meta("eA", true, None, None, None, None)];
        let peaks = vec![peak("eA", "1 L2/3 IT", 0.1)];

        assert!(extract_hof_enhancers(&metadata, &[]).is_empty());
        assert!(extract_hof_enhancers(&[], &peaks).is_empty());

        let not_hof = vec![meta("eA", false, None, None, None, None)];
        assert!(extract_hof_enhancers(&not_hof, &peaks).is_empty());
    }
}
