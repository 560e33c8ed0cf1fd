use super::filter::{FilterSelection, FilteredView};
use super::model::{EnhancerDataset, MetadataRecord};

/// Marker the metadata uses for "no image".
const NO_LINK: &str = "FALSE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImagingKind {
    ContactSheet,
    Viewer,
    MipProjection,
}

impl ImagingKind {
    pub fn heading(self) -> &'static str {
        match self {
            ImagingKind::ContactSheet => "Contact Sheets",
            ImagingKind::Viewer => "Neuroglancer Viewers",
            ImagingKind::MipProjection => "MIP Projections",
        }
    }

    /// `Contact Sheet 1`, `Viewer 2`, ...
    pub fn item_label(self, index: usize) -> String {
        let noun = match self {
            ImagingKind::ContactSheet => "Contact Sheet",
            ImagingKind::Viewer => "Viewer",
            ImagingKind::MipProjection => "MIP Projection",
        };
        format!("{noun} {}", index + 1)
    }

    /// Images are drawn inline; viewers are interactive pages opened as links.
    pub fn is_image(self) -> bool {
        !matches!(self, ImagingKind::Viewer)
    }
}

/// Section order for an experiment type.
pub fn section_order(experiment: &str) -> [ImagingKind; 3] {
    use ImagingKind::*;
    match experiment.trim().to_ascii_uppercase().as_str() {
        "LIGHTSHEET" => [Viewer, MipProjection, ContactSheet],
        "EPI" => [ContactSheet, Viewer, MipProjection],
        _ => [ContactSheet, Viewer, MipProjection],
    }
}

/// Split a link cell into URLs.  Empty and `FALSE` cells hold none.
pub fn split_links(value: Option<&str>) -> Vec<String> {
    match value.map(str::trim) {
        None | Some("") | Some(NO_LINK) => Vec::new(),
        Some(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImagingSection {
    pub kind: ImagingKind,
    pub urls: Vec<String>,
}

/// Imaging links of one metadata record, grouped and ordered for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagingPanel {
    pub sections: Vec<ImagingSection>,
}

impl ImagingPanel {
    pub fn from_record(record: &MetadataRecord) -> Self {
        let links = &record.imaging;
        let urls_of = |kind: ImagingKind| -> Vec<String> {
            let fields: Vec<&Option<String>> = match kind {
                ImagingKind::ContactSheet => vec![&links.image_link],
                ImagingKind::Viewer => vec![&links.neuroglancer_1, &links.neuroglancer_3, &links.viewer_link],
                ImagingKind::MipProjection => vec![&links.coronal_mip, &links.sagittal_mip],
            };
            fields
                .iter()
                .flat_map(|field| split_links(field.as_deref()))
                .collect()
        };

        let sections = section_order(record.experiment.as_deref().unwrap_or_default())
            .into_iter()
            .map(|kind| ImagingSection {
                kind,
                urls: urls_of(kind),
            })
            .filter(|section| !section.urls.is_empty())
            .collect();

        ImagingPanel { sections }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Pick the metadata record whose imaging is shown for `enhancer_id`.
///
/// Prefers a visible record matching the selected experiment (and GC
/// delivered, when selected); otherwise any visible record of the enhancer.
pub fn select_imaging_record<'a>(
    dataset: &'a EnhancerDataset,
    view: &'a FilteredView,
    enhancer_id: &'a str,
    selection: &FilterSelection,
) -> Option<&'a MetadataRecord> {
    let exact = view.metadata_for(dataset, enhancer_id).find(|m| {
        selection.experiment.is_some()
            && m.experiment == selection.experiment
            && (selection.gc_delivered.is_none() || m.gc_delivered == selection.gc_delivered)
    });
    exact.or_else(|| view.metadata_for(dataset, enhancer_id).next())
}
